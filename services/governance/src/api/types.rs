//! HTTP API request/response types.
//!
//! # Purpose
//! Defines payload shapes shared by the governance REST API and the OpenAPI
//! document. Field names are camelCase on the wire.
use crate::model::{Policy, Topic};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
    pub storage: String,
    pub oracle: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopicListResponse {
    pub items: Vec<Topic>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PolicyListResponse {
    pub items: Vec<Policy>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApproveTopicRequest {
    pub approved_by: String,
}
