//! OpenAPI document for the governance API.
//!
//! # Purpose
//! Collects every route and schema into one document served as JSON for
//! client generation.
use crate::api::types::{
    ApproveTopicRequest, ErrorResponse, HealthStatus, PolicyListResponse, TopicListResponse,
};
use crate::api::{policies, system, topics};
use crate::model::{Policy, PolicyDraft, Topic, TopicDraft, TopicStatus};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "governance",
        version = "v1",
        description = "Topic lifecycle and policy governance API"
    ),
    paths(
        system::health,
        topics::propose_topic,
        topics::list_topics,
        topics::get_topic,
        topics::approve_topic,
        policies::create_policy,
        policies::list_policies
    ),
    components(schemas(
        HealthStatus,
        ErrorResponse,
        Topic,
        TopicStatus,
        TopicDraft,
        TopicListResponse,
        ApproveTopicRequest,
        Policy,
        PolicyDraft,
        PolicyListResponse
    )),
    tags(
        (name = "system", description = "Health and discovery"),
        (name = "topics", description = "Topic lifecycle"),
        (name = "policies", description = "Access-control policies")
    )
)]
pub struct ApiDoc;

pub(crate) async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
