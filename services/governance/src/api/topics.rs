//! Topic API handlers.
//!
//! # Purpose
//! Exposes the topic lifecycle: propose, list, fetch by name, approve. Each
//! service call runs under the per-request deadline.
use crate::api::error::ApiError;
use crate::api::types::{ApproveTopicRequest, TopicListResponse};
use crate::app::AppState;
use crate::model::{Topic, TopicDraft};
use crate::service::within_deadline;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[utoipa::path(
    post,
    path = "/api/v1/topics",
    tag = "topics",
    request_body = TopicDraft,
    responses(
        (status = 201, description = "Topic proposed", body = Topic),
        (status = 400, description = "Invalid proposal", body = crate::api::types::ErrorResponse),
        (status = 403, description = "Proposal not authorized", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Topic name already exists", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn propose_topic(
    State(state): State<AppState>,
    body: Result<Json<TopicDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(draft) = body?;
    let topic = within_deadline(state.request_timeout, state.service.propose_topic(draft)).await?;
    Ok((StatusCode::CREATED, Json(topic)))
}

#[utoipa::path(
    get,
    path = "/api/v1/topics",
    tag = "topics",
    responses(
        (status = 200, description = "All topics in creation order", body = TopicListResponse)
    )
)]
pub(crate) async fn list_topics(
    State(state): State<AppState>,
) -> Result<Json<TopicListResponse>, ApiError> {
    let items = within_deadline(state.request_timeout, state.service.list_topics()).await?;
    Ok(Json(TopicListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/v1/topics/{name}",
    tag = "topics",
    params(("name" = String, Path, description = "Topic name")),
    responses(
        (status = 200, description = "Fetch topic", body = Topic),
        (status = 404, description = "Topic not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_topic(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Topic>, ApiError> {
    let topic = within_deadline(state.request_timeout, state.service.get_topic(&name)).await?;
    Ok(Json(topic))
}

#[utoipa::path(
    post,
    path = "/api/v1/topics/{name}/approve",
    tag = "topics",
    params(("name" = String, Path, description = "Topic name")),
    request_body = ApproveTopicRequest,
    responses(
        (status = 200, description = "Topic approved", body = Topic),
        (status = 400, description = "Missing approver", body = crate::api::types::ErrorResponse),
        (status = 403, description = "Approval not authorized", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Topic not found", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Topic already approved", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn approve_topic(
    Path(name): Path<String>,
    State(state): State<AppState>,
    body: Result<Json<ApproveTopicRequest>, JsonRejection>,
) -> Result<Json<Topic>, ApiError> {
    let Json(request) = body?;
    let topic = within_deadline(
        state.request_timeout,
        state.service.approve_topic(&name, &request.approved_by),
    )
    .await?;
    Ok(Json(topic))
}
