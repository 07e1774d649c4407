//! Policy API handlers.
//!
//! # Purpose
//! Creates access-control policies on behalf of the caller named in the
//! `x-principal` header, and lists the stored policy set.
//!
//! # Security considerations
//! - A request without a principal is rejected before the gate is consulted.
//! - Denied creations persist nothing.
use crate::api::error::{ApiError, api_unauthorized};
use crate::api::types::PolicyListResponse;
use crate::app::AppState;
use crate::auth::principal::principal_from_headers;
use crate::model::{Policy, PolicyDraft};
use crate::service::within_deadline;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

#[utoipa::path(
    post,
    path = "/api/v1/policies",
    tag = "policies",
    params(
        ("x-principal" = String, Header, description = "Requesting principal")
    ),
    request_body = PolicyDraft,
    responses(
        (status = 201, description = "Policy created", body = Policy),
        (status = 400, description = "Invalid policy", body = crate::api::types::ErrorResponse),
        (status = 401, description = "Missing requesting principal", body = crate::api::types::ErrorResponse),
        (status = 403, description = "Creation denied", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_policy(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<PolicyDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let requester = principal_from_headers(&headers)
        .ok_or_else(|| api_unauthorized("missing x-principal header"))?;
    let Json(draft) = body?;
    let policy = within_deadline(
        state.request_timeout,
        state.service.create_policy(&requester, draft),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(policy)))
}

#[utoipa::path(
    get,
    path = "/api/v1/policies",
    tag = "policies",
    responses(
        (status = 200, description = "All policies in creation order", body = PolicyListResponse)
    )
)]
pub(crate) async fn list_policies(
    State(state): State<AppState>,
) -> Result<Json<PolicyListResponse>, ApiError> {
    let items = within_deadline(state.request_timeout, state.service.list_policies()).await?;
    Ok(Json(PolicyListResponse { items }))
}
