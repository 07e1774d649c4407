//! Health endpoint.
//!
//! Probes the backing store; used by readiness checks.
use crate::api::error::{ApiError, api_unavailable};
use crate::api::types::HealthStatus;
use crate::app::AppState;
use crate::service::within_deadline;
use axum::Json;
use axum::extract::State;

#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "system",
    responses(
        (status = 200, description = "Service health", body = HealthStatus),
        (status = 503, description = "Storage unavailable", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn health(State(state): State<AppState>) -> Result<Json<HealthStatus>, ApiError> {
    if let Err(err) = within_deadline(state.request_timeout, state.service.health_check()).await {
        tracing::warn!(error = %err, "health check failed");
        return Err(api_unavailable("storage unavailable"));
    }
    Ok(Json(HealthStatus {
        status: "ok".to_string(),
        storage: state.service.store().backend_name().to_string(),
        oracle: state.service.oracle_name().to_string(),
    }))
}
