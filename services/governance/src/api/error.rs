//! API error types and helpers.
//!
//! # Purpose
//! Centralizes HTTP error construction so every governance endpoint returns
//! the same `{code, message, requestId}` body, and maps [`GovernanceError`]
//! kinds onto status codes.
//!
//! # Security considerations
//! - Storage failures are logged server-side and returned as a generic
//!   `internal` error.
//! - Authorization denials do not echo oracle diagnostics to the caller.
use crate::api::types::ErrorResponse;
use crate::error::GovernanceError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Structured API error returned by handlers.
///
/// `status` must match the semantics of `body.code`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: &str) -> Self {
        Self {
            status,
            body: ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
                request_id: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<GovernanceError> for ApiError {
    fn from(err: GovernanceError) -> Self {
        match err {
            GovernanceError::Validation(message) => api_validation_error(&message),
            GovernanceError::Conflict(message) => api_conflict("already_exists", &message),
            GovernanceError::InvalidState(message) => api_conflict("already_approved", &message),
            GovernanceError::NotFound(message) => api_not_found(&message),
            GovernanceError::Authorization(message) => api_forbidden(&message),
            GovernanceError::Storage(source) => {
                tracing::error!(error = ?source, "governance storage error");
                api_internal_message("storage failure")
            }
            GovernanceError::DeadlineExceeded(after) => {
                tracing::warn!(?after, "request deadline exceeded");
                api_deadline_exceeded("request deadline exceeded")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        api_validation_error(&rejection.body_text())
    }
}

pub fn api_not_found(message: &str) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "not_found", message)
}

/// Caller provides a specific conflict code for precise client handling.
pub fn api_conflict(code: &str, message: &str) -> ApiError {
    ApiError::new(StatusCode::CONFLICT, code, message)
}

pub fn api_internal_message(message: &str) -> ApiError {
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
}

pub fn api_unavailable(message: &str) -> ApiError {
    ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "unavailable", message)
}

pub fn api_deadline_exceeded(message: &str) -> ApiError {
    ApiError::new(StatusCode::GATEWAY_TIMEOUT, "deadline_exceeded", message)
}

/// Authentication missing.
pub fn api_unauthorized(message: &str) -> ApiError {
    ApiError::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
}

/// Authorization denied despite authentication.
pub fn api_forbidden(message: &str) -> ApiError {
    ApiError::new(StatusCode::FORBIDDEN, "forbidden", message)
}

pub fn api_validation_error(message: &str) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "validation_error", message)
}
