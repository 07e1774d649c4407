//! Domain error returned by registries and the governance service.
//!
//! # Key invariants
//! - Every failure path is a typed variant; nothing is reported as success
//!   with placeholder data.
//! - Authorization failures never carry oracle internals to callers beyond
//!   the decision detail.
use crate::store::StoreError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("not authorized: {0}")]
    Authorization(String),
    #[error("storage failure: {0}")]
    Storage(#[source] StoreError),
    #[error("deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),
}

impl From<StoreError> for GovernanceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(message) => GovernanceError::NotFound(message),
            StoreError::Conflict(message) => GovernanceError::Conflict(message),
            StoreError::InvalidState(message) => GovernanceError::InvalidState(message),
            other @ StoreError::Unexpected(_) => GovernanceError::Storage(other),
        }
    }
}

pub type GovernanceResult<T> = Result<T, GovernanceError>;
