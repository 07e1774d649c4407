use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("invalid effect: {0} (expected \"permit\" or \"forbid\")")]
    InvalidEffect(String),
}

pub type AuthzResult<T> = Result<T, AuthzError>;

/// Failure to obtain a definitive answer from a decision oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
    #[error("malformed oracle response: {0}")]
    Malformed(String),
    #[error("oracle evaluation failed: {0}")]
    Evaluation(String),
}
