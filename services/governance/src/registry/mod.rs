//! Validating front-ends over the governance store.
//!
//! # Purpose
//! [`TopicRegistry`] and [`PolicyRegistry`] validate drafts, assign ids and
//! timestamps, and translate store failures into [`GovernanceError`]s. They
//! never consult the authorization gate; callers obtain a permit first.
//!
//! [`GovernanceError`]: crate::error::GovernanceError
mod policies;
mod topics;

pub use policies::{PolicyRegistry, validate_policy_draft};
pub use topics::{TopicRegistry, validate_topic_draft};

/// Largest accepted partition or replica count. Counts are persisted as
/// signed 32-bit integers.
pub const MAX_COUNT: i64 = i32::MAX as i64;

/// Collects every violation of a draft so the caller sees them all at once.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<String>);

impl Violations {
    pub(crate) fn require_non_empty(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.0.push(format!("{field} is required"));
        }
    }

    pub(crate) fn require_count(&mut self, field: &str, value: i64) {
        if !(1..=MAX_COUNT).contains(&value) {
            self.0.push(format!("{field} must be between 1 and {MAX_COUNT}"));
        }
    }

    pub(crate) fn push(&mut self, message: String) {
        self.0.push(message);
    }

    pub(crate) fn into_result(self) -> crate::error::GovernanceResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(crate::error::GovernanceError::Validation(self.0.join("; ")))
        }
    }
}
