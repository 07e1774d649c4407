//! Governance data model.
//!
//! # Purpose
//! Re-exports the topic and policy records and the draft payloads callers
//! submit to create them.
mod policy;
mod topic;

pub use policy::{Policy, PolicyDraft};
pub use topic::{Topic, TopicDraft, TopicStatus};
