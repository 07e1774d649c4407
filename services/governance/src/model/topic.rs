//! Topic record, lifecycle status, and proposal draft.
//!
//! # Purpose
//! Defines the stored topic shape and the single legal state transition
//! (PENDING to APPROVED).
//!
//! # Key invariants
//! - `approved_by` and `approved_at` are both present exactly when `status`
//!   is `APPROVED`; [`Topic::approve`] is the only in-process mutator.
//! - Status never regresses.
use chrono::{DateTime, Utc};
use governance_common::ids::TopicId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicStatus {
    Pending,
    Approved,
}

impl TopicStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TopicStatus::Pending => "PENDING",
            TopicStatus::Approved => "APPROVED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(TopicStatus::Pending),
            "APPROVED" => Some(TopicStatus::Approved),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    #[schema(value_type = String, format = Uuid)]
    pub id: TopicId,
    pub name: String,
    pub cluster: String,
    pub partitions: u32,
    pub replicas: u32,
    pub status: TopicStatus,
    pub requested_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
}

impl Topic {
    /// A freshly proposed topic awaiting approval.
    pub fn pending(
        name: String,
        cluster: String,
        partitions: u32,
        replicas: u32,
        requested_by: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TopicId::generate(),
            name,
            cluster,
            partitions,
            replicas,
            status: TopicStatus::Pending,
            requested_by,
            approved_by: None,
            created_at,
            approved_at: None,
        }
    }

    /// Move a pending topic to APPROVED, recording who approved it and when.
    ///
    /// Returns `false` and leaves the record untouched when the topic is
    /// already approved.
    pub fn approve(&mut self, approved_by: &str, approved_at: DateTime<Utc>) -> bool {
        if self.status != TopicStatus::Pending {
            return false;
        }
        self.status = TopicStatus::Approved;
        self.approved_by = Some(approved_by.to_string());
        self.approved_at = Some(approved_at);
        true
    }
}

/// Proposal payload. Counts are signed so that out-of-range input reaches
/// validation instead of failing deserialization.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TopicDraft {
    pub name: String,
    pub cluster: String,
    pub partitions: i64,
    pub replicas: i64,
    pub requested_by: String,
}
