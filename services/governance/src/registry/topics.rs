//! Topic registry: validation and lifecycle transitions.
//!
//! # Key invariants
//! - Name uniqueness is decided by the store's atomic insert; the registry
//!   never reads before writing.
//! - Approval is a single conditional update in the store.
use super::Violations;
use crate::error::{GovernanceError, GovernanceResult};
use crate::model::{Topic, TopicDraft};
use crate::store::GovernanceStore;
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct TopicRegistry {
    store: Arc<dyn GovernanceStore>,
}

impl TopicRegistry {
    pub fn new(store: Arc<dyn GovernanceStore>) -> Self {
        Self { store }
    }

    pub async fn propose(&self, draft: TopicDraft) -> GovernanceResult<Topic> {
        validate_topic_draft(&draft)?;
        let partitions = checked_count("partitions", draft.partitions)?;
        let replicas = checked_count("replicas", draft.replicas)?;
        let topic = Topic::pending(
            draft.name,
            draft.cluster,
            partitions,
            replicas,
            draft.requested_by,
            Utc::now(),
        );
        Ok(self.store.insert_topic(topic).await?)
    }

    pub async fn list(&self) -> GovernanceResult<Vec<Topic>> {
        Ok(self.store.list_topics().await?)
    }

    pub async fn get_by_name(&self, name: &str) -> GovernanceResult<Topic> {
        Ok(self.store.get_topic(name).await?)
    }

    pub async fn approve(&self, name: &str, approved_by: &str) -> GovernanceResult<Topic> {
        let mut violations = Violations::default();
        violations.require_non_empty("approvedBy", approved_by);
        violations.into_result()?;
        Ok(self
            .store
            .approve_topic(name, approved_by, Utc::now())
            .await?)
    }
}

pub fn validate_topic_draft(draft: &TopicDraft) -> GovernanceResult<()> {
    let mut violations = Violations::default();
    violations.require_non_empty("name", &draft.name);
    violations.require_non_empty("cluster", &draft.cluster);
    violations.require_count("partitions", draft.partitions);
    violations.require_count("replicas", draft.replicas);
    violations.require_non_empty("requestedBy", &draft.requested_by);
    violations.into_result()
}

fn checked_count(field: &str, value: i64) -> GovernanceResult<u32> {
    u32::try_from(value)
        .map_err(|_| GovernanceError::Validation(format!("{field} is out of range")))
}
