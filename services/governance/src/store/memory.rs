//! In-memory implementation of the governance store.
//!
//! # Purpose
//! Implements [`GovernanceStore`] with plain collections guarded by
//! `tokio::sync::RwLock`. Used for local development, tests, and deployments
//! that do not need durability.
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - **Single-process consistency**: each mutation checks and writes while
//!   holding one write guard, with no `.await` between the check and the
//!   write. Concurrent proposals for the same name therefore serialize and
//!   exactly one wins, and a dropped (cancelled) future can never leave a
//!   half-applied write behind.
//!
//! # Ordering
//! Topics and policies are kept in insertion order; a side index maps topic
//! names to their slot for constant-time lookup.
use super::{GovernanceStore, StoreError, StoreResult};
use crate::model::{Policy, Topic};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct TopicTable {
    rows: Vec<Topic>,
    /// Topic name to index in `rows`. Doubles as the unique constraint.
    by_name: HashMap<String, usize>,
}

#[derive(Default)]
pub struct InMemoryStore {
    topics: RwLock<TopicTable>,
    policies: RwLock<Vec<Policy>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GovernanceStore for InMemoryStore {
    async fn insert_topic(&self, topic: Topic) -> StoreResult<Topic> {
        let mut table = self.topics.write().await;
        if table.by_name.contains_key(&topic.name) {
            return Err(StoreError::Conflict(format!(
                "topic {} already exists",
                topic.name
            )));
        }
        let slot = table.rows.len();
        table.by_name.insert(topic.name.clone(), slot);
        table.rows.push(topic.clone());
        metrics::counter!("governance_topic_changes_total", "op" => "proposed").increment(1);
        metrics::gauge!("governance_topics_total").set(table.rows.len() as f64);
        Ok(topic)
    }

    async fn list_topics(&self) -> StoreResult<Vec<Topic>> {
        Ok(self.topics.read().await.rows.clone())
    }

    async fn get_topic(&self, name: &str) -> StoreResult<Topic> {
        let table = self.topics.read().await;
        table
            .by_name
            .get(name)
            .map(|slot| table.rows[*slot].clone())
            .ok_or_else(|| StoreError::NotFound(format!("topic {name}")))
    }

    async fn approve_topic(
        &self,
        name: &str,
        approved_by: &str,
        approved_at: DateTime<Utc>,
    ) -> StoreResult<Topic> {
        let mut table = self.topics.write().await;
        let slot = *table
            .by_name
            .get(name)
            .ok_or_else(|| StoreError::NotFound(format!("topic {name}")))?;
        let topic = &mut table.rows[slot];
        if !topic.approve(approved_by, approved_at) {
            return Err(StoreError::InvalidState(format!(
                "topic {name} is already approved"
            )));
        }
        metrics::counter!("governance_topic_changes_total", "op" => "approved").increment(1);
        Ok(topic.clone())
    }

    async fn insert_policy(&self, policy: Policy) -> StoreResult<Policy> {
        let mut policies = self.policies.write().await;
        policies.push(policy.clone());
        metrics::gauge!("governance_policies_total").set(policies.len() as f64);
        Ok(policy)
    }

    async fn list_policies(&self) -> StoreResult<Vec<Policy>> {
        Ok(self.policies.read().await.clone())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
