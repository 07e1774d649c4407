//! Persistence boundary for topics and policies.
//!
//! # Purpose
//! Defines the [`GovernanceStore`] trait the registries write through, and the
//! error vocabulary backends report in.
//!
//! # Key invariants
//! - `insert_topic` is an atomic conditional insert: a duplicate name yields
//!   [`StoreError::Conflict`] even when two callers race.
//! - `approve_topic` is an atomic conditional update: only a PENDING topic
//!   transitions; anything else yields `NotFound` or `InvalidState`.
//! - Listing returns records in creation order.
//! - Backends never cache: every read observes the authoritative state.
use crate::model::{Policy, Topic};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unexpected(err.into())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Unexpected(err.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait GovernanceStore: Send + Sync {
    async fn insert_topic(&self, topic: Topic) -> StoreResult<Topic>;
    async fn list_topics(&self) -> StoreResult<Vec<Topic>>;
    async fn get_topic(&self, name: &str) -> StoreResult<Topic>;
    async fn approve_topic(
        &self,
        name: &str,
        approved_by: &str,
        approved_at: DateTime<Utc>,
    ) -> StoreResult<Topic>;

    async fn insert_policy(&self, policy: Policy) -> StoreResult<Policy>;
    async fn list_policies(&self) -> StoreResult<Vec<Policy>>;

    async fn health_check(&self) -> StoreResult<()>;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}
