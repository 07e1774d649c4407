//! Governance orchestration: topic lifecycle and gated policy creation.
//!
//! # Purpose
//! Composes the topic and policy registries with the authorization gate.
//! HTTP handlers call into [`GovernanceService`] with already-shaped
//! commands and map the typed result back to a response.
//!
//! # Key invariants
//! - A policy is persisted only after the gate returned an explicit permit
//!   for (requester, policy action, policy resource).
//! - When topic gating is enabled, proposal and approval are checked as
//!   `CreateTopic` and `ApproveTopic` on the topic name before any write.
//! - Seed policies bypass the gate and are only applied to an empty store.
use crate::auth::AuthorizationGate;
use crate::error::{GovernanceError, GovernanceResult};
use crate::model::{Policy, PolicyDraft, Topic, TopicDraft};
use crate::registry::{PolicyRegistry, TopicRegistry, validate_policy_draft, validate_topic_draft};
use crate::store::GovernanceStore;
use governance_authz::{Action, DecisionRequest};
use governance_common::Principal;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct GovernanceService {
    store: Arc<dyn GovernanceStore>,
    topics: TopicRegistry,
    policies: PolicyRegistry,
    gate: AuthorizationGate,
    gate_topic_operations: bool,
}

impl GovernanceService {
    pub fn new(
        store: Arc<dyn GovernanceStore>,
        gate: AuthorizationGate,
        gate_topic_operations: bool,
    ) -> Self {
        Self {
            topics: TopicRegistry::new(store.clone()),
            policies: PolicyRegistry::new(store.clone()),
            store,
            gate,
            gate_topic_operations,
        }
    }

    pub fn store(&self) -> &Arc<dyn GovernanceStore> {
        &self.store
    }

    pub fn oracle_name(&self) -> &'static str {
        self.gate.oracle_name()
    }

    pub async fn propose_topic(&self, draft: TopicDraft) -> GovernanceResult<Topic> {
        if self.gate_topic_operations {
            validate_topic_draft(&draft)?;
            self.authorize(&DecisionRequest::new(
                draft.requested_by.as_str(),
                Action::CreateTopic.as_str(),
                draft.name.as_str(),
            ))
            .await?;
        }
        match self.topics.propose(draft).await {
            Ok(topic) => {
                tracing::info!(
                    topic = %topic.name,
                    id = %topic.id,
                    requested_by = %topic.requested_by,
                    "topic proposed"
                );
                Ok(topic)
            }
            Err(err) => Err(log_failure("propose topic", err)),
        }
    }

    pub async fn list_topics(&self) -> GovernanceResult<Vec<Topic>> {
        self.topics
            .list()
            .await
            .map_err(|err| log_failure("list topics", err))
    }

    pub async fn get_topic(&self, name: &str) -> GovernanceResult<Topic> {
        self.topics
            .get_by_name(name)
            .await
            .map_err(|err| log_failure("get topic", err))
    }

    pub async fn approve_topic(&self, name: &str, approved_by: &str) -> GovernanceResult<Topic> {
        if self.gate_topic_operations && !approved_by.trim().is_empty() {
            self.authorize(&DecisionRequest::new(
                approved_by,
                Action::ApproveTopic.as_str(),
                name,
            ))
            .await?;
        }
        match self.topics.approve(name, approved_by).await {
            Ok(topic) => {
                tracing::info!(topic = %topic.name, approved_by, "topic approved");
                Ok(topic)
            }
            Err(err) => Err(log_failure("approve topic", err)),
        }
    }

    /// Create a policy on behalf of `requester`.
    ///
    /// The draft is validated first so a malformed policy is rejected without
    /// consulting the oracle. The decision subject is the new policy's own
    /// action and resource.
    pub async fn create_policy(
        &self,
        requester: &Principal,
        draft: PolicyDraft,
    ) -> GovernanceResult<Policy> {
        validate_policy_draft(&draft)?;
        self.authorize(&DecisionRequest {
            principal: requester.clone(),
            action: draft.action.clone(),
            resource: draft.resource.clone(),
        })
        .await?;
        match self.policies.create(draft).await {
            Ok(policy) => {
                tracing::info!(
                    id = %policy.id,
                    requester = %requester,
                    principal = %policy.principal,
                    action = %policy.action,
                    resource = %policy.resource,
                    effect = %policy.effect,
                    "policy created"
                );
                Ok(policy)
            }
            Err(err) => Err(log_failure("create policy", err)),
        }
    }

    pub async fn list_policies(&self) -> GovernanceResult<Vec<Policy>> {
        self.policies
            .list()
            .await
            .map_err(|err| log_failure("list policies", err))
    }

    /// Insert bootstrap policies when the policy store is empty.
    ///
    /// Returns the number of policies written.
    pub async fn seed_policies(&self, seeds: &[PolicyDraft]) -> GovernanceResult<usize> {
        if seeds.is_empty() {
            return Ok(0);
        }
        if !self.policies.list().await?.is_empty() {
            tracing::info!("policy store already populated; skipping seed policies");
            return Ok(0);
        }
        for seed in seeds {
            self.policies.create(seed.clone()).await?;
        }
        tracing::info!(count = seeds.len(), "seed policies installed");
        Ok(seeds.len())
    }

    pub async fn health_check(&self) -> GovernanceResult<()> {
        Ok(self.store.health_check().await?)
    }

    async fn authorize(&self, request: &DecisionRequest) -> GovernanceResult<()> {
        let decision = self.gate.decide(request).await;
        if decision.is_permit() {
            return Ok(());
        }
        tracing::warn!(
            principal = %request.principal,
            action = %request.action,
            resource = %request.resource,
            detail = decision.detail.as_deref().unwrap_or(""),
            "authorization denied"
        );
        Err(GovernanceError::Authorization(format!(
            "{} may not {} on {}",
            request.principal, request.action, request.resource
        )))
    }
}

fn log_failure(operation: &'static str, err: GovernanceError) -> GovernanceError {
    match &err {
        GovernanceError::Storage(source) => {
            tracing::error!(operation, error = ?source, "governance storage failure");
        }
        GovernanceError::Conflict(message) | GovernanceError::InvalidState(message) => {
            tracing::warn!(operation, %message, "governance request rejected");
        }
        _ => {}
    }
    err
}

/// Run `fut` under the per-request deadline.
///
/// Dropping the inner future on expiry is safe: store mutations are single
/// critical sections or single statements.
pub async fn within_deadline<T, F>(deadline: Duration, fut: F) -> GovernanceResult<T>
where
    F: Future<Output = GovernanceResult<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(GovernanceError::DeadlineExceeded(deadline)),
    }
}
