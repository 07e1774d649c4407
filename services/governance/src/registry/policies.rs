//! Policy registry: validation and append-only persistence.
use super::Violations;
use crate::error::{GovernanceError, GovernanceResult};
use crate::model::{Policy, PolicyDraft};
use crate::store::GovernanceStore;
use chrono::Utc;
use governance_authz::Effect;
use governance_common::ids::PolicyId;
use std::sync::Arc;

#[derive(Clone)]
pub struct PolicyRegistry {
    store: Arc<dyn GovernanceStore>,
}

impl PolicyRegistry {
    pub fn new(store: Arc<dyn GovernanceStore>) -> Self {
        Self { store }
    }

    /// Persist a validated policy. Authorization is the caller's job.
    pub async fn create(&self, draft: PolicyDraft) -> GovernanceResult<Policy> {
        let effect = validate_policy_draft(&draft)?;
        let policy = Policy {
            id: PolicyId::generate(),
            principal: draft.principal,
            action: draft.action,
            resource: draft.resource,
            effect,
            created_at: Utc::now(),
        };
        Ok(self.store.insert_policy(policy).await?)
    }

    pub async fn list(&self) -> GovernanceResult<Vec<Policy>> {
        Ok(self.store.list_policies().await?)
    }
}

/// Check a draft and return its parsed effect.
pub fn validate_policy_draft(draft: &PolicyDraft) -> GovernanceResult<Effect> {
    let mut violations = Violations::default();
    violations.require_non_empty("principal", &draft.principal);
    violations.require_non_empty("action", &draft.action);
    violations.require_non_empty("resource", &draft.resource);
    let effect = match Effect::parse(&draft.effect) {
        Ok(effect) => Some(effect),
        Err(err) => {
            violations.push(err.to_string());
            None
        }
    };
    violations.into_result()?;
    effect.ok_or_else(|| GovernanceError::Validation("effect is required".to_string()))
}
