//! Local decision oracle backed by the persisted policy set.
//!
//! # Purpose
//! Loads every stored policy into an in-memory Casbin enforcer per request
//! and evaluates the (principal, resource, action) tuple against it.
//!
//! # Key invariants
//! - A matching `forbid` overrides any matching `permit`.
//! - No matching policy means deny.
//! - `*` in a policy field is a glob over characters; text after it must
//!   still match.
//! - Policies are read fresh on every decision; nothing is cached.
use crate::model::Policy;
use crate::store::GovernanceStore;
use async_trait::async_trait;
use casbin::{CoreApi, Enforcer, MemoryAdapter, MgmtApi};
use governance_authz::{
    DecisionOracle, DecisionRequest, Effect, OracleError, WILDCARD_MATCH, casbin_model,
    wildcard_match_operator,
};
use std::sync::Arc;

pub struct PolicyStoreOracle {
    store: Arc<dyn GovernanceStore>,
}

impl PolicyStoreOracle {
    pub fn new(store: Arc<dyn GovernanceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DecisionOracle for PolicyStoreOracle {
    async fn decide(&self, request: &DecisionRequest) -> Result<Effect, OracleError> {
        let policies = self
            .store
            .list_policies()
            .await
            .map_err(|err| OracleError::Unavailable(format!("policy store: {err}")))?;
        let enforcer = build_enforcer(&policies)
            .await
            .map_err(|err| OracleError::Evaluation(err.to_string()))?;
        let allowed = enforcer
            .enforce((
                request.principal.as_str(),
                request.resource.as_str(),
                request.action.as_str(),
            ))
            .map_err(|err| OracleError::Evaluation(err.to_string()))?;
        Ok(if allowed {
            Effect::Permit
        } else {
            Effect::Forbid
        })
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Build an in-memory Casbin enforcer holding `policies`.
pub async fn build_enforcer(policies: &[Policy]) -> casbin::Result<Enforcer> {
    let model = casbin_model().await?;
    let mut enforcer = Enforcer::new(model, MemoryAdapter::default()).await?;
    enforcer.add_function(WILDCARD_MATCH, wildcard_match_operator());
    for policy in policies {
        // Duplicate rules are reported as `Ok(false)` and skipped.
        enforcer
            .add_policy(vec![
                policy.principal.clone(),
                policy.resource.clone(),
                policy.action.clone(),
                policy.effect.casbin_eft().to_string(),
            ])
            .await?;
    }
    Ok(enforcer)
}
