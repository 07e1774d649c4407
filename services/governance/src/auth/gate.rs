//! Fail-closed authorization gate.
//!
//! # Purpose
//! Submits a [`DecisionRequest`] to the configured [`DecisionOracle`] under a
//! bounded deadline and reduces the answer to a [`Decision`].
//!
//! # Key invariants
//! - The result is permit only when the oracle explicitly answered permit.
//! - Oracle errors and deadline expiry become a deny with a diagnostic
//!   detail; they never propagate to callers.
use governance_authz::{Decision, DecisionOracle, DecisionRequest, Effect};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AuthorizationGate {
    oracle: Arc<dyn DecisionOracle>,
    timeout: Duration,
}

impl AuthorizationGate {
    pub fn new(oracle: Arc<dyn DecisionOracle>, timeout: Duration) -> Self {
        Self { oracle, timeout }
    }

    pub fn oracle_name(&self) -> &'static str {
        self.oracle.name()
    }

    pub async fn decide(&self, request: &DecisionRequest) -> Decision {
        let decision = match tokio::time::timeout(self.timeout, self.oracle.decide(request)).await
        {
            Ok(Ok(effect)) => Decision::from_effect(effect),
            Ok(Err(err)) => {
                tracing::warn!(
                    oracle = self.oracle.name(),
                    error = %err,
                    "authorization oracle failed; denying"
                );
                Decision::deny(err.to_string())
            }
            Err(_) => {
                tracing::warn!(
                    oracle = self.oracle.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "authorization oracle timed out; denying"
                );
                Decision::deny(format!("oracle timed out after {:?}", self.timeout))
            }
        };
        metrics::counter!(
            "governance_decisions_total",
            "outcome" => decision.outcome.as_str()
        )
        .increment(1);
        tracing::debug!(
            principal = %request.principal,
            action = %request.action,
            resource = %request.resource,
            outcome = decision.outcome.as_str(),
            "authorization decision"
        );
        decision
    }
}

/// Oracle that answers every request with the same effect.
///
/// Useful for wiring tests and for deployments that gate nothing.
pub struct StaticOracle(pub Effect);

#[async_trait::async_trait]
impl DecisionOracle for StaticOracle {
    async fn decide(
        &self,
        _request: &DecisionRequest,
    ) -> Result<Effect, governance_authz::OracleError> {
        Ok(self.0)
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
