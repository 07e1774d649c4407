use crate::{DecisionRequest, Effect, OracleError};
use async_trait::async_trait;

/// Capability interface to an external policy-decision engine.
///
/// Implementations answer with the effect that applies to the request, or an
/// error when no definitive answer could be obtained. Callers must treat an
/// error as a deny.
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    async fn decide(&self, request: &DecisionRequest) -> Result<Effect, OracleError>;

    /// Short backend label for logs and metrics.
    fn name(&self) -> &'static str;
}
