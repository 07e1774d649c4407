use governance::app::{AppState, build_router};
use governance::auth::{AuthorizationGate, PolicyStoreOracle};
use governance::service::GovernanceService;
use governance::store::GovernanceStore;
use governance::store::memory::InMemoryStore;
use governance_authz::DecisionOracle;
use std::sync::Arc;
use std::time::Duration;

#[allow(dead_code)]
pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

/// Router over an in-memory store. `oracle` defaults to the local policy
/// oracle reading the same store.
#[allow(dead_code)]
pub fn memory_app(
    oracle: Option<Arc<dyn DecisionOracle>>,
    gate_topic_operations: bool,
) -> (axum::Router, GovernanceService) {
    let store: Arc<dyn GovernanceStore> = Arc::new(InMemoryStore::new());
    let oracle: Arc<dyn DecisionOracle> = match oracle {
        Some(oracle) => oracle,
        None => Arc::new(PolicyStoreOracle::new(store.clone())),
    };
    let service = GovernanceService::new(
        store,
        AuthorizationGate::new(oracle, Duration::from_secs(1)),
        gate_topic_operations,
    );
    let state = AppState {
        service: service.clone(),
        request_timeout: Duration::from_secs(2),
    };
    (build_router(state), service)
}
