//! Governance HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router with tracing middleware, defines the shared state
//! injected into handlers, and assembles that state from configuration.
use crate::api;
use crate::auth::{AuthorizationGate, HttpOracle, PolicyStoreOracle};
use crate::config::{GovernanceConfig, OracleBackend, StorageBackend};
use crate::observability;
use crate::service::GovernanceService;
use crate::store::GovernanceStore;
use crate::store::memory::InMemoryStore;
use crate::store::postgres::PostgresStore;
use anyhow::Context;
use axum::Router;
use governance_authz::DecisionOracle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;

#[derive(Clone)]
pub struct AppState {
    pub service: GovernanceService,
    pub request_timeout: Duration,
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            let parent = observability::trace_context_from_headers(request.headers());
            let span = tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            );
            span.set_parent(parent);
            span
        });

    Router::new()
        .route("/api/v1/health", axum::routing::get(api::system::health))
        .route(
            "/api/v1/topics",
            axum::routing::get(api::topics::list_topics).post(api::topics::propose_topic),
        )
        .route(
            "/api/v1/topics/:name",
            axum::routing::get(api::topics::get_topic),
        )
        .route(
            "/api/v1/topics/:name/approve",
            axum::routing::post(api::topics::approve_topic),
        )
        .route(
            "/api/v1/policies",
            axum::routing::get(api::policies::list_policies).post(api::policies::create_policy),
        )
        .route(
            "/api/v1/openapi.json",
            axum::routing::get(api::openapi::openapi_json),
        )
        .layer(trace_layer)
        .with_state(state)
}

/// Connect storage, pick the decision oracle, apply seed policies.
pub async fn build_state(config: GovernanceConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn GovernanceStore> = match config.storage {
        StorageBackend::Memory => Arc::new(InMemoryStore::new()),
        StorageBackend::Postgres => {
            let pg = config
                .postgres
                .as_ref()
                .context("postgres configuration missing")?;
            Arc::new(
                PostgresStore::connect(pg)
                    .await
                    .context("connect postgres store")?,
            )
        }
    };

    let oracle: Arc<dyn DecisionOracle> = match config.oracle.backend {
        OracleBackend::Local => Arc::new(PolicyStoreOracle::new(store.clone())),
        OracleBackend::Http => {
            let url = config
                .oracle
                .url
                .clone()
                .context("oracle url missing for http oracle")?;
            Arc::new(
                HttpOracle::new(url, Duration::from_millis(config.oracle.timeout_ms))
                    .context("build http oracle")?,
            )
        }
    };
    let gate = AuthorizationGate::new(oracle, Duration::from_millis(config.oracle.timeout_ms));
    let service = GovernanceService::new(store, gate, config.gate_topic_operations);

    service
        .seed_policies(&config.seed_policies)
        .await
        .context("apply seed policies")?;

    tracing::info!(
        storage = service.store().backend_name(),
        durable = service.store().is_durable(),
        oracle = service.oracle_name(),
        gate_topic_operations = config.gate_topic_operations,
        "governance state ready"
    );

    Ok(AppState {
        service,
        request_timeout: Duration::from_millis(config.request_timeout_ms),
    })
}
