//! Governance control-plane HTTP service entry point.
//!
//! # Purpose
//! Loads configuration, initializes observability, builds the service state,
//! and serves the API and metrics listeners until shutdown.
use governance::app::{build_router, build_state};
use governance::config::GovernanceConfig;
use governance::observability;
use std::future::Future;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GovernanceConfig::from_env_or_yaml()?;
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: GovernanceConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability("governance", &config.log_filter)?;
    let metrics_bind = config.metrics_bind;
    let addr = config.bind_addr;
    let state = build_state(config).await?;
    let metrics_task = tokio::spawn(observability::serve_metrics(metrics_handle, metrics_bind));

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "governance control plane listening");
    tokio::pin!(shutdown);
    tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => {
            result?;
        }
        _ = &mut shutdown => {
            tracing::info!("shutdown requested");
        }
    }

    metrics_task.abort();
    let _ = metrics_task.await;
    Ok(())
}
