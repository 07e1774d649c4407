//! Governance service configuration.
//!
//! # Purpose
//! Builds an explicit [`GovernanceConfig`] from environment variables and an
//! optional YAML override file. The resulting value is passed into
//! `build_state`; no component reads configuration from ambient globals.
use crate::model::PolicyDraft;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_METRICS_BIND: &str = "0.0.0.0:9090";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_ORACLE_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_PG_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_PG_CONNECT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_PG_ACQUIRE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleBackend {
    /// Evaluate the persisted policy set in-process.
    Local,
    /// Ask a remote OPA-compatible decision endpoint.
    Http,
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_ms: u64,
    pub acquire_timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub backend: OracleBackend,
    pub url: Option<String>,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct GovernanceConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub log_filter: String,
    pub storage: StorageBackend,
    pub postgres: Option<PostgresConfig>,
    pub oracle: OracleConfig,
    pub request_timeout_ms: u64,
    /// Route topic proposal and approval through the authorization gate.
    pub gate_topic_operations: bool,
    /// Policies inserted at startup when the policy store is empty.
    pub seed_policies: Vec<PolicyDraft>,
}

#[derive(Debug, Default, Deserialize)]
struct GovernanceConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    log_filter: Option<String>,
    storage: Option<StorageBackend>,
    postgres_url: Option<String>,
    postgres_max_connections: Option<u32>,
    oracle: Option<OracleBackend>,
    oracle_url: Option<String>,
    oracle_timeout_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
    gate_topic_operations: Option<bool>,
    #[serde(default)]
    seed_policies: Vec<PolicyDraft>,
}

impl GovernanceConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env_or("GOVERNANCE_BIND", DEFAULT_BIND)
            .parse()
            .with_context(|| "parse GOVERNANCE_BIND")?;
        let metrics_bind = env_or("GOVERNANCE_METRICS_BIND", DEFAULT_METRICS_BIND)
            .parse()
            .with_context(|| "parse GOVERNANCE_METRICS_BIND")?;
        let log_filter = env_or("GOVERNANCE_LOG", DEFAULT_LOG_FILTER);
        let storage = match env_or("GOVERNANCE_STORAGE", "memory").as_str() {
            "memory" => StorageBackend::Memory,
            "postgres" => StorageBackend::Postgres,
            other => bail!("unsupported GOVERNANCE_STORAGE: {other}"),
        };
        let postgres = match std::env::var("GOVERNANCE_POSTGRES_URL") {
            Ok(url) => Some(PostgresConfig {
                url,
                max_connections: parse_env(
                    "GOVERNANCE_POSTGRES_MAX_CONNECTIONS",
                    DEFAULT_PG_MAX_CONNECTIONS,
                )?,
                connect_timeout_ms: DEFAULT_PG_CONNECT_TIMEOUT_MS,
                acquire_timeout_ms: DEFAULT_PG_ACQUIRE_TIMEOUT_MS,
            }),
            Err(_) => None,
        };
        let backend = match env_or("GOVERNANCE_ORACLE", "local").as_str() {
            "local" => OracleBackend::Local,
            "http" => OracleBackend::Http,
            other => bail!("unsupported GOVERNANCE_ORACLE: {other}"),
        };
        let oracle = OracleConfig {
            backend,
            url: std::env::var("GOVERNANCE_ORACLE_URL").ok(),
            timeout_ms: parse_env("GOVERNANCE_ORACLE_TIMEOUT_MS", DEFAULT_ORACLE_TIMEOUT_MS)?,
        };
        Ok(Self {
            bind_addr,
            metrics_bind,
            log_filter,
            storage,
            postgres,
            oracle,
            request_timeout_ms: parse_env(
                "GOVERNANCE_REQUEST_TIMEOUT_MS",
                DEFAULT_REQUEST_TIMEOUT_MS,
            )?,
            gate_topic_operations: parse_env("GOVERNANCE_GATE_TOPICS", false)?,
            seed_policies: Vec::new(),
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("GOVERNANCE_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read GOVERNANCE_CONFIG: {path}"))?;
            let override_cfg: GovernanceConfigOverride = serde_yaml::from_str(&contents)
                .with_context(|| "parse governance config yaml")?;
            config.apply(override_cfg)?;
        }
        Ok(config)
    }

    fn apply(&mut self, override_cfg: GovernanceConfigOverride) -> Result<()> {
        if let Some(value) = override_cfg.bind_addr {
            self.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
        }
        if let Some(value) = override_cfg.metrics_bind {
            self.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
        }
        if let Some(value) = override_cfg.log_filter {
            self.log_filter = value;
        }
        if let Some(value) = override_cfg.storage {
            self.storage = value;
        }
        if let Some(url) = override_cfg.postgres_url {
            let pg = self.postgres.get_or_insert_with(|| PostgresConfig {
                url: String::new(),
                max_connections: DEFAULT_PG_MAX_CONNECTIONS,
                connect_timeout_ms: DEFAULT_PG_CONNECT_TIMEOUT_MS,
                acquire_timeout_ms: DEFAULT_PG_ACQUIRE_TIMEOUT_MS,
            });
            pg.url = url;
        }
        if let (Some(value), Some(pg)) =
            (override_cfg.postgres_max_connections, self.postgres.as_mut())
        {
            pg.max_connections = value;
        }
        if let Some(value) = override_cfg.oracle {
            self.oracle.backend = value;
        }
        if let Some(value) = override_cfg.oracle_url {
            self.oracle.url = Some(value);
        }
        if let Some(value) = override_cfg.oracle_timeout_ms {
            self.oracle.timeout_ms = value;
        }
        if let Some(value) = override_cfg.request_timeout_ms {
            self.request_timeout_ms = value;
        }
        if let Some(value) = override_cfg.gate_topic_operations {
            self.gate_topic_operations = value;
        }
        if !override_cfg.seed_policies.is_empty() {
            self.seed_policies = override_cfg.seed_policies;
        }
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().with_context(|| format!("parse {key}")),
        Err(_) => Ok(default),
    }
}
