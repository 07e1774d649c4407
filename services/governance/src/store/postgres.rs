//! Postgres-backed implementation of the governance store.
//!
//! # What this module is
//! Implements [`GovernanceStore`] on Postgres via `sqlx`, as the durable,
//! shared store for topic lifecycle records and access-control policies.
//!
//! # Key invariants
//! - `topics.name` carries a unique constraint. Proposals never check for an
//!   existing row first; they insert and translate SQLSTATE `23505` into
//!   [`StoreError::Conflict`]. Two racing proposals for one name therefore
//!   resolve to exactly one row.
//! - Approval is a single `UPDATE ... WHERE status = 'PENDING'`. When no row
//!   matches, a follow-up existence probe only decides which error to report.
//! - Check constraints keep `approved_by`/`approved_at` paired and aligned
//!   with `status`, so a buggy writer cannot persist a half-approved topic.
//! - Reads order by the `seq` identity column, which follows insert order.
//!
//! # Cancellation
//! Every mutation is a single statement. A request dropped mid-flight either
//! committed before the drop or did not run at all. Nothing awaited after the
//! statement can fail the call; row-count gauges refresh on a spawned task.
//!
//! # Security notes
//! - Database URLs may contain credentials; never log `PostgresConfig::url`.
//! - All SQL is static; values are always bound parameters.
use super::{GovernanceStore, StoreError, StoreResult};
use crate::config::PostgresConfig;
use crate::model::{Policy, Topic, TopicStatus};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use governance_authz::Effect;
use governance_common::ids::{PolicyId, TopicId};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

const TOPIC_COLUMNS: &str = "id, name, cluster, partitions, replicas, status, requested_by, approved_by, created_at, approved_at";
const POLICY_COLUMNS: &str = "id, principal, action, resource, effect, created_at";

/// Durable governance store backed by Postgres.
///
/// # Example
/// ```rust,no_run
/// use governance::config::PostgresConfig;
/// use governance::store::postgres::PostgresStore;
///
/// async fn open(pg: PostgresConfig) {
///     let _ = PostgresStore::connect(&pg).await;
/// }
/// ```
pub struct PostgresStore {
    pool: PgPool,
}

/// Row shape of the `topics` table. Kept apart from [`Topic`] so that
/// string-to-enum parsing and integer narrowing happen in one place.
#[derive(Debug, Clone, FromRow)]
struct DbTopic {
    id: Uuid,
    name: String,
    cluster: String,
    partitions: i32,
    replicas: i32,
    status: String,
    requested_by: String,
    approved_by: Option<String>,
    created_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow)]
struct DbPolicy {
    id: Uuid,
    principal: String,
    action: String,
    resource: String,
    effect: String,
    created_at: DateTime<Utc>,
}

impl PostgresStore {
    /// Connect, apply embedded migrations, and return a ready store.
    ///
    /// # Errors
    /// - Connection, pool setup, or migration failures.
    pub async fn connect(pg: &PostgresConfig) -> StoreResult<Self> {
        let store = Self::connect_without_migrations(pg).await?;
        // Handlers assume the schema exists; refuse to start otherwise.
        sqlx::migrate!("./migrations").run(&store.pool).await?;
        Ok(store)
    }

    /// Connect against an already-migrated schema.
    pub async fn connect_without_migrations(pg: &PostgresConfig) -> StoreResult<Self> {
        // Bound both pool acquisition and the initial connect so a dead
        // database fails startup instead of hanging it.
        let connect_options = PgConnectOptions::from_str(&pg.url)?;
        let connect = PgPoolOptions::new()
            .max_connections(pg.max_connections)
            .acquire_timeout(Duration::from_millis(pg.acquire_timeout_ms))
            .connect_with(connect_options);
        let pool = tokio::time::timeout(Duration::from_millis(pg.connect_timeout_ms), connect)
            .await
            .map_err(|_| anyhow!("postgres connect timed out"))??;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // Runs detached: the write it follows has already committed.
    fn spawn_count_refresh(&self) {
        tokio::spawn(refresh_counts(self.pool.clone()));
    }
}

async fn refresh_counts(pool: PgPool) {
    match count_rows(&pool).await {
        Ok((topics, policies)) => {
            metrics::gauge!("governance_topics_total").set(topics as f64);
            metrics::gauge!("governance_policies_total").set(policies as f64);
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to refresh governance row gauges");
        }
    }
}

async fn count_rows(pool: &PgPool) -> Result<(i64, i64), sqlx::Error> {
    let topics: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM topics")
        .fetch_one(pool)
        .await?;
    let policies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM policies")
        .fetch_one(pool)
        .await?;
    Ok((topics, policies))
}

#[async_trait]
impl GovernanceStore for PostgresStore {
    async fn insert_topic(&self, topic: Topic) -> StoreResult<Topic> {
        let query = format!(
            "INSERT INTO topics ({TOPIC_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {TOPIC_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, DbTopic>(&query)
            .bind(topic.id.as_uuid())
            .bind(&topic.name)
            .bind(&topic.cluster)
            .bind(count_to_db(topic.partitions)?)
            .bind(count_to_db(topic.replicas)?)
            .bind(topic.status.as_str())
            .bind(&topic.requested_by)
            .bind(&topic.approved_by)
            .bind(topic.created_at)
            .bind(topic.approved_at)
            .fetch_one(&self.pool)
            .await;
        let row = match inserted {
            Ok(row) => row,
            Err(err) if is_unique_violation(&err) => {
                return Err(StoreError::Conflict(format!(
                    "topic {} already exists",
                    topic.name
                )));
            }
            Err(err) => return Err(err.into()),
        };
        metrics::counter!("governance_topic_changes_total", "op" => "proposed").increment(1);
        self.spawn_count_refresh();
        topic_from_db(row)
    }

    async fn list_topics(&self) -> StoreResult<Vec<Topic>> {
        let query = format!("SELECT {TOPIC_COLUMNS} FROM topics ORDER BY seq");
        let rows = sqlx::query_as::<_, DbTopic>(&query)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(topic_from_db).collect()
    }

    async fn get_topic(&self, name: &str) -> StoreResult<Topic> {
        let query = format!("SELECT {TOPIC_COLUMNS} FROM topics WHERE name = $1");
        let row = sqlx::query_as::<_, DbTopic>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => topic_from_db(row),
            None => Err(StoreError::NotFound(format!("topic {name}"))),
        }
    }

    async fn approve_topic(
        &self,
        name: &str,
        approved_by: &str,
        approved_at: DateTime<Utc>,
    ) -> StoreResult<Topic> {
        let query = format!(
            "UPDATE topics SET status = 'APPROVED', approved_by = $2, approved_at = $3 \
             WHERE name = $1 AND status = 'PENDING' RETURNING {TOPIC_COLUMNS}"
        );
        let row = sqlx::query_as::<_, DbTopic>(&query)
            .bind(name)
            .bind(approved_by)
            .bind(approved_at)
            .fetch_optional(&self.pool)
            .await?;
        if let Some(row) = row {
            metrics::counter!("governance_topic_changes_total", "op" => "approved").increment(1);
            return topic_from_db(row);
        }
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM topics WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        if exists {
            Err(StoreError::InvalidState(format!(
                "topic {name} is already approved"
            )))
        } else {
            Err(StoreError::NotFound(format!("topic {name}")))
        }
    }

    async fn insert_policy(&self, policy: Policy) -> StoreResult<Policy> {
        let query = format!(
            "INSERT INTO policies ({POLICY_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {POLICY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, DbPolicy>(&query)
            .bind(policy.id.as_uuid())
            .bind(&policy.principal)
            .bind(&policy.action)
            .bind(&policy.resource)
            .bind(policy.effect.as_str())
            .bind(policy.created_at)
            .fetch_one(&self.pool)
            .await?;
        self.spawn_count_refresh();
        policy_from_db(row)
    }

    async fn list_policies(&self) -> StoreResult<Vec<Policy>> {
        let query = format!("SELECT {POLICY_COLUMNS} FROM policies ORDER BY seq");
        let rows = sqlx::query_as::<_, DbPolicy>(&query)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(policy_from_db).collect()
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        return db_err.code().map(|code| code == "23505").unwrap_or(false);
    }
    false
}

fn count_to_db(value: u32) -> StoreResult<i32> {
    i32::try_from(value).map_err(|_| StoreError::Unexpected(anyhow!("count out of range: {value}")))
}

fn count_from_db(value: i32, column: &str) -> StoreResult<u32> {
    u32::try_from(value)
        .map_err(|_| StoreError::Unexpected(anyhow!("negative {column} in storage: {value}")))
}

fn topic_from_db(row: DbTopic) -> StoreResult<Topic> {
    let status = TopicStatus::parse(&row.status)
        .ok_or_else(|| StoreError::Unexpected(anyhow!("unknown topic status: {}", row.status)))?;
    Ok(Topic {
        id: TopicId::from_uuid(row.id),
        name: row.name,
        cluster: row.cluster,
        partitions: count_from_db(row.partitions, "partitions")?,
        replicas: count_from_db(row.replicas, "replicas")?,
        status,
        requested_by: row.requested_by,
        approved_by: row.approved_by,
        created_at: row.created_at,
        approved_at: row.approved_at,
    })
}

fn policy_from_db(row: DbPolicy) -> StoreResult<Policy> {
    let effect = Effect::parse(&row.effect).map_err(|err| StoreError::Unexpected(err.into()))?;
    Ok(Policy {
        id: PolicyId::from_uuid(row.id),
        principal: row.principal,
        action: row.action,
        resource: row.resource,
        effect,
        created_at: row.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_topic(status: &str) -> DbTopic {
        DbTopic {
            id: Uuid::new_v4(),
            name: "orders.created".to_string(),
            cluster: "prod".to_string(),
            partitions: 3,
            replicas: 2,
            status: status.to_string(),
            requested_by: "alice".to_string(),
            approved_by: None,
            created_at: Utc::now(),
            approved_at: None,
        }
    }

    #[test]
    fn unique_violation_detects_only_db_codes() {
        let err = sqlx::Error::RowNotFound;
        assert!(!is_unique_violation(&err));
    }

    #[test]
    fn topic_from_db_maps_fields() {
        let row = db_topic("PENDING");
        let id = row.id;
        let topic = topic_from_db(row).expect("topic");
        assert_eq!(topic.id.as_uuid(), id);
        assert_eq!(topic.status, TopicStatus::Pending);
        assert_eq!(topic.partitions, 3);
        assert_eq!(topic.replicas, 2);
        assert_eq!(topic.requested_by, "alice");
    }

    #[test]
    fn topic_from_db_rejects_unknown_status_and_negative_counts() {
        assert!(topic_from_db(db_topic("REJECTED")).is_err());
        let mut row = db_topic("PENDING");
        row.partitions = -1;
        assert!(topic_from_db(row).is_err());
    }

    fn unreachable_pool() -> PgPool {
        let options = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("governance")
            .database("governance");
        PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy_with(options)
    }

    #[tokio::test]
    async fn count_refresh_swallows_database_errors() {
        let pool = unreachable_pool();
        assert!(count_rows(&pool).await.is_err());
        tokio::time::timeout(Duration::from_secs(5), refresh_counts(pool))
            .await
            .expect("refresh should give up on its own");
    }

    #[test]
    fn count_to_db_rejects_overflow() {
        assert_eq!(count_to_db(12).expect("fits"), 12);
        assert!(count_to_db(u32::MAX).is_err());
    }

    #[test]
    fn policy_from_db_rejects_non_canonical_effect() {
        let row = DbPolicy {
            id: Uuid::new_v4(),
            principal: "alice".to_string(),
            action: "CreateTopic".to_string(),
            resource: "*".to_string(),
            effect: "allow".to_string(),
            created_at: Utc::now(),
        };
        assert!(policy_from_db(row.clone()).is_err());
        let ok = policy_from_db(DbPolicy {
            effect: "forbid".to_string(),
            ..row
        })
        .expect("policy");
        assert_eq!(ok.effect, Effect::Forbid);
    }
}
