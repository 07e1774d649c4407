#![cfg(feature = "pg-tests")]

use chrono::Utc;
use governance::config::PostgresConfig;
use governance::model::{Policy, Topic, TopicStatus};
use governance::store::postgres::PostgresStore;
use governance::store::{GovernanceStore, StoreError};
use governance_authz::Effect;
use governance_common::ids::PolicyId;
use serial_test::serial;
use std::sync::Arc;

async fn pg_store() -> Option<Arc<PostgresStore>> {
    let url = match std::env::var("GOVERNANCE_TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("skipping pg-tests: set GOVERNANCE_TEST_DATABASE_URL or DATABASE_URL");
            return None;
        }
    };
    let config = PostgresConfig {
        url,
        max_connections: 8,
        connect_timeout_ms: 5_000,
        acquire_timeout_ms: 5_000,
    };
    let store = match PostgresStore::connect(&config).await {
        Ok(store) => store,
        Err(err) => {
            eprintln!("skipping pg-tests: cannot connect to postgres: {err}");
            return None;
        }
    };
    sqlx::query("TRUNCATE topics, policies RESTART IDENTITY")
        .execute(store.pool())
        .await
        .expect("truncate");
    Some(Arc::new(store))
}

fn topic(name: &str) -> Topic {
    Topic::pending(
        name.to_string(),
        "prod".to_string(),
        3,
        2,
        "alice".to_string(),
        Utc::now(),
    )
}

#[tokio::test]
#[serial]
async fn topic_lifecycle_round_trips() {
    let Some(store) = pg_store().await else {
        return;
    };
    let created = store.insert_topic(topic("orders.created")).await.expect("insert");
    assert_eq!(created.status, TopicStatus::Pending);
    assert_eq!(store.get_topic("orders.created").await.expect("get"), created);

    let approved = store
        .approve_topic("orders.created", "bob", Utc::now())
        .await
        .expect("approve");
    assert_eq!(approved.id, created.id);
    assert_eq!(approved.approved_by.as_deref(), Some("bob"));
    assert!(approved.approved_at.is_some());

    let err = store
        .approve_topic("orders.created", "carol", Utc::now())
        .await
        .expect_err("second approval");
    assert!(matches!(err, StoreError::InvalidState(_)));

    let err = store
        .approve_topic("ghost", "bob", Utc::now())
        .await
        .expect_err("missing");
    assert!(matches!(err, StoreError::NotFound(_)));

    assert!(store.is_durable());
    store.health_check().await.expect("healthy");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn concurrent_same_name_inserts_admit_exactly_one() {
    let Some(store) = pg_store().await else {
        return;
    };
    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.insert_topic(topic("dup.topic")).await
        }));
    }
    let mut ok = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("join") {
            Ok(_) => ok += 1,
            Err(StoreError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!((ok, conflicts), (1, 7));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn concurrent_approvals_admit_exactly_one() {
    let Some(store) = pg_store().await else {
        return;
    };
    store.insert_topic(topic("race.topic")).await.expect("insert");
    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .approve_topic("race.topic", &format!("approver-{i}"), Utc::now())
                .await
        }));
    }
    let mut ok = 0;
    for handle in handles {
        match handle.await.expect("join") {
            Ok(_) => ok += 1,
            Err(StoreError::InvalidState(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(ok, 1);
}

#[tokio::test]
#[serial]
async fn policies_list_in_insertion_order() {
    let Some(store) = pg_store().await else {
        return;
    };
    for (principal, effect) in [("alice", Effect::Permit), ("bob", Effect::Forbid)] {
        store
            .insert_policy(Policy {
                id: PolicyId::generate(),
                principal: principal.to_string(),
                action: "CreateTopic".to_string(),
                resource: "*".to_string(),
                effect,
                created_at: Utc::now(),
            })
            .await
            .expect("insert");
    }
    let policies = store.list_policies().await.expect("list");
    let principals: Vec<_> = policies.iter().map(|p| p.principal.as_str()).collect();
    assert_eq!(principals, vec!["alice", "bob"]);
    assert_eq!(policies[1].effect, Effect::Forbid);
}
