mod common;
mod http_helpers;

use axum::http::StatusCode;
use common::{memory_app, read_json};
use governance::auth::StaticOracle;
use governance::model::PolicyDraft;
use governance_authz::Effect;
use http_helpers::{get_request, json_request, json_request_as};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

fn orders_created() -> serde_json::Value {
    json!({
        "name": "orders.created",
        "cluster": "prod",
        "partitions": 3,
        "replicas": 2,
        "requestedBy": "alice"
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = memory_app(None, false);
    let response = app
        .oneshot(get_request("/api/v1/health"))
        .await
        .expect("health");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["oracle"], "local");
}

#[tokio::test]
async fn topic_lifecycle_smoke() {
    let (app, _) = memory_app(None, false);

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/topics"))
        .await
        .expect("list");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({"items": []}));

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/topics", orders_created()))
        .await
        .expect("propose");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    assert_eq!(created["name"], "orders.created");
    assert_eq!(created["cluster"], "prod");
    assert_eq!(created["partitions"], 3);
    assert_eq!(created["replicas"], 2);
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["requestedBy"], "alice");
    assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(created.get("approvedBy").is_none());

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/topics/orders.created"))
        .await
        .expect("get");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, created);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/topics/orders.created/approve",
            json!({"approvedBy": "bob"}),
        ))
        .await
        .expect("approve");
    assert_eq!(response.status(), StatusCode::OK);
    let approved = read_json(response).await;
    assert_eq!(approved["status"], "APPROVED");
    assert_eq!(approved["approvedBy"], "bob");
    assert!(approved["approvedAt"].is_string());
    assert_eq!(approved["id"], created["id"]);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/topics/orders.created/approve",
            json!({"approvedBy": "carol"}),
        ))
        .await
        .expect("approve again");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(read_json(response).await["code"], "already_approved");

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/topics"))
        .await
        .expect("list");
    let listed = read_json(response).await;
    assert_eq!(listed["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(listed["items"][0]["approvedBy"], "bob");
}

#[tokio::test]
async fn concurrent_duplicate_proposals_yield_one_conflict() {
    let (app, _) = memory_app(None, false);
    let body = json!({
        "name": "dup.topic",
        "cluster": "prod",
        "partitions": 1,
        "replicas": 1,
        "requestedBy": "alice"
    });
    let (first, second) = tokio::join!(
        app.clone()
            .oneshot(json_request("POST", "/api/v1/topics", body.clone())),
        app.clone()
            .oneshot(json_request("POST", "/api/v1/topics", body.clone())),
    );
    let mut statuses = vec![
        first.expect("first").status(),
        second.expect("second").status(),
    ];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);

    let response = app
        .oneshot(get_request("/api/v1/topics"))
        .await
        .expect("list");
    assert_eq!(
        read_json(response).await["items"].as_array().map(Vec::len),
        Some(1)
    );
}

#[tokio::test]
async fn invalid_proposals_are_rejected() {
    let (app, _) = memory_app(None, false);
    for body in [
        json!({"name": "", "cluster": "prod", "partitions": 1, "replicas": 1, "requestedBy": "a"}),
        json!({"name": "t", "cluster": "prod", "partitions": 0, "replicas": 1, "requestedBy": "a"}),
        json!({"name": "t", "cluster": "prod", "partitions": 1, "replicas": -2, "requestedBy": "a"}),
        json!({"name": "t", "cluster": "prod", "partitions": 1}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/v1/topics", body.clone()))
            .await
            .expect("propose");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(read_json(response).await["code"], "validation_error");
    }
}

#[tokio::test]
async fn missing_topic_is_not_found() {
    let (app, _) = memory_app(None, false);
    let response = app
        .clone()
        .oneshot(get_request("/api/v1/topics/ghost"))
        .await
        .expect("get");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/topics/ghost/approve",
            json!({"approvedBy": "bob"}),
        ))
        .await
        .expect("approve");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["code"], "not_found");
}

#[tokio::test]
async fn policy_creation_requires_principal_and_permit() {
    let (app, service) = memory_app(None, false);
    let policy = json!({
        "principal": "alice",
        "action": "CreateTopic",
        "resource": "orders.*",
        "effect": "permit"
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/policies", policy.clone()))
        .await
        .expect("no principal");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(json_request_as(
            "admin",
            "POST",
            "/api/v1/policies",
            policy.clone(),
        ))
        .await
        .expect("no policies yet");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(read_json(response).await["code"], "forbidden");

    service
        .seed_policies(&[PolicyDraft {
            principal: "admin".to_string(),
            action: "*".to_string(),
            resource: "*".to_string(),
            effect: "permit".to_string(),
        }])
        .await
        .expect("seed");

    let response = app
        .clone()
        .oneshot(json_request_as(
            "admin",
            "POST",
            "/api/v1/policies",
            policy.clone(),
        ))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    assert_eq!(created["principal"], "alice");
    assert_eq!(created["effect"], "permit");
    assert!(created["createdAt"].is_string());

    let response = app
        .clone()
        .oneshot(json_request_as(
            "mallory",
            "POST",
            "/api/v1/policies",
            json!({
                "principal": "mallory",
                "action": "*",
                "resource": "*",
                "effect": "permit"
            }),
        ))
        .await
        .expect("mallory");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(get_request("/api/v1/policies"))
        .await
        .expect("list");
    let listed = read_json(response).await;
    assert_eq!(listed["items"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn invalid_policy_effect_is_a_validation_error() {
    let (app, _) = memory_app(Some(Arc::new(StaticOracle(Effect::Permit))), false);
    let response = app
        .oneshot(json_request_as(
            "admin",
            "POST",
            "/api/v1/policies",
            json!({
                "principal": "alice",
                "action": "CreateTopic",
                "resource": "*",
                "effect": "allow"
            }),
        ))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["code"], "validation_error");
}

#[tokio::test]
async fn gated_topics_require_permits() {
    let (app, service) = memory_app(None, true);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/topics", orders_created()))
        .await
        .expect("propose");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    service
        .seed_policies(&[PolicyDraft {
            principal: "alice".to_string(),
            action: "CreateTopic".to_string(),
            resource: "orders.*".to_string(),
            effect: "permit".to_string(),
        }])
        .await
        .expect("seed");

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/topics", orders_created()))
        .await
        .expect("propose");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/topics/orders.created/approve",
            json!({"approvedBy": "bob"}),
        ))
        .await
        .expect("approve");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (app, _) = memory_app(None, false);
    let response = app
        .oneshot(get_request("/api/v1/openapi.json"))
        .await
        .expect("openapi");
    assert_eq!(response.status(), StatusCode::OK);
    let doc = read_json(response).await;
    assert!(doc["paths"]["/api/v1/topics"].is_object());
}

#[tokio::test]
async fn policy_resources_are_matched_as_globs() {
    let (app, service) = memory_app(None, false);
    service
        .seed_policies(&[PolicyDraft {
            principal: "admin".to_string(),
            action: "*".to_string(),
            resource: "orders.*".to_string(),
            effect: "permit".to_string(),
        }])
        .await
        .expect("seed");

    for (resource, expected) in [
        ("order€xx", StatusCode::FORBIDDEN),
        ("payments.*", StatusCode::FORBIDDEN),
        ("orders.zürich", StatusCode::CREATED),
    ] {
        let response = app
            .clone()
            .oneshot(json_request_as(
                "admin",
                "POST",
                "/api/v1/policies",
                json!({
                    "principal": "alice",
                    "action": "CreateTopic",
                    "resource": resource,
                    "effect": "permit"
                }),
            ))
            .await
            .expect("create");
        assert_eq!(response.status(), expected, "resource {resource}");
    }
}
