//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};

use api::routes::views::AppState;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use document_store::InMemoryDocumentStore;
use metrics_exporter_prometheus::PrometheusHandle;
use projections::{HrApp, WritePolicy};
use serde_json::{Value, json};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

/// Router over a store seeded with the demo data and an initialized app.
async fn setup() -> axum::Router {
    let store = InMemoryDocumentStore::new();
    api::seed::seed_demo_data(&store).await.unwrap();
    let state = api::create_state(store, WritePolicy::AbortOnFailure)
        .await
        .unwrap();
    api::create_app(state, get_metrics_handle())
}

/// Router over an app that has not been initialized.
fn setup_uninitialized() -> axum::Router {
    let state = Arc::new(AppState::new(HrApp::new(InMemoryDocumentStore::new())));
    api::create_app(state, get_metrics_handle())
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn post_json(app: axum::Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_health_check_reports_readiness() {
    let (status, body) = get(setup().await, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "ready": true}));

    let (status, body) = get(setup_uninitialized(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], json!(false));
}

#[tokio::test]
async fn test_employees_with_city() {
    let (status, body) = get(setup().await, "/views/employees-with-city").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"firstName": "Name 1", "city": "Алматы"},
            {"firstName": "Name 1", "city": "Алматы"},
        ])
    );
}

#[tokio::test]
async fn test_employees_with_position() {
    let (status, body) = get(setup().await, "/views/employees-with-position").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        json!({"firstName": "Name 1", "position": "Разработчик", "division": "Дирекция"})
    );
}

#[tokio::test]
async fn test_views_unavailable_before_initialization() {
    let (status, body) = get(setup_uninitialized(), "/views/employees-with-city").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("not initialized"));
}

#[tokio::test]
async fn test_update_is_accepted() {
    let payload = json!({"entity": "city", "data": {"id": "c1", "name": "Alma-Ata"}});

    let (status, body) = post_json(setup().await, "/entities", payload.to_string()).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, json!({"status": "accepted", "entity": "city"}));
}

#[tokio::test]
async fn test_update_does_not_change_views() {
    let app = setup().await;
    let payload = json!({"entity": "city", "data": {"id": "3ba648aa-4498-43da-b29f-b83f37a25429", "name": "Alma-Ata"}});

    let (status, _) = post_json(app.clone(), "/entities", payload.to_string()).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (_, body) = get(app, "/views/employees-with-city").await;
    assert_eq!(body[0]["city"], json!("Алматы"));
}

#[tokio::test]
async fn test_update_rejects_unknown_entity() {
    let payload = json!({"entity": "employeeWithCity_view", "data": {}});

    let (status, body) = post_json(setup().await, "/entities", payload.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_update_rejects_malformed_json() {
    let (status, _) = post_json(setup().await, "/entities", "{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("text/plain"));
}
