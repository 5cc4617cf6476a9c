//! Health probe and middleware integration tests.
//!
//! Run with: `cargo test -p albumstore-api --test health_test`

mod helpers;

use axum::http::StatusCode;
use helpers::setup_test_app;
use serde_json::Value;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app().await;

    let response = app.client().get("/health/live").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_follows_storage() {
    let app = setup_test_app().await;

    let response = app.client().get("/health/ready").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");

    app.store.fail_listing.store(true, Ordering::SeqCst);
    let response = app.client().get("/health/ready").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["status"], "not_ready");
}

#[tokio::test]
async fn test_health_summary() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage_backend"], "local");
    assert_eq!(body["albums"], 1);
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let app = setup_test_app().await;

    let response = app.client().get("/health/live").await;

    assert!(response.headers().get("x-request-id").is_some());
    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.header("x-frame-options"), "DENY");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["paths"]["/api/download-zip"].is_object());
}
