//! Health check handlers and response types.

use crate::constants::HEALTH_CHECK_TIMEOUT_SECS;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub storage: String,
    pub storage_backend: String,
    pub albums: usize,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Storage probe: listing the preview prefix proves credentials and reachability.
async fn check_storage(state: &AppState) -> String {
    let store = state.store.clone();
    let prefix = state.preview_prefix().to_string();
    run_check(
        Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS),
        async move { store.list(&prefix).await.map(drop) },
        "unhealthy",
    )
    .await
}

/// Readiness probe - the blob store answers listings.
///
/// Stripe is not probed: it has no cheap read-only endpoint and a verification
/// failure already surfaces per request.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let storage = check_storage(&state).await;
    let ready = storage == "healthy";

    if !ready {
        tracing::error!(storage = %storage, "Storage readiness check failed");
    }

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "storage": storage,
        })),
    )
}

/// Full health check with configuration summary.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let storage = check_storage(&state).await;
    let healthy = storage == "healthy";

    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        storage,
        storage_backend: state.store.backend_type().to_string(),
        albums: state.config.catalog().len(),
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
