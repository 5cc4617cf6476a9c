//! Route configuration and setup.
//!
//! Storefront routes live here; health checks in [health](health).

mod health;

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use albumstore_core::Config;
use albumstore_infra::{
    get_request_id, request_id_middleware, security_headers_middleware, SecurityHeadersConfig,
};
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, Request},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Largest accepted JSON body; checkout requests are a few dozen bytes.
const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = get_request_id(request).unwrap_or_default();
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
            request_id = %request_id,
        )
    });

    let security_headers_config = SecurityHeadersConfig {
        hsts: config.is_production(),
    };

    let http_concurrency_limit = config.http_concurrency_limit().max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = store_routes()
        .merge(health_routes())
        .route(
            &format!("{}/openapi.json", API_PREFIX),
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .with_state(state)
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(cors)
        .layer(trace_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn_with_state(
            security_headers_config,
            security_headers_middleware,
        ));

    Ok(app)
}

fn store_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/checkout", API_PREFIX),
            post(handlers::checkout::create_checkout),
        )
        .route(
            &format!("{}/tracks", API_PREFIX),
            get(handlers::tracks::list_tracks),
        )
        .route(
            &format!("{}/preview", API_PREFIX),
            get(handlers::preview::preview_track),
        )
        .route(
            &format!("{}/download", API_PREFIX),
            get(handlers::download::download_track),
        )
        .route(
            &format!("{}/download-zip", API_PREFIX),
            get(handlers::download_zip::download_zip),
        )
}

fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let exposed = [
        header::CONTENT_DISPOSITION,
        header::CONTENT_RANGE,
        header::ACCEPT_RANGES,
        header::CONTENT_LENGTH,
    ];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
            .expose_headers(exposed)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
            .expose_headers(exposed)
    };
    Ok(cors)
}
