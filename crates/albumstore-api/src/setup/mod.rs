//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use albumstore_core::Config;
use albumstore_infra::{init_telemetry, LogFormat};
use albumstore_payments::{PaymentProvider, StripeClient};
use albumstore_storage::create_blob_store;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    let log_format: LogFormat = config.log_format().parse().unwrap_or_default();
    init_telemetry(log_format).map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        storage_backend = %config.storage_backend(),
        albums = config.catalog().len(),
        "Configuration loaded and validated successfully"
    );

    let store = create_blob_store(&config).await.context("Failed to initialize blob store")?;

    let payments: Arc<dyn PaymentProvider> = Arc::new(
        StripeClient::new(
            config.stripe_api_base(),
            config.stripe_secret_key(),
            Duration::from_secs(config.upstream_timeout_secs()),
        )
        .context("Failed to initialize Stripe client")?,
    );

    let state = Arc::new(AppState::new(config.clone(), payments, store));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
