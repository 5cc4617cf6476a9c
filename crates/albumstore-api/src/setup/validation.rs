//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use albumstore_core::{Config, StorageBackend};
use anyhow::Result;

/// Validate critical configuration values
///
/// Runs the config's own checks, then the ones that only matter once the
/// process is about to serve traffic.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    // Validate CORS configuration in production
    if is_production && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    if is_production && config.stripe_secret_key().starts_with("sk_test_") {
        tracing::warn!("Production mode is using a Stripe test key - purchases will not be charged");
    }

    if is_production && config.storage_backend() == StorageBackend::Local {
        tracing::warn!("Production mode is serving audio from the local filesystem backend");
    }

    if !config.public_base_url().starts_with("http://")
        && !config.public_base_url().starts_with("https://")
    {
        return Err(anyhow::anyhow!(
            "PUBLIC_BASE_URL must be an absolute http(s) URL, got '{}'",
            config.public_base_url()
        ));
    }

    if config.http_concurrency_limit() == 0 {
        return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT cannot be 0"));
    }

    if config.upstream_timeout_secs() == 0 {
        return Err(anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS cannot be 0"));
    }

    Ok(())
}
