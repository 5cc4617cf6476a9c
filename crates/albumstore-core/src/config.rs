//! Configuration module
//!
//! This module provides configuration structures for the API and its upstream
//! collaborators: the Stripe account, the blob store and the album catalog.

use std::env;

use crate::catalog::{AlbumCatalog, DEFAULT_CATALOG};
use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 3000;
const UPSTREAM_TIMEOUT_SECS: u64 = 60;
const ARCHIVE_FETCH_CONCURRENCY: usize = 4;
const HTTP_CONCURRENCY_LIMIT: usize = 1000;
const STRIPE_API_BASE: &str = "https://api.stripe.com";
const BLOB_API_URL: &str = "https://blob.vercel-storage.com";
const PUBLIC_BASE_URL: &str = "http://localhost:3000";
const ARTIST_NAME: &str = "YermiYahu";
const PREVIEW_PREFIX: &str = "albums/WE BOW";

/// Process-level settings that do not depend on any upstream service
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
    /// `json` switches the log output to JSON lines
    pub log_format: String,
}

/// Storefront configuration
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub base: BaseConfig,
    // Payment provider
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    // Blob store
    pub storage_backend: StorageBackend,
    pub blob_read_write_token: Option<String>,
    pub blob_api_url: String,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub upstream_timeout_secs: u64,
    // Storefront
    pub public_base_url: String,
    pub artist_name: String,
    pub preview_prefix: String,
    pub catalog: AlbumCatalog,
    pub archive_fetch_concurrency: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<StoreConfig>);

impl Config {
    fn as_store(&self) -> &StoreConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_store().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = StoreConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_store().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_store().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_store().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_store().base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_store().base.http_concurrency_limit
    }

    pub fn log_format(&self) -> &str {
        &self.as_store().base.log_format
    }

    pub fn stripe_secret_key(&self) -> &str {
        &self.as_store().stripe_secret_key
    }

    pub fn stripe_api_base(&self) -> &str {
        &self.as_store().stripe_api_base
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_store().storage_backend
    }

    pub fn blob_read_write_token(&self) -> Option<&str> {
        self.as_store().blob_read_write_token.as_deref()
    }

    pub fn blob_api_url(&self) -> &str {
        &self.as_store().blob_api_url
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_store().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.as_store().local_storage_base_url.as_deref()
    }

    pub fn upstream_timeout_secs(&self) -> u64 {
        self.as_store().upstream_timeout_secs
    }

    pub fn public_base_url(&self) -> &str {
        &self.as_store().public_base_url
    }

    pub fn artist_name(&self) -> &str {
        &self.as_store().artist_name
    }

    pub fn preview_prefix(&self) -> &str {
        &self.as_store().preview_prefix
    }

    pub fn catalog(&self) -> &AlbumCatalog {
        &self.as_store().catalog
    }

    pub fn archive_fetch_concurrency(&self) -> usize {
        self.as_store().archive_fetch_concurrency
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "text".to_string())
                .to_lowercase(),
        };

        let storage_backend = match env::var("BLOB_BACKEND") {
            Ok(s) => s.parse()?,
            Err(_) => StorageBackend::Vercel,
        };

        let catalog = AlbumCatalog::parse(
            &env::var("ALBUM_CATALOG").unwrap_or_else(|_| DEFAULT_CATALOG.to_string()),
        )?;

        let config = StoreConfig {
            base,
            stripe_secret_key: env::var("STRIPE_SECRET_KEY")
                .map_err(|_| anyhow::anyhow!("STRIPE_SECRET_KEY is not configured"))?,
            stripe_api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| STRIPE_API_BASE.to_string()),
            storage_backend,
            blob_read_write_token: env::var("BLOB_READ_WRITE_TOKEN")
                .ok()
                .filter(|s| !s.is_empty()),
            blob_api_url: env::var("BLOB_API_URL").unwrap_or_else(|_| BLOB_API_URL.to_string()),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| UPSTREAM_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(UPSTREAM_TIMEOUT_SECS),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .or_else(|_| env::var("NEXT_PUBLIC_BASE_URL"))
                .unwrap_or_else(|_| PUBLIC_BASE_URL.to_string()),
            artist_name: env::var("ARTIST_NAME").unwrap_or_else(|_| ARTIST_NAME.to_string()),
            preview_prefix: env::var("PREVIEW_PREFIX")
                .unwrap_or_else(|_| PREVIEW_PREFIX.to_string()),
            catalog,
            archive_fetch_concurrency: env::var("ARCHIVE_FETCH_CONCURRENCY")
                .unwrap_or_else(|_| ARCHIVE_FETCH_CONCURRENCY.to_string())
                .parse()
                .unwrap_or(ARCHIVE_FETCH_CONCURRENCY),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.stripe_secret_key.trim().is_empty() {
            return Err(anyhow::anyhow!("STRIPE_SECRET_KEY is not configured"));
        }

        if self.archive_fetch_concurrency == 0 {
            return Err(anyhow::anyhow!(
                "ARCHIVE_FETCH_CONCURRENCY must be at least 1"
            ));
        }

        if self.preview_prefix.trim().is_empty() {
            return Err(anyhow::anyhow!("PREVIEW_PREFIX must not be empty"));
        }

        if self.catalog.is_empty() {
            return Err(anyhow::anyhow!("ALBUM_CATALOG must list at least one album"));
        }

        match self.storage_backend {
            StorageBackend::Vercel => {
                if self.blob_read_write_token.is_none() {
                    return Err(anyhow::anyhow!(
                        "BLOB_READ_WRITE_TOKEN must be set when using the Vercel blob backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
