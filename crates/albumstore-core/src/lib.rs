//! Albumstore Core Library
//!
//! This crate provides core domain models, error types, configuration, the album
//! catalog and the track helpers that are shared across all Albumstore components.

pub mod audio;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod sanitize;
pub mod storage_types;

// Re-export commonly used types
pub use catalog::{AlbumCatalog, CatalogEntry};
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    Entitlement, PaymentSession, PaymentStatus, SessionMetadata, Track, UNNUMBERED_TRACK,
};
pub use sanitize::sanitize_track_name;
pub use storage_types::StorageBackend;
