//! Blob store abstraction trait
//!
//! This module defines the BlobStore trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    /// The requested byte range lies outside an object of `size` bytes.
    #[error("Range not satisfiable for object of {size} bytes")]
    RangeNotSatisfiable { size: u64 },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// One entry of a prefix listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobObject {
    /// Unique storage key, e.g. `albums/WE BOW/1. Ready.mp3`.
    pub pathname: String,
    /// Retrieval URL for the object.
    pub url: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// Bytes returned by a fetch, plus the framing headers the upstream reported.
#[derive(Debug, Clone)]
pub struct FetchedObject {
    /// Upstream status: 200 for a full body, 206 for a partial one.
    pub status: u16,
    pub body: Bytes,
    pub content_range: Option<String>,
    /// Upstream `Content-Length`, relayed for partial responses.
    pub content_length: Option<u64>,
}

impl FetchedObject {
    pub fn is_partial(&self) -> bool {
        self.status == 206
    }
}

/// Read-only blob store
///
/// Albums are uploaded out of band; this service only lists prefixes and reads
/// objects. Implementations must not filter the listing: every object whose key
/// starts with the prefix is returned, in the order the backend reports them.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// List every object whose key starts with `prefix`.
    ///
    /// The prefix is used verbatim. An empty listing is `Ok(vec![])`.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<BlobObject>>;

    /// Fetch an object, optionally forwarding a raw HTTP `Range` header value.
    async fn fetch(&self, object: &BlobObject, range: Option<&str>)
        -> StorageResult<FetchedObject>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
