//! Albumstore Storage Library
//!
//! This crate provides the read-only blob store abstraction used to deliver
//! purchased audio. It includes the `BlobStore` trait and implementations for
//! Vercel Blob and the local filesystem.
//!
//! # Storage key format
//!
//! Keys are `/`-separated paths such as `albums/WE BOW/1. Ready.mp3`. The store is
//! only ever listed by prefix and read; uploads happen out of band.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-local")]
pub(crate) mod range;
pub mod traits;
#[cfg(feature = "storage-vercel")]
pub mod vercel;

// Re-export commonly used types
pub use albumstore_core::StorageBackend;
pub use factory::create_blob_store;
#[cfg(feature = "storage-local")]
pub use local::LocalBlobStore;
pub use traits::{BlobObject, BlobStore, FetchedObject, StorageError, StorageResult};
#[cfg(feature = "storage-vercel")]
pub use vercel::VercelBlobStore;
