#[cfg(feature = "storage-local")]
use crate::LocalBlobStore;
#[cfg(feature = "storage-vercel")]
use crate::VercelBlobStore;
use crate::{BlobStore, StorageBackend, StorageError, StorageResult};
use albumstore_core::Config;
use std::sync::Arc;

/// Create a blob store based on configuration
pub async fn create_blob_store(config: &Config) -> StorageResult<Arc<dyn BlobStore>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-vercel")]
        StorageBackend::Vercel => {
            let token = config
                .blob_read_write_token()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("BLOB_READ_WRITE_TOKEN not configured".to_string())
                })?;
            let timeout = std::time::Duration::from_secs(config.upstream_timeout_secs());

            let store = VercelBlobStore::new(config.blob_api_url(), token, timeout)?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-vercel"))]
        StorageBackend::Vercel => Err(StorageError::ConfigError(
            "Vercel blob backend not available (storage-vercel feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config
                .local_storage_path()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
                })?;
            let base_url = config
                .local_storage_base_url()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
                })?;

            let store = LocalBlobStore::new(base_path, base_url).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
