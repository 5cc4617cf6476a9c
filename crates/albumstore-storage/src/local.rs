use crate::range::{parse_range, RangeError};
use crate::traits::{BlobObject, BlobStore, FetchedObject, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Local filesystem blob store
///
/// Keys map onto paths below `base_path`; `/` in a key is a directory separator.
#[derive(Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
    base_url: String,
}

impl LocalBlobStore {
    /// Create a new LocalBlobStore instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory holding the album folders (e.g., "/var/lib/albumstore")
    /// * `base_url` - Base URL the files are served from (e.g., "http://localhost:3000/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalBlobStore {
            base_path,
            base_url,
        })
    }

    /// Convert a storage key to a filesystem path with security validation
    ///
    /// Rejects keys that could escape the base storage directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.split(['/', '\\']).any(|segment| segment == "..")
            || storage_key.starts_with('/')
            || storage_key.starts_with('\\')
        {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        let path = self.base_path.join(storage_key);

        let base_canonical = self.base_path.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
        })?;

        // Symlinks inside the tree must not lead out of it.
        if let Ok(canonical) = path.canonicalize() {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    /// Public URL for a key, with each segment percent-encoded.
    fn generate_url(&self, key: &str) -> String {
        let encoded: Vec<String> = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}", self.base_url.trim_end_matches('/'), encoded.join("/"))
    }

    fn relative_key(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.base_path).ok()?;
        let segments: Option<Vec<&str>> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect();
        Some(segments?.join("/"))
    }

    /// Directory to start walking from: the part of the prefix before its last `/`.
    fn walk_root(&self, prefix: &str) -> StorageResult<PathBuf> {
        match prefix.rfind('/') {
            Some(idx) => self.key_to_path(&prefix[..idx]),
            None => Ok(self.base_path.clone()),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn list(&self, prefix: &str) -> StorageResult<Vec<BlobObject>> {
        let start = std::time::Instant::now();
        let root = self.walk_root(prefix)?;

        if !fs::try_exists(&root).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut objects = Vec::new();
        let mut pending = vec![root];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await.map_err(|e| {
                StorageError::ListFailed(format!("Failed to read {}: {}", dir.display(), e))
            })?;

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(path);
                    continue;
                }
                if !file_type.is_file() {
                    continue;
                }

                let Some(key) = self.relative_key(&path) else {
                    tracing::warn!(path = %path.display(), "Skipping non UTF-8 path");
                    continue;
                };
                if !key.starts_with(prefix) {
                    continue;
                }

                let size = entry.metadata().await.ok().map(|m| m.len());
                objects.push(BlobObject {
                    url: self.generate_url(&key),
                    pathname: key,
                    size,
                });
            }
        }

        // Directory iteration order is unspecified; report keys the way blob stores do.
        objects.sort_by(|a, b| a.pathname.cmp(&b.pathname));

        tracing::debug!(
            prefix = %prefix,
            count = objects.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage listing complete"
        );

        Ok(objects)
    }

    async fn fetch(
        &self,
        object: &BlobObject,
        range: Option<&str>,
    ) -> StorageResult<FetchedObject> {
        let path = self.key_to_path(&object.pathname)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(object.pathname.clone()));
        }

        let start = std::time::Instant::now();

        let mut file = fs::File::open(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to open file {}: {}", path.display(), e))
        })?;
        let size = file.metadata().await?.len();

        let byte_range = match range.map(|value| parse_range(value, size)) {
            None | Some(Err(RangeError::Malformed)) => None,
            Some(Err(RangeError::Unsatisfiable)) => {
                return Err(StorageError::RangeNotSatisfiable { size });
            }
            Some(Ok(r)) => Some(r),
        };

        let (status, body, content_range) = match byte_range {
            Some(r) => {
                file.seek(SeekFrom::Start(r.start)).await?;
                let mut buf = Vec::with_capacity(r.len() as usize);
                file.take(r.len()).read_to_end(&mut buf).await.map_err(|e| {
                    StorageError::DownloadFailed(format!(
                        "Failed to read file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                (206, buf, Some(r.content_range(size)))
            }
            None => {
                let mut buf = Vec::with_capacity(size as usize);
                file.read_to_end(&mut buf).await.map_err(|e| {
                    StorageError::DownloadFailed(format!(
                        "Failed to read file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                (200, buf, None)
            }
        };

        tracing::info!(
            path = %path.display(),
            key = %object.pathname,
            status,
            size_bytes = body.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage fetch successful"
        );

        Ok(FetchedObject {
            status,
            content_length: Some(body.len() as u64),
            body: Bytes::from(body),
            content_range,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
