//! Whole-album zip bundling.
//!
//! Every track is fetched in full and held in memory before the archive is
//! written, so peak memory is roughly twice the album size. Fine for a single
//! album of audio; the ceiling to revisit if albums grow large.

use crate::entitlement::blob_for;
use crate::error::from_storage;
use albumstore_core::models::Entitlement;
use albumstore_core::sanitize::{is_addressable, sanitize_track_name};
use albumstore_core::AppError;
use albumstore_storage::BlobStore;
use anyhow::Context;
use bytes::Bytes;
use futures::{FutureExt, StreamExt, TryStreamExt};
use std::io::Write;
use std::sync::Arc;

/// Deflate level used for archive entries.
const ZIP_COMPRESSION_LEVEL: i32 = 5;
const FALLBACK_ARCHIVE_TITLE: &str = "Album";

/// A finished archive ready to be sent.
#[derive(Debug, Clone)]
pub struct AlbumArchive {
    pub filename: String,
    pub data: Vec<u8>,
    pub entries: usize,
}

#[derive(Clone)]
pub struct ArchiveBundler {
    store: Arc<dyn BlobStore>,
    artist_name: String,
    fetch_concurrency: usize,
}

/// Sanitize filename for archive entry to prevent path traversal.
fn archive_entry_name(file_name: &str, index: usize) -> String {
    let name = sanitize_track_name(file_name);
    if is_addressable(&name) {
        name
    } else {
        format!("track_{}", index + 1)
    }
}

/// `"{title} - {artist}.zip"` with the title reduced to ASCII letters, digits and spaces.
pub fn zip_filename(album_title: &str, artist_name: &str) -> String {
    let cleaned: String = album_title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    let title = match cleaned.trim() {
        "" => FALLBACK_ARCHIVE_TITLE,
        t => t,
    };
    format!("{} - {}.zip", title, artist_name)
}

/// Write `(entry name, bytes)` pairs into an in-memory zip, in order.
fn write_zip(entries: Vec<(String, Bytes)>) -> anyhow::Result<Vec<u8>> {
    use zip::write::{FileOptions, ZipWriter};
    use zip::CompressionMethod;

    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(std::io::Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(ZIP_COMPRESSION_LEVEL))
            .unix_permissions(0o644);

        for (name, data) in entries {
            zip.start_file(name.as_str(), options)
                .with_context(|| format!("Failed to add file to ZIP: {}", name))?;
            zip.write_all(&data)
                .with_context(|| format!("Failed to write file data to ZIP: {}", name))?;
        }

        zip.finish().context("Failed to finalize ZIP archive")?;
    }

    Ok(buffer)
}

impl ArchiveBundler {
    pub fn new(
        store: Arc<dyn BlobStore>,
        artist_name: impl Into<String>,
        fetch_concurrency: usize,
    ) -> Self {
        Self {
            store,
            artist_name: artist_name.into(),
            fetch_concurrency: fetch_concurrency.max(1),
        }
    }

    /// Bundle every entitled track into one zip, in track order.
    ///
    /// Any failed fetch aborts the whole archive.
    #[tracing::instrument(skip(self, entitlement), fields(prefix = %entitlement.download_prefix, tracks = entitlement.tracks.len()))]
    pub async fn bundle(&self, entitlement: &Entitlement) -> Result<AlbumArchive, AppError> {
        if entitlement.is_empty() {
            return Err(AppError::NoAssetsAvailable);
        }

        let start = std::time::Instant::now();

        // Boxed as `Send` here so the auto-trait is proven with concrete
        // lifetimes (works around rustc's higher-ranked closure inference).
        let fetch_all: futures::future::BoxFuture<'_, Result<Vec<(String, Bytes)>, AppError>> = futures::stream::iter(
            entitlement.tracks.iter().enumerate(),
        )
        .map(|(index, track)| async move {
            let fetched = self
                .store
                .fetch(&blob_for(track), None)
                .await
                .map_err(|e| {
                    tracing::error!(track = %track.pathname, error = %e, "Failed to fetch track for archive");
                    from_storage(e)
                })?;
            Ok::<_, AppError>((archive_entry_name(&track.file_name, index), fetched.body))
        })
        .buffered(self.fetch_concurrency)
        .try_collect()
        .boxed();
        let entries: Vec<(String, Bytes)> = fetch_all.await?;

        let fetched_bytes: usize = entries.iter().map(|(_, data)| data.len()).sum();
        let count = entries.len();

        let data = tokio::task::spawn_blocking(move || write_zip(entries))
            .await
            .map_err(|e| AppError::Internal(format!("Archive task failed: {}", e)))??;

        tracing::info!(
            entries = count,
            fetched_bytes,
            archive_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Album archive built"
        );

        Ok(AlbumArchive {
            filename: zip_filename(&entitlement.album_title, &self.artist_name),
            data,
            entries: count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entitlement::EntitlementResolver;
    use crate::test_support::{FakePayments, FakeStore};
    use std::io::Read;

    async fn entitlement_for(store: Arc<FakeStore>, prefix: &str) -> Entitlement {
        EntitlementResolver::new(Arc::new(FakePayments::default()), store)
            .resolve_listing(prefix, "WE BOW")
            .await
            .unwrap()
    }

    #[test]
    fn test_zip_filename() {
        assert_eq!(zip_filename("WE BOW!", "YermiYahu"), "WE BOW - YermiYahu.zip");
        assert_eq!(zip_filename("  Shalom/Peace  ", "YermiYahu"), "ShalomPeace - YermiYahu.zip");
        assert_eq!(zip_filename("!!!", "YermiYahu"), "Album - YermiYahu.zip");
        assert_eq!(zip_filename("Été", "X"), "t - X.zip");
    }

    #[test]
    fn test_archive_entry_name() {
        assert_eq!(archive_entry_name("1. Ready.mp3", 0), "1. Ready.mp3");
        assert_eq!(archive_entry_name("..\\..\\evil.mp3", 0), "evil.mp3");
        assert_eq!(archive_entry_name("..", 2), "track_3");
    }

    #[tokio::test]
    async fn test_bundle_in_track_order() {
        let store = Arc::new(
            FakeStore::default()
                .with("albums/WE BOW/10. Ten.mp3", b"ten")
                .with("albums/WE BOW/1. One.mp3", b"one")
                .with("albums/WE BOW/cover.jpg", b"jpg")
                .with("albums/WE BOW/2. Two.wav", b"two"),
        );
        let entitlement = entitlement_for(store.clone(), "albums/WE BOW").await;

        let archive = ArchiveBundler::new(store, "YermiYahu", 2)
            .bundle(&entitlement)
            .await
            .unwrap();

        assert_eq!(archive.filename, "WE BOW - YermiYahu.zip");
        assert_eq!(archive.entries, 3);

        let mut zip = zip::ZipArchive::new(std::io::Cursor::new(archive.data)).unwrap();
        let names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["1. One.mp3", "2. Two.wav", "10. Ten.mp3"]);

        let mut content = String::new();
        zip.by_name("10. Ten.mp3")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "ten");
        assert_eq!(
            zip.by_index(0).unwrap().compression(),
            zip::CompressionMethod::Deflated
        );
    }

    #[tokio::test]
    async fn test_empty_entitlement_fetches_nothing() {
        let store = Arc::new(FakeStore::default().with("albums/WE BOW/cover.jpg", b"jpg"));
        let entitlement = entitlement_for(store.clone(), "albums/WE BOW").await;

        let err = ArchiveBundler::new(store.clone(), "YermiYahu", 4)
            .bundle(&entitlement)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NoAssetsAvailable));
        assert_eq!(store.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_aborts_archive() {
        let store = Arc::new(FakeStore {
            fail_fetch_for: Some("albums/WE BOW/2. Two.mp3".to_string()),
            ..FakeStore::default()
                .with("albums/WE BOW/1. One.mp3", b"one")
                .with("albums/WE BOW/2. Two.mp3", b"two")
        });
        let entitlement = entitlement_for(store.clone(), "albums/WE BOW").await;

        let err = ArchiveBundler::new(store, "YermiYahu", 1)
            .bundle(&entitlement)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
