//! Entitlement resolution
//!
//! Turns a checkout session id into the ordered list of tracks the buyer may
//! download. Payment is re-verified with the provider on every call and nothing
//! is cached, so a refunded or expired session stops working immediately.

use crate::error::{from_payment, from_storage};
use albumstore_core::audio;
use albumstore_core::models::{sort_tracks, storage_key_for, Entitlement, Track};
use albumstore_core::AppError;
use albumstore_payments::PaymentProvider;
use albumstore_storage::{BlobObject, BlobStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct EntitlementResolver {
    payments: Arc<dyn PaymentProvider>,
    store: Arc<dyn BlobStore>,
}

impl EntitlementResolver {
    pub fn new(payments: Arc<dyn PaymentProvider>, store: Arc<dyn BlobStore>) -> Self {
        Self { payments, store }
    }

    /// Verify the session and list the album it unlocks.
    ///
    /// The store is only consulted once the provider has confirmed payment.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, session_id: &str) -> Result<Entitlement, AppError> {
        if session_id.trim().is_empty() {
            return Err(AppError::MissingParameter("session_id".to_string()));
        }

        let session = self
            .payments
            .verify_session(session_id)
            .await
            .map_err(from_payment)?;

        if !session.paid {
            tracing::warn!(album = %session.album_title, "Download attempted on unpaid session");
            return Err(AppError::PaymentNotCompleted);
        }

        let prefix = session.download_prefix.ok_or_else(|| {
            tracing::warn!(album = %session.album_title, "Paid session carries no download path");
            AppError::NoEntitlement
        })?;

        self.resolve_listing(&prefix, &session.album_title).await
    }

    /// List the audio tracks stored directly under `prefix`, in delivery order.
    ///
    /// Shared with the ungated preview path, which has no session to verify.
    pub async fn resolve_listing(
        &self,
        prefix: &str,
        album_title: &str,
    ) -> Result<Entitlement, AppError> {
        let objects = self.store.list(prefix).await.map_err(from_storage)?;
        let listed = objects.len();

        let mut tracks: Vec<Track> = objects
            .into_iter()
            .filter(|object| is_entitled_track(prefix, object))
            .map(|object| Track::new(object.pathname, object.url, object.size))
            .collect();
        sort_tracks(&mut tracks);

        tracing::debug!(
            prefix = %prefix,
            listed,
            tracks = tracks.len(),
            "Resolved album listing"
        );

        Ok(Entitlement {
            album_title: album_title.to_string(),
            download_prefix: prefix.to_string(),
            tracks,
        })
    }
}

/// An audio file whose key is exactly `{prefix}/{basename}`.
///
/// Excludes nested folders and sibling prefixes that merely share a leading string
/// (`albums/WE BOW DELUXE/...` for prefix `albums/WE BOW`).
fn is_entitled_track(prefix: &str, object: &BlobObject) -> bool {
    let name = audio::basename(&object.pathname);
    audio::is_audio_file(name) && object.pathname == storage_key_for(prefix, name)
}

/// Rebuild the store handle for a resolved track.
pub(crate) fn blob_for(track: &Track) -> BlobObject {
    BlobObject {
        pathname: track.pathname.clone(),
        url: track.url.clone(),
        size: track.size,
    }
}
