//! Single-file delivery for downloads and previews.

use crate::entitlement::blob_for;
use crate::error::from_storage;
use albumstore_core::audio::{self, PREVIEW_CONTENT_TYPE};
use albumstore_core::models::Entitlement;
use albumstore_core::sanitize::{is_addressable, sanitize_track_name};
use albumstore_core::AppError;
use albumstore_storage::BlobStore;
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;

/// RFC 5987 `attr-char` minus the alphanumerics, which are never encoded.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Purchased download, served as an attachment.
    Download,
    /// Inline playback; always labelled `audio/mpeg`.
    Preview,
}

/// Everything the HTTP layer needs to answer with one track.
#[derive(Debug, Clone)]
pub struct TrackPayload {
    /// 200 for full bodies, 206 whenever a range was requested.
    pub status: u16,
    pub body: Bytes,
    pub content_type: &'static str,
    pub content_length: u64,
    pub content_range: Option<String>,
    pub accept_ranges: bool,
    pub content_disposition: Option<String>,
}

#[derive(Clone)]
pub struct TrackStreamer {
    store: Arc<dyn BlobStore>,
}

impl TrackStreamer {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// Serve `requested_track` from an entitlement.
    ///
    /// Only the final path segment of the request is honoured and it must name
    /// a listed track exactly; nothing is fetched otherwise. The body is fully
    /// buffered, so an upstream failure surfaces as an error instead of a
    /// truncated response.
    #[tracing::instrument(skip(self, entitlement), fields(prefix = %entitlement.download_prefix))]
    pub async fn serve(
        &self,
        entitlement: &Entitlement,
        requested_track: &str,
        range: Option<&str>,
        mode: DeliveryMode,
    ) -> Result<TrackPayload, AppError> {
        let sanitized = sanitize_track_name(requested_track);
        if !is_addressable(&sanitized) {
            return Err(AppError::TrackNotFound(requested_track.to_string()));
        }

        let track = entitlement
            .find_track(&sanitized)
            .ok_or_else(|| AppError::TrackNotFound(sanitized.clone()))?;

        let fetched = self
            .store
            .fetch(&blob_for(track), range)
            .await
            .map_err(from_storage)?;

        let content_type = match mode {
            DeliveryMode::Preview => PREVIEW_CONTENT_TYPE,
            DeliveryMode::Download => audio::content_type_for(&track.file_name),
        };
        let content_disposition = match mode {
            DeliveryMode::Download => Some(attachment_disposition(&track.file_name)),
            DeliveryMode::Preview => None,
        };

        let body_length = fetched.body.len() as u64;
        let (status, content_range, content_length) = if range.is_some() {
            (
                206,
                Some(fetched.content_range.unwrap_or_default()),
                fetched.content_length.unwrap_or(body_length),
            )
        } else {
            (200, None, body_length)
        };

        tracing::debug!(
            track = %track.file_name,
            status,
            upstream_status = fetched.status,
            size_bytes = body_length,
            "Serving track"
        );

        Ok(TrackPayload {
            status,
            content_length,
            body: fetched.body,
            content_type,
            content_range,
            accept_ranges: range.is_some() || mode == DeliveryMode::Preview,
            content_disposition,
        })
    }
}

/// `attachment` disposition with a quoted ASCII fallback and an RFC 5987 `filename*`.
pub fn attachment_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    let encoded = utf8_percent_encode(file_name, FILENAME_ENCODE_SET);
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}
