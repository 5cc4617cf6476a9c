//! HTTP handlers, one module per endpoint.

pub mod checkout;
pub mod download;
pub mod download_zip;
pub mod preview;
pub mod tracks;

use albumstore_core::AppError;
use albumstore_services::TrackPayload;
use axum::{
    body::Body,
    http::{header, HeaderMap, Response, StatusCode},
};

/// Turn an optional query value into a required, non-blank one.
pub(crate) fn require_param(value: Option<String>, name: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::MissingParameter(name.to_string()))
}

/// The raw `Range` header, forwarded to the store unchanged.
pub(crate) fn range_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
}

/// Build the audio response for a served track.
pub(crate) fn track_response(payload: TrackPayload) -> Result<Response<Body>, AppError> {
    let status = StatusCode::from_u16(payload.status)
        .map_err(|e| AppError::Internal(format!("Invalid status code: {}", e)))?;

    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, payload.content_type)
        .header(header::CONTENT_LENGTH, payload.content_length)
        .header(header::CACHE_CONTROL, "private, no-store");

    if payload.accept_ranges {
        builder = builder.header(header::ACCEPT_RANGES, "bytes");
    }
    if let Some(content_range) = payload.content_range.as_deref() {
        builder = builder.header(header::CONTENT_RANGE, content_range);
    }
    if let Some(disposition) = payload.content_disposition.as_deref() {
        builder = builder.header(header::CONTENT_DISPOSITION, disposition);
    }

    builder
        .body(Body::from(payload.body))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
}
