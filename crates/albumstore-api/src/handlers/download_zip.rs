use super::require_param;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use albumstore_core::AppError;
use albumstore_services::attachment_disposition;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownloadZipQuery {
    /// Checkout session id returned by the payment provider
    pub session_id: Option<String>,
}

/// Download the whole purchased album as one zip.
#[utoipa::path(
    get,
    path = "/api/download-zip",
    tag = "delivery",
    params(DownloadZipQuery),
    responses(
        (status = 200, description = "Album archive", content_type = "application/zip"),
        (status = 400, description = "Missing session_id", body = ErrorResponse),
        (status = 403, description = "Payment not completed", body = ErrorResponse),
        (status = 404, description = "Unknown session or no audio files", body = ErrorResponse),
        (status = 500, description = "Upstream or archive failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(operation = "download_zip"))]
pub async fn download_zip(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DownloadZipQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let session_id = require_param(query.session_id, "session_id")?;

    let entitlement = state.entitlements.resolve(&session_id).await?;
    let archive = state.archives.bundle(&entitlement).await?;

    tracing::info!(
        album = %entitlement.album_title,
        entries = archive.entries,
        size_bytes = archive.data.len(),
        "Serving album archive"
    );

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(header::CONTENT_LENGTH, archive.data.len())
        .header(
            header::CONTENT_DISPOSITION,
            attachment_disposition(&archive.filename),
        )
        .header(header::CACHE_CONTROL, "private, no-store")
        .body(Body::from(archive.data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
