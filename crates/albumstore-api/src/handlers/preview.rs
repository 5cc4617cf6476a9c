use super::{range_header, require_param, track_response};
use crate::constants::PREVIEW_ALBUM_TITLE;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use albumstore_services::DeliveryMode;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PreviewQuery {
    /// File name of a track in the preview album
    pub track: Option<String>,
}

/// Ungated playback of the preview album.
#[utoipa::path(
    get,
    path = "/api/preview",
    tag = "delivery",
    params(
        PreviewQuery,
        ("Range" = Option<String>, Header, description = "Single byte range, e.g. bytes=0-1023")
    ),
    responses(
        (status = 200, description = "Full track", content_type = "audio/mpeg"),
        (status = 206, description = "Partial track", content_type = "audio/mpeg"),
        (status = 400, description = "Missing track", body = ErrorResponse),
        (status = 404, description = "Track not found", body = ErrorResponse),
        (status = 416, description = "Range not satisfiable", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query, headers), fields(track = ?query.track, operation = "preview_track"))]
pub async fn preview_track(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PreviewQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HttpAppError> {
    let track = require_param(query.track, "track")?;

    let listing = state
        .entitlements
        .resolve_listing(state.preview_prefix(), PREVIEW_ALBUM_TITLE)
        .await?;

    let payload = state
        .streamer
        .serve(&listing, &track, range_header(&headers), DeliveryMode::Preview)
        .await?;

    Ok(track_response(payload)?)
}
