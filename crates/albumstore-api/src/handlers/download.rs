use super::{range_header, require_param, track_response};
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
pub struct DownloadQuery {
    /// Checkout session id returned by the payment provider
    pub session_id: Option<String>,
    /// File name of one purchased track
    pub track: Option<String>,
}

/// Download one purchased track as an attachment.
///
/// The session is verified before the `track` parameter is looked at.
#[utoipa::path(
    get,
    path = "/api/download",
    tag = "delivery",
    params(
        DownloadQuery,
        ("Range" = Option<String>, Header, description = "Single byte range, e.g. bytes=0-1023")
    ),
    responses(
        (status = 200, description = "Track attachment", content_type = "audio/*"),
        (status = 206, description = "Partial track", content_type = "audio/*"),
        (status = 400, description = "Missing session_id or track", body = ErrorResponse),
        (status = 403, description = "Payment not completed", body = ErrorResponse),
        (status = 404, description = "Unknown session or track", body = ErrorResponse),
        (status = 416, description = "Range not satisfiable", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query, headers), fields(track = ?query.track, operation = "download_track"))]
pub async fn download_track(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DownloadQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HttpAppError> {
    let session_id = require_param(query.session_id, "session_id")?;

    let entitlement = state.entitlements.resolve(&session_id).await?;

    let track = require_param(query.track, "track")?;

    let payload = state
        .streamer
        .serve(
            &entitlement,
            &track,
            range_header(&headers),
            DeliveryMode::Download,
        )
        .await?;

    Ok(track_response(payload)?)
}
