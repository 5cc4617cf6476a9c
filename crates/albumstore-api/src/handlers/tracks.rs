use super::require_param;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TracksQuery {
    /// Checkout session id returned by the payment provider
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TracksResponse {
    pub album_title: String,
    /// File names in delivery order
    pub tracks: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/tracks",
    tag = "delivery",
    params(TracksQuery),
    responses(
        (status = 200, description = "Tracks unlocked by the purchase", body = TracksResponse),
        (status = 400, description = "Missing session_id", body = ErrorResponse),
        (status = 403, description = "Payment not completed", body = ErrorResponse),
        (status = 404, description = "Unknown session or no download path", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(operation = "list_tracks"))]
pub async fn list_tracks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TracksQuery>,
) -> Result<Json<TracksResponse>, HttpAppError> {
    let session_id = require_param(query.session_id, "session_id")?;

    let entitlement = state.entitlements.resolve(&session_id).await?;

    Ok(Json(TracksResponse {
        tracks: entitlement.track_names(),
        album_title: entitlement.album_title,
    }))
}
