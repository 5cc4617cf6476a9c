use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use albumstore_services::CheckoutInput;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBody {
    pub album_title: Option<String>,
    pub quantity: Option<i64>,
    /// Display price from the page; the catalog price is charged.
    pub price: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    /// Hosted checkout page to redirect the buyer to
    pub url: String,
}

impl From<CheckoutBody> for CheckoutInput {
    fn from(body: CheckoutBody) -> Self {
        CheckoutInput {
            album_title: body.album_title,
            quantity: body.quantity,
            price: body.price,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    tag = "checkout",
    request_body = CheckoutBody,
    responses(
        (status = 200, description = "Checkout session created", body = CheckoutResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Payment provider failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, body), fields(album = ?body.album_title, quantity = ?body.quantity, operation = "create_checkout"))]
pub async fn create_checkout(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<CheckoutBody>,
) -> Result<Json<CheckoutResponse>, HttpAppError> {
    let session = state.checkout.create(&body.into()).await?;

    tracing::info!(checkout_session = %session.id, "Checkout session created");

    Ok(Json(CheckoutResponse { url: session.url }))
}
