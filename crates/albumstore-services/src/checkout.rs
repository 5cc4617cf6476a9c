//! Checkout session creation for catalog albums.

use crate::error::from_payment;
use albumstore_core::{AlbumCatalog, AppError};
use albumstore_payments::{CheckoutRequest, CheckoutSession, PaymentProvider};
use std::sync::Arc;

pub const MIN_QUANTITY: i64 = 1;
pub const MAX_QUANTITY: i64 = 99;

/// Client-supplied checkout fields, before validation.
#[derive(Debug, Clone, Default)]
pub struct CheckoutInput {
    pub album_title: Option<String>,
    pub quantity: Option<i64>,
    /// Accepted for compatibility with older clients; the catalog price is charged.
    pub price: Option<f64>,
}

#[derive(Clone)]
pub struct CheckoutService {
    payments: Arc<dyn PaymentProvider>,
    catalog: AlbumCatalog,
    public_base_url: String,
    artist_name: String,
}

impl CheckoutService {
    pub fn new(
        payments: Arc<dyn PaymentProvider>,
        catalog: AlbumCatalog,
        public_base_url: impl Into<String>,
        artist_name: impl Into<String>,
    ) -> Self {
        Self {
            payments,
            catalog,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            artist_name: artist_name.into(),
        }
    }

    /// Validate the input against the catalog and build the provider request.
    pub fn build_request(&self, input: &CheckoutInput) -> Result<CheckoutRequest, AppError> {
        let album_title = input
            .album_title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::MissingParameter("albumTitle".to_string()))?;
        let quantity = input
            .quantity
            .ok_or_else(|| AppError::MissingParameter("quantity".to_string()))?;

        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
            return Err(AppError::InvalidInput(format!(
                "quantity must be between {} and {}",
                MIN_QUANTITY, MAX_QUANTITY
            )));
        }

        let entry = self
            .catalog
            .get(album_title)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown album: {}", album_title)))?;

        if let Some(price) = input.price {
            let expected = entry.unit_amount_cents as f64 / 100.0;
            if (price - expected).abs() > f64::EPSILON {
                tracing::debug!(
                    album = %entry.title,
                    client_price = price,
                    catalog_price = expected,
                    "Ignoring client price"
                );
            }
        }

        Ok(CheckoutRequest {
            album_title: entry.title.clone(),
            download_path: entry.download_path.clone(),
            quantity: quantity as u32,
            unit_amount_cents: entry.unit_amount_cents,
            currency: entry.currency.clone(),
            description: format!("Digital Album by {}", self.artist_name),
            image_url: format!("{}/album-cover.jpg", self.public_base_url),
            success_url: format!(
                "{}/success?session_id={{CHECKOUT_SESSION_ID}}",
                self.public_base_url
            ),
            cancel_url: format!("{}/?canceled=true", self.public_base_url),
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, input: &CheckoutInput) -> Result<CheckoutSession, AppError> {
        let request = self.build_request(input)?;
        self.payments
            .create_checkout_session(&request)
            .await
            .map_err(from_payment)
    }
}
