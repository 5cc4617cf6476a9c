//! Payment provider abstraction trait

use albumstore_core::PaymentSession;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Payment provider errors
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The provider does not know the session id.
    #[error("Checkout session not found: {0}")]
    SessionNotFound(String),

    /// The provider rejected the request parameters.
    #[error("Invalid payment request: {0}")]
    InvalidRequest(String),

    /// Network failure, unexpected status or undecodable response.
    #[error("Payment provider error: {0}")]
    Upstream(String),
}

/// Result type for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

/// What a checkout session proves about a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedSession {
    pub paid: bool,
    pub album_title: String,
    /// Storage prefix the purchase unlocks; `None` when the session carries none.
    pub download_prefix: Option<String>,
}

impl From<&PaymentSession> for VerifiedSession {
    fn from(session: &PaymentSession) -> Self {
        Self {
            paid: session.payment_status.is_paid(),
            album_title: session.album_title().to_string(),
            download_prefix: session.download_prefix().map(str::to_string),
        }
    }
}

/// Parameters for a one-off album purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub album_title: String,
    pub download_path: String,
    pub quantity: u32,
    /// Price per copy in the currency's minor unit.
    pub unit_amount_cents: i64,
    pub currency: String,
    pub description: String,
    pub image_url: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// A created hosted checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Payment provider abstraction
///
/// Implementations are read-only with respect to existing sessions and never retry.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Look up a checkout session and report whether it is paid and what it unlocks.
    async fn verify_session(&self, session_id: &str) -> PaymentResult<VerifiedSession>;

    /// Create a hosted checkout page for one album purchase.
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> PaymentResult<CheckoutSession>;
}
