//! Stripe Checkout backend
//!
//! Talks to the Stripe REST API directly: sessions are retrieved with a GET and
//! created with a form-encoded POST, both authenticated with the secret key.

use crate::traits::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentProvider, PaymentResult,
    VerifiedSession,
};
use albumstore_core::PaymentSession;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedSession {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

/// Stripe API client
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(
        api_base: impl Into<String>,
        secret_key: impl Into<String>,
        timeout: Duration,
    ) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PaymentError::Upstream(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        })
    }

    fn sessions_url(&self) -> String {
        format!("{}/v1/checkout/sessions", self.api_base)
    }

    /// Pull Stripe's `{"error": {...}}` message out of a failed response body.
    fn error_message(body: &str) -> (Option<String>, String) {
        match serde_json::from_str::<StripeErrorBody>(body) {
            Ok(parsed) => (
                parsed.error.code,
                parsed.error.message.unwrap_or_else(|| body.to_string()),
            ),
            Err(_) => (None, body.to_string()),
        }
    }

    /// Form fields for a single line-item payment session.
    fn checkout_form(request: &CheckoutRequest) -> Vec<(&'static str, String)> {
        vec![
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            (
                "line_items[0][price_data][currency]",
                request.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                request.album_title.clone(),
            ),
            (
                "line_items[0][price_data][product_data][description]",
                request.description.clone(),
            ),
            (
                "line_items[0][price_data][product_data][images][0]",
                request.image_url.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                request.unit_amount_cents.to_string(),
            ),
            ("line_items[0][quantity]", request.quantity.to_string()),
            ("success_url", request.success_url.clone()),
            ("cancel_url", request.cancel_url.clone()),
            ("metadata[albumTitle]", request.album_title.clone()),
            ("metadata[downloadPath]", request.download_path.clone()),
        ]
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    #[tracing::instrument(skip(self))]
    async fn verify_session(&self, session_id: &str) -> PaymentResult<VerifiedSession> {
        let url = format!(
            "{}/{}",
            self.sessions_url(),
            urlencoding::encode(session_id)
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| PaymentError::Upstream(format!("Stripe request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (code, message) = Self::error_message(&body);
            if status == StatusCode::NOT_FOUND || code.as_deref() == Some("resource_missing") {
                return Err(PaymentError::SessionNotFound(session_id.to_string()));
            }
            return Err(PaymentError::Upstream(format!(
                "Stripe returned {}: {}",
                status, message
            )));
        }

        let session: PaymentSession = response
            .json()
            .await
            .map_err(|e| PaymentError::Upstream(format!("Invalid Stripe session response: {}", e)))?;

        let verified = VerifiedSession::from(&session);
        tracing::debug!(
            paid = verified.paid,
            payment_status = session.payment_status.as_str(),
            has_prefix = verified.download_prefix.is_some(),
            "Checkout session verified"
        );

        Ok(verified)
    }

    #[tracing::instrument(skip(self, request), fields(album = %request.album_title, quantity = request.quantity))]
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> PaymentResult<CheckoutSession> {
        let response = self
            .client
            .post(self.sessions_url())
            .bearer_auth(&self.secret_key)
            .form(&Self::checkout_form(request))
            .send()
            .await
            .map_err(|e| PaymentError::Upstream(format!("Stripe request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (_, message) = Self::error_message(&body);
            return Err(if status.is_client_error() {
                PaymentError::InvalidRequest(message)
            } else {
                PaymentError::Upstream(format!("Stripe returned {}: {}", status, message))
            });
        }

        let created: CreatedSession = response
            .json()
            .await
            .map_err(|e| PaymentError::Upstream(format!("Invalid Stripe session response: {}", e)))?;

        let url = created
            .url
            .ok_or_else(|| PaymentError::Upstream("Stripe session has no checkout URL".to_string()))?;

        tracing::info!(session_id = %created.id, "Checkout session created");

        Ok(CheckoutSession {
            id: created.id,
            url,
        })
    }
}
