//! Albumstore Payments Library
//!
//! The payment provider is the only authority on whether a buyer has paid and on
//! which album the purchase unlocks. This crate defines the `PaymentProvider`
//! trait and its Stripe implementation.

pub mod stripe;
pub mod traits;

pub use stripe::StripeClient;
pub use traits::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentProvider, PaymentResult,
    VerifiedSession,
};
