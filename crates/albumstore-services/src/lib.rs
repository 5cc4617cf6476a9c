//! Albumstore Services Layer
//!
//! This crate is the **business service layer**: it decides who may download
//! what and shapes the bytes that leave the service. It combines the payment
//! provider and the blob store behind four services (entitlement resolution,
//! single-track delivery, album archiving and checkout) so that the API crate
//! keeps to thin HTTP handling.

pub mod archive;
pub mod checkout;
pub mod delivery;
pub mod entitlement;
pub mod error;

#[cfg(test)]
pub(crate) mod test_support;

pub use archive::{zip_filename, AlbumArchive, ArchiveBundler};
pub use checkout::{CheckoutInput, CheckoutService, MAX_QUANTITY, MIN_QUANTITY};
pub use delivery::{attachment_disposition, DeliveryMode, TrackPayload, TrackStreamer};
pub use entitlement::EntitlementResolver;
pub use error::{from_payment, from_storage};
