//! Data models for the application
//!
//! Sessions come from the payment provider; tracks and entitlements are derived
//! per request from a session and the blob store listing.

mod session;
mod track;

pub use session::*;
pub use track::*;
