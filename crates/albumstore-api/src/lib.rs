//! Albumstore API Library
//!
//! This crate provides the HTTP handlers, application state and setup for the
//! storefront's delivery API.

mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;

pub mod error;
pub mod state;

pub use error::ErrorResponse;
pub use state::AppState;
