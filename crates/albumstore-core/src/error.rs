//! Error types module
//!
//! This module provides the core error types used throughout Albumstore.
//! Every failure a delivery endpoint can surface is one `AppError` variant; the
//! `ErrorMetadata` impl decides how each variant is rendered over HTTP.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like missing parameters
    Debug,
    /// Warning level - for access denials worth noticing
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "PAYMENT_NOT_COMPLETED")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Payment not completed")]
    PaymentNotCompleted,

    #[error("Checkout session not found: {0}")]
    SessionNotFound(String),

    #[error("No download available for this purchase")]
    NoEntitlement,

    #[error("Track not found: {0}")]
    TrackNotFound(String),

    #[error("No audio files found")]
    NoAssetsAvailable,

    #[error("Requested range not satisfiable: {0}")]
    RangeNotSatisfiable(String),

    #[error("Payment provider error: {0}")]
    Payment(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::MissingParameter(_) => (
            400,
            "MISSING_PARAMETER",
            false,
            Some("Include the required query parameter"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::PaymentNotCompleted => (
            403,
            "PAYMENT_NOT_COMPLETED",
            false,
            Some("Complete checkout before downloading"),
            false,
            LogLevel::Warn,
        ),
        AppError::SessionNotFound(_) => (
            404,
            "SESSION_NOT_FOUND",
            false,
            Some("Verify the checkout session ID"),
            false,
            LogLevel::Debug,
        ),
        AppError::NoEntitlement => (
            404,
            "NO_ENTITLEMENT",
            false,
            Some("Contact support with your checkout session ID"),
            false,
            LogLevel::Warn,
        ),
        AppError::TrackNotFound(_) => (
            404,
            "TRACK_NOT_FOUND",
            false,
            Some("Request a track from the album track listing"),
            false,
            LogLevel::Debug,
        ),
        AppError::NoAssetsAvailable => (
            404,
            "NO_ASSETS_AVAILABLE",
            false,
            Some("Contact support with your checkout session ID"),
            false,
            LogLevel::Warn,
        ),
        AppError::RangeNotSatisfiable(_) => (
            416,
            "RANGE_NOT_SATISFIABLE",
            false,
            Some("Request a byte range within the file size"),
            false,
            LogLevel::Debug,
        ),
        AppError::Payment(_) => (
            500,
            "PAYMENT_PROVIDER_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::MissingParameter(_) => "MissingParameter",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PaymentNotCompleted => "PaymentNotCompleted",
            AppError::SessionNotFound(_) => "SessionNotFound",
            AppError::NoEntitlement => "NoEntitlement",
            AppError::TrackNotFound(_) => "TrackNotFound",
            AppError::NoAssetsAvailable => "NoAssetsAvailable",
            AppError::RangeNotSatisfiable(_) => "RangeNotSatisfiable",
            AppError::Payment(_) => "Payment",
            AppError::Storage(_) => "Storage",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingParameter(ref name) => format!("Missing {} parameter", name),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::PaymentNotCompleted => "Payment not completed".to_string(),
            AppError::SessionNotFound(_) => "Checkout session not found".to_string(),
            AppError::NoEntitlement => "No download available for this purchase".to_string(),
            AppError::TrackNotFound(_) => "Track not found".to_string(),
            AppError::NoAssetsAvailable => "No audio files found".to_string(),
            AppError::RangeNotSatisfiable(_) => "Requested range not satisfiable".to_string(),
            AppError::Payment(_) => "Failed to verify payment".to_string(),
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
