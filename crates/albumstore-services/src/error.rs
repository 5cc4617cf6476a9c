//! Conversions from collaborator errors into `AppError`.
//!
//! Free functions rather than `From` impls: neither side of the conversion is
//! local to this crate.

use albumstore_core::AppError;
use albumstore_payments::PaymentError;
use albumstore_storage::StorageError;

pub fn from_storage(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(key) => AppError::TrackNotFound(key),
        StorageError::RangeNotSatisfiable { size } => {
            AppError::RangeNotSatisfiable(format!("bytes */{}", size))
        }
        StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
        StorageError::ListFailed(msg)
        | StorageError::DownloadFailed(msg)
        | StorageError::BackendError(msg) => AppError::Storage(msg),
        StorageError::IoError(err) => AppError::Storage(format!("IO error: {}", err)),
        StorageError::ConfigError(msg) => AppError::Internal(msg),
    }
}

pub fn from_payment(err: PaymentError) -> AppError {
    match err {
        PaymentError::SessionNotFound(id) => AppError::SessionNotFound(id),
        // Client input is validated before the provider is called, so a rejection
        // here means the request we built is wrong.
        PaymentError::InvalidRequest(msg) | PaymentError::Upstream(msg) => AppError::Payment(msg),
    }
}
