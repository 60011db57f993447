use lariat_core::{AliasError, StoreError};
use thiserror::Error;

/// Failures surfaced by the service layer.
///
/// Display strings double as the user-facing error messages, so the
/// handlers can put `err.to_string()` straight into the response envelope.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidAlias(#[from] AliasError),
    #[error("Invalid user - user does not exist")]
    OwnerNotFound,
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Alias already in use")]
    DuplicateAlias,
    #[error("Email already in use")]
    DuplicateEmail,
    #[error("Invalid alias")]
    NotFound,
    #[error("{0}")]
    Store(StoreError),
}

/// Converts a `StoreError` to a `ServiceError`, promoting the store's
/// uniqueness rejections to their user-facing conflict variants.
pub(crate) fn store_error(err: StoreError) -> ServiceError {
    match err {
        StoreError::DuplicateAlias(_) => ServiceError::DuplicateAlias,
        StoreError::DuplicateEmail(_) => ServiceError::DuplicateEmail,
        other => ServiceError::Store(other),
    }
}
