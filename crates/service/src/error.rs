//! Typed error enum for the service layer.
//!
//! Unifies storage and input failures into a single error type so HTTP
//! handlers can map on the classification (validation vs retryable vs fatal)
//! instead of downcasting opaque boxes.

use caseintake_storage::StorageError;
use thiserror::Error;

/// Service-layer error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, duplicate, corruption).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input; never retried server-side.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Required backend is not configured.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Serialization/deserialization failed in the service layer.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// Whether this error is likely transient (worth a client retry with the
    /// same submission id).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Whether this error is a client-input rejection.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
