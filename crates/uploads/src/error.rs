//! Typed error enum for the uploads crate.

use thiserror::Error;

/// Errors from upload-URL issuance.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Caller-supplied file metadata was rejected.
    #[error("invalid upload request: {0}")]
    InvalidRequest(String),

    /// The storage SDK failed to produce a presigned URL.
    #[error("presigning failed: {0}")]
    Presign(String),

    /// Issuer construction failed.
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl UploadError {
    /// Whether the failure is the caller's fault (400) or the backend's.
    #[must_use]
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}
