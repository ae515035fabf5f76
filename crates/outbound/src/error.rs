//! Typed error enum for outbound calls.

use thiserror::Error;

/// Errors from analytics / email API operations.
#[derive(Debug, Error)]
pub enum OutboundError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl OutboundError {
    /// Whether this error is transient. Callers never retry inline, but the
    /// classification drives log severity.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(_) => true,
            Self::HttpStatus { code, .. } => matches!(code, 429 | 500 | 502 | 503),
            Self::ClientInit(_) => false,
        }
    }
}
