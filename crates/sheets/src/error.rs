//! Typed error enum for the sheets crate.

use thiserror::Error;

/// Errors from spreadsheet API operations.
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    /// The sheet no longer carries a header the mirror depends on.
    #[error("spreadsheet schema drift: {0}")]
    SchemaDrift(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl SheetsError {
    /// Whether this error is transient. The mirror never retries, but the
    /// classification is kept for log triage.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(_) => true,
            Self::HttpStatus { code, .. } => matches!(code, 429 | 500 | 502 | 503),
            _ => false,
        }
    }
}
