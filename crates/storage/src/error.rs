//! Typed error enum for the storage layer.
//!
//! Callers need to distinguish transient infrastructure faults (worth a
//! client retry with the same submission id) from data errors that are fatal
//! to the request, so the enum carries that classification instead of an
//! opaque box.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Unique constraint violation other than the idempotency path.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// SQL / connection / timeout failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Row data could not be deserialized into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Database(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            )
        )
    }

    /// Whether this error is a unique-constraint violation.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Custom `From<sqlx::Error>` — NOT blanket `#[from]`.
///
/// SQLSTATE 23505 → `Duplicate`; everything else → `Database`. The
/// idempotency insert never reaches this path because it uses
/// `ON CONFLICT DO NOTHING`.
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23505") => {
                Self::Duplicate(db_err.message().to_owned())
            },
            _ => Self::Database(err),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "JSON serialization/deserialization".to_owned(),
            source: Box::new(err),
        }
    }
}
