//! Typed API error for HTTP handlers.
//!
//! Converts service errors into the widget's wire envelope: validation
//! failures are 400s, transient persistence failures are 503s flagged
//! `retryable: true` so the client resends with the same submission id, and
//! everything else is an opaque 500 flagged `retryable: false`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use caseintake_service::ServiceError;
use caseintake_uploads::UploadError;

/// API error with HTTP status code and the client-facing envelope.
///
/// Use via `Result<Json<T>, ApiError>` in handlers.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request — invalid input from caller; never retried.
    BadRequest(String),
    /// 503 Service Unavailable — transient backend fault; safe to retry the
    /// identical request (same submission id).
    Retryable(String),
    /// 500 Internal Server Error — non-retryable failure. Details logged,
    /// not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({"success": false, "error": message}),
            ),
            Self::Retryable(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                serde_json::json!({"success": false, "error": message, "retryable": true}),
            ),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({
                        "success": false,
                        "error": "internal server error",
                        "retryable": false
                    }),
                )
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(message) => Self::BadRequest(message),
            ServiceError::NotConfigured(message) => Self::Retryable(message),
            e if e.is_transient() => Self::Retryable(e.to_string()),
            e => Self::Internal(e.into()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        if err.is_invalid_request() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Internal(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseintake_storage::StorageError;

    #[test]
    fn validation_maps_to_bad_request() {
        let api: ApiError = ServiceError::Validation("hospitalName is required".to_owned()).into();
        assert!(matches!(api, ApiError::BadRequest(ref m) if m.contains("hospitalName")));
    }

    #[test]
    fn transient_storage_maps_to_retryable() {
        let api: ApiError =
            ServiceError::Storage(StorageError::Database(sqlx_pool_timeout())).into();
        assert!(matches!(api, ApiError::Retryable(_)));
    }

    #[test]
    fn other_storage_maps_to_internal() {
        let api: ApiError =
            ServiceError::Storage(StorageError::Duplicate("cases_pkey".to_owned())).into();
        assert!(matches!(api, ApiError::Internal(_)));
    }

    fn sqlx_pool_timeout() -> sqlx::Error {
        sqlx::Error::PoolTimedOut
    }
}
