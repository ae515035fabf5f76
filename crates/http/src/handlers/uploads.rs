use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::api_error::ApiError;
use crate::api_types::{UploadUrlRequest, UploadUrlResponse};
use crate::AppState;

/// `POST /upload-url`: issue a short-lived signed PUT URL for one document.
pub async fn create_upload_url(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UploadUrlRequest>,
) -> Result<Json<UploadUrlResponse>, ApiError> {
    let Some(issuer) = state.uploads.as_ref() else {
        return Err(ApiError::Retryable("upload storage is not configured".to_owned()));
    };

    let issued = issuer
        .issue(&request.case_id, &request.file_name, &request.mime_type, request.size_bytes)
        .await?;
    Ok(Json(UploadUrlResponse {
        success: true,
        upload_url: issued.upload_url,
        object_key: issued.object_key,
        upload_token: issued.upload_token,
        expires_in_secs: issued.expires_in_secs,
    }))
}
