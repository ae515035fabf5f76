//! Presigned upload-URL issuer backed by S3-compatible object storage.

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use caseintake_core::{MAX_UPLOAD_SIZE_BYTES, UPLOAD_URL_TTL_SECS};
use uuid::Uuid;

use crate::error::UploadError;
use crate::token::mint_upload_token;

/// Mime types accepted for bill documents.
const ALLOWED_MIME_TYPES: &[&str] =
    &["application/pdf", "image/jpeg", "image/png", "image/heic", "image/webp"];

/// One issued upload: URL, key, binding token.
#[derive(Debug, Clone)]
pub struct IssuedUpload {
    pub upload_url: String,
    pub object_key: String,
    pub upload_token: String,
    pub expires_in_secs: u64,
}

/// Issues short-lived presigned PUT URLs under a per-case key prefix.
pub struct UploadIssuer {
    client: Client,
    bucket: String,
    prefix: String,
    token_secret: Vec<u8>,
}

impl std::fmt::Debug for UploadIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadIssuer")
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .field("token_secret", &"***")
            .finish_non_exhaustive()
    }
}

impl UploadIssuer {
    /// Create an issuer from the ambient AWS configuration, with optional
    /// region and endpoint overrides for S3-compatible services.
    pub async fn new(
        bucket: String,
        prefix: String,
        region: Option<String>,
        endpoint: Option<String>,
        token_secret: String,
    ) -> Result<Self, UploadError> {
        if token_secret.is_empty() {
            return Err(UploadError::ClientInit("upload token secret must not be empty".into()));
        }
        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            config_loader = config_loader.region(aws_sdk_s3::config::Region::new(region));
        }
        let config = config_loader.load().await;

        let mut s3_config = aws_sdk_s3::config::Builder::from(&config);
        if let Some(endpoint_url) = endpoint {
            // Path-style addressing is required for most S3-compatible services.
            s3_config = s3_config.endpoint_url(endpoint_url).force_path_style(true);
        }
        let client = Client::from_conf(s3_config.build());

        tracing::debug!(bucket = %bucket, prefix = %prefix, "upload issuer initialized");
        Ok(Self { client, bucket, prefix, token_secret: token_secret.into_bytes() })
    }

    /// Issue one presigned PUT URL for a case document.
    ///
    /// # Errors
    /// `InvalidRequest` for rejected metadata; `Presign` when the SDK fails.
    pub async fn issue(
        &self,
        case_id: &str,
        file_name: &str,
        mime_type: &str,
        size_bytes: u64,
    ) -> Result<IssuedUpload, UploadError> {
        validate_request(case_id, file_name, mime_type, size_bytes)?;

        let object_key = self.object_key(case_id, file_name);
        let presigning = PresigningConfig::expires_in(Duration::from_secs(UPLOAD_URL_TTL_SECS))
            .map_err(|e| UploadError::Presign(e.to_string()))?;
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .content_type(mime_type)
            .presigned(presigning)
            .await
            .map_err(|e| UploadError::Presign(e.to_string()))?;

        let upload_token = mint_upload_token(&self.token_secret, case_id, &object_key);
        tracing::debug!(case_id, object_key = %object_key, "issued upload URL");
        Ok(IssuedUpload {
            upload_url: presigned.uri().to_string(),
            object_key,
            upload_token,
            expires_in_secs: UPLOAD_URL_TTL_SECS,
        })
    }

    /// Key shape: `{prefix}/{case_id}/{uuid}/{sanitized_file_name}`. The
    /// random segment keeps repeated uploads of the same file name distinct.
    fn object_key(&self, case_id: &str, file_name: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.prefix,
            case_id,
            Uuid::new_v4(),
            sanitize_file_name(file_name)
        )
    }
}

fn validate_request(
    case_id: &str,
    file_name: &str,
    mime_type: &str,
    size_bytes: u64,
) -> Result<(), UploadError> {
    if case_id.trim().is_empty() {
        return Err(UploadError::InvalidRequest("caseId is required".into()));
    }
    if file_name.trim().is_empty() {
        return Err(UploadError::InvalidRequest("fileName is required".into()));
    }
    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return Err(UploadError::InvalidRequest(format!(
            "mimeType '{mime_type}' is not accepted"
        )));
    }
    if size_bytes == 0 {
        return Err(UploadError::InvalidRequest("sizeBytes must be greater than zero".into()));
    }
    if size_bytes > MAX_UPLOAD_SIZE_BYTES {
        return Err(UploadError::InvalidRequest(format!(
            "sizeBytes exceeds the {MAX_UPLOAD_SIZE_BYTES} byte limit"
        )));
    }
    Ok(())
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '-' })
        .collect();
    if cleaned.is_empty() { "upload".to_owned() } else { cleaned }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_metadata_in_order() {
        assert!(validate_request("", "bill.pdf", "application/pdf", 10).is_err());
        assert!(validate_request("c1", " ", "application/pdf", 10).is_err());
        assert!(validate_request("c1", "bill.exe", "application/x-msdownload", 10).is_err());
        assert!(validate_request("c1", "bill.pdf", "application/pdf", 0).is_err());
        assert!(
            validate_request("c1", "bill.pdf", "application/pdf", MAX_UPLOAD_SIZE_BYTES + 1)
                .is_err()
        );
        assert!(validate_request("c1", "bill.pdf", "application/pdf", 1024).is_ok());
    }

    #[test]
    fn sanitizes_file_names() {
        assert_eq!(sanitize_file_name("my bill (1).pdf"), "my-bill--1-.pdf");
        assert_eq!(sanitize_file_name("  scan.jpeg "), "scan.jpeg");
        assert_eq!(sanitize_file_name("///"), "---");
        assert_eq!(sanitize_file_name(""), "upload");
    }
}
