//! Request and response wire types (camelCase JSON).

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Case progress ────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseProgressRequest {
    #[serde(default)]
    pub submission_id: Option<String>,
    pub case_id: String,
    pub current_step: String,
    pub step_data: Value,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseProgressResponse {
    pub success: bool,
    pub case_id: String,
    pub current_step: String,
    pub submission_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

// ── Uploads ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub case_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    pub success: bool,
    pub upload_url: String,
    pub object_key: String,
    pub upload_token: String,
    pub expires_in_secs: u64,
}

// ── Events ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub event: String,
    #[serde(default)]
    pub properties: Value,
    #[serde(default)]
    pub case_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub success: bool,
    pub forwarded: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptInRequest {
    pub email: String,
    pub case_id: String,
}

#[derive(Debug, Serialize)]
pub struct OptInResponse {
    pub success: bool,
    pub triggered: bool,
}

// ── Hospitals ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HospitalQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HospitalsResponse {
    pub hospitals: Vec<String>,
}

// ── Operational ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}
