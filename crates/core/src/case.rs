//! Case and step-submission domain types.
//!
//! A *case* is one end-user's multi-step submission session, identified by an
//! opaque client-supplied id. Each step submission appends one immutable
//! event; the case row is the fold of those events, maintained incrementally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Well-known step keys. Any other key is accepted as long as the payload is
/// a JSON object, so new widget steps need no changes below the validator.
pub mod steps {
    pub const HOSPITAL: &str = "hospital";
    pub const BALANCE: &str = "balance";
    pub const CONTACT: &str = "contact";
}

/// One append-only record of a step submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseProgressEvent {
    pub id: i64,
    /// Idempotency key: at most one event ever exists per submission id.
    pub submission_id: String,
    pub case_id: String,
    pub step_key: String,
    pub step_version: i32,
    pub payload: Value,
    pub received_at: DateTime<Utc>,
    pub source: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

/// Current-state projection of a case: one row per case id.
///
/// `progress` maps step key to that step's latest payload and is the source
/// of truth. The scalar fields are a queryable cache of a subset of it,
/// refreshed only by the steps that carry them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub case_id: String,
    pub current_step: String,
    pub progress: Value,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub hospital_name: Option<String>,
    pub balance_amount: Option<f64>,
    pub in_collections: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for applying one step submission to the store.
#[derive(Debug, Clone)]
pub struct StepSubmission {
    pub submission_id: String,
    pub case_id: String,
    pub step_key: String,
    pub step_version: i32,
    pub payload: Value,
    pub source: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

impl StepSubmission {
    #[must_use]
    pub fn new(submission_id: String, case_id: String, step_key: String, payload: Value) -> Self {
        Self {
            submission_id,
            case_id,
            step_key,
            step_version: 1,
            payload,
            source: None,
            user_agent: None,
            ip: None,
        }
    }
}

/// Result of applying a step submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedStep {
    pub case_id: String,
    pub current_step: String,
    pub submission_id: String,
    /// True when this submission id had already been applied; the projection
    /// was left untouched and the call was a successful no-op.
    pub deduplicated: bool,
}
