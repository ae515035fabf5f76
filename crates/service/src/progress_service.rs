//! Orchestration for step submissions: validate → persist → mirror.
//!
//! Each request is a one-shot: reject early on validation, apply the store
//! transaction, then run the mirror as an awaited-but-swallowed secondary
//! write whose failure becomes a warning on the success response.

use std::sync::Arc;
use std::time::Duration;

use caseintake_core::{env_parse_with_default, validate_step, StepSubmission, MIRROR_TIMEOUT_SECS};
use caseintake_storage::ProgressStore;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::mirror::CaseMirror;

/// One step submission as accepted from the outside.
#[derive(Debug, Clone)]
pub struct SubmitStep {
    /// Client-supplied idempotency key; generated when absent, which makes
    /// unkeyed retries distinct submissions.
    pub submission_id: Option<String>,
    pub case_id: String,
    pub step_key: String,
    pub payload: Value,
    pub source: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

/// Outcome of a successful submission, including the mirror warning if the
/// secondary write degraded.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub case_id: String,
    pub current_step: String,
    pub submission_id: String,
    pub warning: Option<String>,
}

/// Orchestrates step submissions over the progress store and the mirror.
pub struct ProgressService {
    storage: Arc<dyn ProgressStore>,
    mirror: Option<Arc<dyn CaseMirror>>,
    mirror_timeout: Duration,
}

impl ProgressService {
    #[must_use]
    pub fn new(storage: Arc<dyn ProgressStore>, mirror: Option<Arc<dyn CaseMirror>>) -> Self {
        if mirror.is_none() {
            tracing::info!("sheet mirror not configured, submissions will not be mirrored");
        }
        let mirror_timeout = Duration::from_secs(env_parse_with_default(
            "CASEINTAKE_MIRROR_TIMEOUT_SECS",
            MIRROR_TIMEOUT_SECS,
        ));
        Self { storage, mirror, mirror_timeout }
    }

    /// Validate, persist, and mirror one step submission.
    ///
    /// # Errors
    /// `Validation` before any store interaction; `Storage` errors keep their
    /// transient/fatal classification. Mirror failures are not errors.
    pub async fn submit_step(&self, request: SubmitStep) -> Result<StepOutcome, ServiceError> {
        if request.case_id.trim().is_empty() {
            return Err(ServiceError::Validation("caseId is required".to_owned()));
        }
        if request.step_key.trim().is_empty() {
            return Err(ServiceError::Validation("currentStep is required".to_owned()));
        }
        validate_step(&request.step_key, &request.payload).map_err(ServiceError::Validation)?;

        let submission_id = request
            .submission_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let submission = StepSubmission {
            submission_id,
            case_id: request.case_id,
            step_key: request.step_key,
            step_version: 1,
            payload: request.payload,
            source: request.source,
            user_agent: request.user_agent,
            ip: request.ip,
        };

        let applied = self.storage.apply_step(&submission).await?;
        if applied.deduplicated {
            tracing::debug!(
                submission_id = %applied.submission_id,
                case_id = %applied.case_id,
                "duplicate submission acknowledged"
            );
        }

        let warning = self
            .run_mirror(&applied.case_id, &applied.current_step, &submission.payload)
            .await;

        Ok(StepOutcome {
            case_id: applied.case_id,
            current_step: applied.current_step,
            submission_id: applied.submission_id,
            warning,
        })
    }

    /// Awaited-but-swallowed secondary write: any error or timeout becomes a
    /// warning string, never a failure and never a rollback.
    async fn run_mirror(&self, case_id: &str, step_key: &str, payload: &Value) -> Option<String> {
        let mirror = self.mirror.as_ref()?;
        let write = mirror.mirror(case_id, step_key, payload);
        match tokio::time::timeout(self.mirror_timeout, write).await {
            Ok(Ok(())) => None,
            Ok(Err(e)) => {
                tracing::warn!(
                    error = %e,
                    case_id,
                    step_key,
                    "sheet mirror failed, case row may be stale in the sheet"
                );
                Some(format!("sheet mirror failed: {e}"))
            },
            Err(_) => {
                tracing::warn!(case_id, step_key, "sheet mirror timed out");
                Some("sheet mirror timed out".to_owned())
            },
        }
    }
}
