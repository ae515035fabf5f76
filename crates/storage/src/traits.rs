//! Storage trait seams consumed by the service layer.

use async_trait::async_trait;
use caseintake_core::{AppliedStep, Case, StepSubmission};

use crate::error::StorageError;

/// Durable, idempotent application of step submissions.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Apply one step submission to the event log and the case projection as
    /// a single atomic unit. A submission id that was already applied commits
    /// nothing new and returns success with `deduplicated = true`.
    async fn apply_step(&self, submission: &StepSubmission) -> Result<AppliedStep, StorageError>;

    /// Fetch the current-state projection for a case.
    async fn get_case(&self, case_id: &str) -> Result<Option<Case>, StorageError>;
}

/// Read-only hospital reference data.
#[async_trait]
pub trait HospitalStore: Send + Sync {
    /// Case-insensitive prefix search over hospital names.
    async fn search_hospitals(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<String>, StorageError>;
}
