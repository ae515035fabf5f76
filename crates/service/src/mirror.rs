//! Trait seam for the best-effort case mirror.

use async_trait::async_trait;
use caseintake_sheets::SheetsClient;
use serde_json::Value;

/// Best-effort projection of case state into an external tabular store.
///
/// Invoked only after the store transaction has committed. Implementations
/// may fail freely; the orchestrator converts any error into a warning on an
/// otherwise-successful response.
#[async_trait]
pub trait CaseMirror: Send + Sync {
    async fn mirror(&self, case_id: &str, step_key: &str, payload: &Value) -> anyhow::Result<()>;
}

#[async_trait]
impl CaseMirror for SheetsClient {
    async fn mirror(&self, case_id: &str, step_key: &str, payload: &Value) -> anyhow::Result<()> {
        self.mirror_case(case_id, step_key, payload).await?;
        Ok(())
    }
}
