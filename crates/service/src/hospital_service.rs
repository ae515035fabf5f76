//! Read-side service for hospital name autocomplete.

use std::sync::Arc;

use caseintake_core::{HOSPITAL_SUGGEST_DEFAULT_LIMIT, HOSPITAL_SUGGEST_MAX_LIMIT};
use caseintake_storage::HospitalStore;

use crate::error::ServiceError;

/// Fronts the hospital reference table for the autocomplete endpoint.
pub struct HospitalService {
    storage: Arc<dyn HospitalStore>,
}

impl HospitalService {
    #[must_use]
    pub fn new(storage: Arc<dyn HospitalStore>) -> Self {
        Self { storage }
    }

    /// Prefix suggestions for a partial hospital name. Empty queries return
    /// nothing rather than the whole table.
    pub async fn autocomplete(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<String>, ServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let limit = limit.unwrap_or(HOSPITAL_SUGGEST_DEFAULT_LIMIT).min(HOSPITAL_SUGGEST_MAX_LIMIT);
        Ok(self.storage.search_hospitals(query, limit).await?)
    }
}
