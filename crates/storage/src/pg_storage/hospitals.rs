//! HospitalStore implementation for PgStorage.

use super::*;

use async_trait::async_trait;

use crate::traits::HospitalStore;

#[async_trait]
impl HospitalStore for PgStorage {
    async fn search_hospitals(
        &self,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<String>, StorageError> {
        let pattern = format!("{}%", escape_like(&prefix.to_lowercase()));
        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM hospitals WHERE LOWER(name) LIKE $1 ORDER BY name LIMIT $2",
        )
        .bind(&pattern)
        .bind(usize_to_i64(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }
}
