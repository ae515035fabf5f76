//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

mod hospitals;
mod progress;

use caseintake_core::{
    Case, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connect, bound the pool, and run migrations.
    ///
    /// # Errors
    /// Returns an error if the pool cannot connect or a migration fails.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

pub(crate) fn row_to_case(row: &sqlx::postgres::PgRow) -> Result<Case, StorageError> {
    Ok(Case {
        case_id: row.try_get("case_id")?,
        current_step: row.try_get("current_step")?,
        progress: row.try_get("progress")?,
        contact_email: row.try_get("contact_email")?,
        contact_phone: row.try_get("contact_phone")?,
        hospital_name: row.try_get("hospital_name")?,
        balance_amount: row.try_get("balance_amount")?,
        in_collections: row.try_get("in_collections")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Convert `usize` to `i64` for SQL LIMIT binds.
/// Saturates to `i64::MAX` on overflow (only possible on 128-bit targets).
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

pub(crate) const CASE_COLUMNS: &str =
    "case_id, current_step, progress, contact_email, contact_phone,
     hospital_name, balance_amount, in_collections, created_at, updated_at";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%_done\\"), "100\\%\\_done\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn usize_to_i64_saturates() {
        assert_eq!(usize_to_i64(10), 10);
        assert_eq!(usize_to_i64(usize::MAX), i64::MAX);
    }
}
