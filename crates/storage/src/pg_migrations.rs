//! PostgreSQL schema migrations for caseintake storage.

use sqlx::PgPool;

/// Run all PostgreSQL migrations. Statements are idempotent and executed at
/// every startup.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS case_progress_events (
            id BIGSERIAL PRIMARY KEY,
            submission_id TEXT NOT NULL UNIQUE,
            case_id TEXT NOT NULL,
            step_key TEXT NOT NULL,
            step_version INTEGER NOT NULL DEFAULT 1,
            payload JSONB NOT NULL,
            received_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            source TEXT,
            user_agent TEXT,
            ip TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cpe_case ON case_progress_events (case_id)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_cpe_received ON case_progress_events (received_at DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cases (
            case_id TEXT PRIMARY KEY,
            current_step TEXT NOT NULL,
            progress JSONB NOT NULL DEFAULT '{}',
            contact_email TEXT,
            contact_phone TEXT,
            hospital_name TEXT,
            balance_amount DOUBLE PRECISION,
            in_collections BOOLEAN,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cases_updated ON cases (updated_at DESC)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cases_email ON cases (contact_email)")
        .execute(pool)
        .await?;

    // Hospital reference data for autocomplete; rows are loaded out of band.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS hospitals (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_hospitals_name_lower
         ON hospitals (LOWER(name) text_pattern_ops)",
    )
    .execute(pool)
    .await?;

    tracing::info!("PostgreSQL migrations completed");
    Ok(())
}
