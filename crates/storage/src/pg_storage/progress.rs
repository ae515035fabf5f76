//! ProgressStore implementation for PgStorage.
//!
//! One transaction per step submission: insert the event (idempotent via the
//! submission-id unique constraint), then fold the payload into the case
//! projection. A duplicate submission commits without touching the
//! projection and reports success.

use super::*;

use async_trait::async_trait;
use caseintake_core::{merge_progress, AppliedStep, DenormFields, StepSubmission};
use serde_json::Value;

use crate::traits::ProgressStore;

#[async_trait]
impl ProgressStore for PgStorage {
    async fn apply_step(&self, submission: &StepSubmission) -> Result<AppliedStep, StorageError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"INSERT INTO case_progress_events
               (submission_id, case_id, step_key, step_version, payload, source, user_agent, ip)
               VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
               ON CONFLICT (submission_id) DO NOTHING"#,
        )
        .bind(&submission.submission_id)
        .bind(&submission.case_id)
        .bind(&submission.step_key)
        .bind(submission.step_version)
        .bind(&submission.payload)
        .bind(&submission.source)
        .bind(&submission.user_agent)
        .bind(&submission.ip)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        if !inserted {
            // Already-applied submission id: the projection must not move.
            tx.commit().await?;
            tracing::debug!(
                submission_id = %submission.submission_id,
                case_id = %submission.case_id,
                "duplicate submission, treated as applied"
            );
            return Ok(AppliedStep {
                case_id: submission.case_id.clone(),
                current_step: submission.step_key.clone(),
                submission_id: submission.submission_id.clone(),
                deduplicated: true,
            });
        }

        let existing: Option<Value> =
            sqlx::query_scalar("SELECT progress FROM cases WHERE case_id = $1 FOR UPDATE")
                .bind(&submission.case_id)
                .fetch_optional(&mut *tx)
                .await?;

        let progress =
            merge_progress(existing.as_ref(), &submission.step_key, &submission.payload);
        let denorm = DenormFields::from_step(&submission.step_key, &submission.payload);

        if existing.is_some() {
            // Only the submitted step's denormalized columns change; NULL
            // params keep the stored value via COALESCE.
            sqlx::query(
                r#"UPDATE cases SET
                       current_step = $2,
                       progress = $3,
                       contact_email = COALESCE($4, contact_email),
                       contact_phone = COALESCE($5, contact_phone),
                       hospital_name = COALESCE($6, hospital_name),
                       balance_amount = COALESCE($7, balance_amount),
                       in_collections = COALESCE($8, in_collections),
                       updated_at = NOW()
                   WHERE case_id = $1"#,
            )
            .bind(&submission.case_id)
            .bind(&submission.step_key)
            .bind(&progress)
            .bind(&denorm.contact_email)
            .bind(&denorm.contact_phone)
            .bind(&denorm.hospital_name)
            .bind(denorm.balance_amount)
            .bind(denorm.in_collections)
            .execute(&mut *tx)
            .await?;
        } else {
            // First event for this case. The conflict arm covers the narrow
            // race where two first events commit concurrently: JSONB || is
            // the same shallow per-key replace as merge_progress.
            sqlx::query(
                r#"INSERT INTO cases
                   (case_id, current_step, progress, contact_email, contact_phone,
                    hospital_name, balance_amount, in_collections)
                   VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
                   ON CONFLICT (case_id) DO UPDATE SET
                       current_step = excluded.current_step,
                       progress = cases.progress || excluded.progress,
                       contact_email = COALESCE(excluded.contact_email, cases.contact_email),
                       contact_phone = COALESCE(excluded.contact_phone, cases.contact_phone),
                       hospital_name = COALESCE(excluded.hospital_name, cases.hospital_name),
                       balance_amount = COALESCE(excluded.balance_amount, cases.balance_amount),
                       in_collections = COALESCE(excluded.in_collections, cases.in_collections),
                       updated_at = NOW()"#,
            )
            .bind(&submission.case_id)
            .bind(&submission.step_key)
            .bind(&progress)
            .bind(&denorm.contact_email)
            .bind(&denorm.contact_phone)
            .bind(&denorm.hospital_name)
            .bind(denorm.balance_amount)
            .bind(denorm.in_collections)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(AppliedStep {
            case_id: submission.case_id.clone(),
            current_step: submission.step_key.clone(),
            submission_id: submission.submission_id.clone(),
            deduplicated: false,
        })
    }

    async fn get_case(&self, case_id: &str) -> Result<Option<Case>, StorageError> {
        let row = sqlx::query(&format!("SELECT {CASE_COLUMNS} FROM cases WHERE case_id = $1"))
            .bind(case_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_case(&r)).transpose()
    }
}
