//! Storage layer for caseintake
//!
//! PostgreSQL-backed progress store: an append-only step-submission event
//! log plus the per-case current-state projection, applied as one
//! transaction. Idempotency rides on the event table's submission-id unique
//! constraint.

mod error;
mod pg_migrations;
mod pg_storage;
pub mod traits;

pub use error::StorageError;
pub use pg_storage::PgStorage;
pub use traits::{HospitalStore, ProgressStore};
