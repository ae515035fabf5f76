//! Shared constants for caseintake.
//!
//! Centralizes tuning knobs that would otherwise be duplicated across crates.

/// Maximum serialized size of one step payload in bytes. The JSONB column has
/// no bound of its own, so the cap is enforced before any write.
pub const MAX_STEP_PAYLOAD_BYTES: usize = 64 * 1024;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Upper bound on one sheet mirror write before the orchestrator stops
/// waiting and degrades it to a warning.
pub const MIRROR_TIMEOUT_SECS: u64 = 15;

/// Per-request timeout for spreadsheet API calls in seconds.
pub const SHEETS_HTTP_TIMEOUT_SECS: u64 = 10;

/// Per-request timeout for analytics / email forwarding calls in seconds.
pub const OUTBOUND_HTTP_TIMEOUT_SECS: u64 = 5;

/// Lifetime of an issued upload URL in seconds.
pub const UPLOAD_URL_TTL_SECS: u64 = 900;

/// Maximum accepted upload size in bytes.
pub const MAX_UPLOAD_SIZE_BYTES: u64 = 20 * 1024 * 1024;

/// Default number of hospital autocomplete suggestions.
pub const HOSPITAL_SUGGEST_DEFAULT_LIMIT: usize = 10;

/// Upper bound on hospital autocomplete suggestions per request.
pub const HOSPITAL_SUGGEST_MAX_LIMIT: usize = 50;
