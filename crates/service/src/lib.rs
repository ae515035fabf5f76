//! Service layer for caseintake
//!
//! Centralizes business logic between the HTTP handlers and the
//! storage/external-API crates.

mod error;
mod hospital_service;
mod mirror;
mod progress_service;

pub use error::ServiceError;
pub use hospital_service::HospitalService;
pub use mirror::CaseMirror;
pub use progress_service::{ProgressService, StepOutcome, SubmitStep};
