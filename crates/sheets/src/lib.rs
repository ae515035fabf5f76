//! Spreadsheet mirror client for caseintake
//!
//! Best-effort projection of case state into an external spreadsheet. Column
//! identity is resolved from the sheet's header row on every call, so the
//! sheet can be reorganized by hand without code changes. Every failure here
//! is downgraded to a warning by the service layer; nothing in this crate is
//! allowed to fail a committed submission.

mod client;
mod error;
mod mapping;

pub use client::SheetsClient;
pub use error::SheetsError;
pub use mapping::{
    cell_text, column_letter, field_to_header, header_index_map, headers, is_create_only,
    plan_step_cells,
};
