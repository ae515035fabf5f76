//! Signed upload-URL issuance for caseintake
//!
//! Issues short-lived write-capable object-storage URLs for bill documents
//! and mints an opaque token binding each upload to its case, so the later
//! ingestion path can reject uploads claimed against the wrong case.

mod error;
mod issuer;
mod token;

pub use error::UploadError;
pub use issuer::{IssuedUpload, UploadIssuer};
pub use token::{mint_upload_token, verify_upload_token};
