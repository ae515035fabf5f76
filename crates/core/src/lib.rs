//! Core types and pure logic for caseintake
//!
//! This crate contains domain types and side-effect-free logic shared across
//! all other crates: case/event types, step validation, progress folding.

mod case;
mod constants;
mod env_config;
mod progress;
mod validate;

pub use case::*;
pub use constants::*;
pub use env_config::*;
pub use progress::*;
pub use validate::*;
