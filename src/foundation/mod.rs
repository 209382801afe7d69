//! Core validation types
//!
//! The fundamental building blocks shared by the schema builder and the
//! validation engine:
//!
//! - [`ValidationError`] — one failed check, with a stable code, the fixed
//!   French message, and the parameters it was built from
//! - [`ValidationReport`] — per-field outcome of a validation pass
//! - [`SchemaBuilderError`] — fatal builder misuse

pub mod error;
pub mod report;

pub use error::{ErrorParams, SchemaBuilderError, ValidationError};
pub use report::ValidationReport;
