//! # fluent-validator
//!
//! Fluent, field-by-field schema validation for JSON records.
//!
//! Build a schema through chained calls, then apply it to a data record to
//! get a pass/fail [`ValidationReport`](foundation::ValidationReport) with at
//! most one (French) error message per field.
//!
//! ## Quick Start
//!
//! ```
//! use fluent_validator::prelude::*;
//! use regex::Regex;
//! use serde_json::json;
//!
//! let schema = Validator::new()
//!     .field("username").string().required().min(3).max(50)
//!     .pattern(Regex::new("^[a-zA-Z0-9]+$").unwrap())
//!     .field("age").number().min(18);
//!
//! let report = schema.validate_json(&json!({
//!     "username": "John123",
//!     "age": 27,
//! }));
//! assert!(report.is_valid());
//!
//! let report = schema.validate_json(&json!({ "age": 15 }));
//! assert_eq!(report.message("username"), Some("Ce champ est requis"));
//! assert_eq!(report.message("age"), Some("La valeur minimale est 18"));
//! ```
//!
//! ## Checks
//!
//! Per field, in fixed order: required, type (both terminal on failure),
//! equals / not-equals, set membership, date future/past, min/max bounds
//! (length for strings and arrays, value for numbers), pattern, custom.
//! When several non-terminal checks fail, the last one's message is kept.
//!
//! Date fields accept RFC 3339 strings plus `YYYY-MM-DDTHH:MM:SS`,
//! `YYYY-MM-DD HH:MM:SS`, and `YYYY-MM-DD` (naive forms taken as UTC).
//!
//! ## Targeting semantics
//!
//! Rule modifiers always target the most recently *inserted* field, never
//! the name most recently passed to `field(...)` — see
//! [`schema::builder`] for the exact cursor rules.
//!
//! ## Conditional rules
//!
//! [`when_field`](schema::Validator::when_field) stores an override that is
//! resolved against the data record at validation time:
//!
//! ```
//! use fluent_validator::prelude::*;
//! use serde_json::json;
//!
//! let schema = Validator::new()
//!     .field("company").string()
//!     .when_field("is_business", true, RuleOverride::new().required(true));
//!
//! assert!(!schema.validate_json(&json!({ "is_business": true })).is_valid());
//! assert!(schema.validate_json(&json!({ "is_business": false })).is_valid());
//! ```
//!
//! The stored schema is never mutated: repeated `validate` calls on one
//! `Validator` are independent, and a built schema is `Send + Sync` for
//! read-only validation from several threads.

mod engine;
pub mod foundation;
mod messages;
pub mod prelude;
pub mod schema;
