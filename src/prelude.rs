//! Prelude module for convenient imports.
//!
//! ```
//! use fluent_validator::prelude::*;
//!
//! let schema = Validator::new().field("name").string().required();
//! ```

pub use crate::foundation::{ErrorParams, SchemaBuilderError, ValidationError, ValidationReport};
pub use crate::schema::{
    ConditionalRule, CustomFn, CustomOutcome, FieldKind, FieldRule, RuleOverride, TransformFn,
    Validator,
};
