//! Schema building blocks: rule descriptors and the fluent builder.

pub mod builder;
pub mod rule;

pub use builder::Validator;
pub use rule::{ConditionalRule, CustomFn, CustomOutcome, FieldKind, FieldRule, RuleOverride, TransformFn};
