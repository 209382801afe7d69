//! Error types for validation failures and builder misuse.
//!
//! Validation failures are plain values carried inside a
//! [`ValidationReport`](super::report::ValidationReport); they are never
//! returned as `Err`. All string fields use `Cow<'static, str>` for
//! zero-allocation in the common case of static codes and messages.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;
use smallvec::SmallVec;

use crate::messages;
use crate::schema::rule::FieldKind;

/// Ordered key-value parameters attached to an error (typically 0-2).
pub type ErrorParams = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single failed check for one field.
///
/// Carries a stable machine-readable `code` alongside the fixed French
/// `message`, plus the parameters the message was built from so callers can
/// re-render the failure in their own wording.
///
/// # Examples
///
/// ```
/// use fluent_validator::foundation::ValidationError;
///
/// let error = ValidationError::below_min(3.0);
/// assert_eq!(error.code, "min");
/// assert_eq!(error.message, "La valeur minimale est 3");
/// assert_eq!(error.param("min"), Some("3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code for programmatic handling.
    ///
    /// Examples: "required", "invalid_type", "pattern"
    pub code: Cow<'static, str>,

    /// Human-readable message in the library's single locale.
    pub message: Cow<'static, str>,

    /// Parameters the message was built from.
    pub params: ErrorParams,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: ErrorParams::new(),
        }
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;

        if !self.params.is_empty() {
            write!(f, " (")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, ")")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================
// One constructor per engine check, so the French wording and the error code
// stay paired in a single place.

impl ValidationError {
    /// A required field was absent, null, or the empty string.
    #[must_use]
    pub fn required() -> Self {
        Self::new("required", messages::REQUIRED)
    }

    /// The value's runtime type did not match the declared kind.
    #[must_use]
    pub fn invalid_type(expected: FieldKind) -> Self {
        Self::new("invalid_type", messages::invalid_type(expected))
            .with_param("expected", expected.as_str())
    }

    /// A date-kind value was not parseable as a date.
    #[must_use]
    pub fn invalid_date() -> Self {
        Self::new("invalid_date", messages::INVALID_DATE)
    }

    /// The value differed from the mandated value.
    #[must_use]
    pub fn must_equal(expected: &Value) -> Self {
        Self::new("equals", messages::must_equal(expected))
            .with_param("expected", messages::display_value(expected))
    }

    /// The value matched the forbidden value.
    #[must_use]
    pub fn must_differ(forbidden: &Value) -> Self {
        Self::new("not_equals", messages::must_differ(forbidden))
            .with_param("forbidden", messages::display_value(forbidden))
    }

    /// The value was outside the allowed set.
    #[must_use]
    pub fn not_in_set(allowed: &[Value]) -> Self {
        Self::new("is_in", messages::one_of(allowed))
            .with_param("allowed", messages::join_values(allowed))
    }

    /// The value was inside the forbidden set.
    #[must_use]
    pub fn in_forbidden_set(forbidden: &[Value]) -> Self {
        Self::new("not_in", messages::none_of(forbidden))
            .with_param("forbidden", messages::join_values(forbidden))
    }

    /// The date was not strictly in the future.
    #[must_use]
    pub fn future_required() -> Self {
        Self::new("future", messages::FUTURE_REQUIRED)
    }

    /// The date was not strictly in the past.
    #[must_use]
    pub fn past_required() -> Self {
        Self::new("past", messages::PAST_REQUIRED)
    }

    /// The value's measure fell below the minimum bound.
    #[must_use]
    pub fn below_min(min: f64) -> Self {
        Self::new("min", messages::min_bound(min)).with_param("min", min.to_string())
    }

    /// The value's measure exceeded the maximum bound.
    #[must_use]
    pub fn above_max(max: f64) -> Self {
        Self::new("max", messages::max_bound(max)).with_param("max", max.to_string())
    }

    /// The value did not match the required pattern.
    #[must_use]
    pub fn pattern_mismatch() -> Self {
        Self::new("pattern", messages::PATTERN_MISMATCH)
    }

    /// A custom check failed without supplying its own message.
    #[must_use]
    pub fn custom_failed() -> Self {
        Self::new("custom", messages::CUSTOM_FAILED)
    }

    /// A custom check failed with its own message.
    #[must_use]
    pub fn custom_message(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("custom", message)
    }
}

// ============================================================================
// BUILDER MISUSE
// ============================================================================

/// Fatal misuse of the schema builder.
///
/// Raised (by panic) when a rule modifier is applied before any
/// type-declaring call has created a schema entry to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SchemaBuilderError {
    /// No schema entry exists yet for modifiers to target.
    #[error(
        "no field declared yet: call string(), number(), boolean() or date() \
         before applying rule modifiers"
    )]
    NoActiveRule,
}

// ============================================================================
// TESTS
// ============================================================================
