//! Rule descriptors accumulated by the schema builder.
//!
//! Each schema field owns exactly one [`FieldRule`]: a struct of explicit
//! optional slots, any subset of which may be set. Conditional overrides are
//! carried as a [`RuleOverride`] (every slot optional, booleans tri-state)
//! and resolved by the engine at validation time.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// FIELD KIND
// ============================================================================

/// The declared runtime type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// JSON string.
    String,
    /// JSON number (integer or float).
    Number,
    /// JSON boolean.
    Boolean,
    /// A string parseable as a date; see the crate docs for accepted formats.
    Date,
}

impl FieldKind {
    /// Lowercase name as used in type-error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
        }
    }

    /// Shape check for the scalar kinds. `Date` only requires a string here;
    /// parseability is the engine's job.
    pub(crate) fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String | FieldKind::Date => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CUSTOM CHECK OUTCOME
// ============================================================================

/// Outcome of a custom check callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomOutcome {
    /// The check passed.
    Pass,
    /// The check failed; the engine supplies the generic message.
    Fail,
    /// The check failed with its own message.
    Message(String),
}

impl From<bool> for CustomOutcome {
    fn from(passed: bool) -> Self {
        if passed {
            CustomOutcome::Pass
        } else {
            CustomOutcome::Fail
        }
    }
}

impl From<&str> for CustomOutcome {
    fn from(message: &str) -> Self {
        CustomOutcome::Message(message.to_owned())
    }
}

impl From<String> for CustomOutcome {
    fn from(message: String) -> Self {
        CustomOutcome::Message(message)
    }
}

// ============================================================================
// CALLBACK TYPES
// ============================================================================

/// A custom check: inspects the (transformed) value and reports an outcome.
pub type CustomFn = Arc<dyn Fn(&Value) -> CustomOutcome + Send + Sync>;

/// A value transform, applied before any checks run. Receives `None` when the
/// field is absent from the record.
pub type TransformFn = Arc<dyn Fn(Option<Value>) -> Option<Value> + Send + Sync>;

// ============================================================================
// CONDITIONAL RULE
// ============================================================================

/// A dependent-field override, resolved at validation time.
///
/// When `data[field] == is`, the `then` override is merged over the base
/// rule for that pass; otherwise `otherwise` is merged if present. The
/// stored schema is never mutated.
#[derive(Clone)]
pub struct ConditionalRule {
    pub(crate) field: String,
    pub(crate) is: Value,
    pub(crate) then: RuleOverride,
    pub(crate) otherwise: Option<RuleOverride>,
}

impl ConditionalRule {
    /// Name of the field the condition reads.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Value the dependent field must equal for `then` to apply.
    #[must_use]
    pub fn expected(&self) -> &Value {
        &self.is
    }

    /// Override applied when the condition holds.
    #[must_use]
    pub fn then(&self) -> &RuleOverride {
        &self.then
    }

    /// Override applied when the condition does not hold, if any.
    #[must_use]
    pub fn otherwise(&self) -> Option<&RuleOverride> {
        self.otherwise.as_ref()
    }
}

impl fmt::Debug for ConditionalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalRule")
            .field("field", &self.field)
            .field("is", &self.is)
            .field("then", &self.then)
            .field("otherwise", &self.otherwise)
            .finish()
    }
}

// ============================================================================
// FIELD RULE
// ============================================================================

/// The full set of constraints attached to one schema field.
///
/// Only `kind` is always set (by the type-declaring builder call); every
/// other slot is optional. Callbacks are `Send + Sync` so a built schema can
/// be shared across threads for read-only validation.
#[derive(Clone)]
pub struct FieldRule {
    pub(crate) kind: FieldKind,
    pub(crate) required: bool,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    pub(crate) pattern: Option<Regex>,
    pub(crate) equals_value: Option<Value>,
    pub(crate) not_equals_value: Option<Value>,
    pub(crate) is_in: Option<Vec<Value>>,
    pub(crate) not_in: Option<Vec<Value>>,
    pub(crate) custom: Option<CustomFn>,
    pub(crate) transform: Option<TransformFn>,
    pub(crate) conditional: Option<ConditionalRule>,
    pub(crate) date_format: Option<String>,
    pub(crate) must_be_future: bool,
    pub(crate) must_be_past: bool,
}

impl FieldRule {
    pub(crate) fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            min: None,
            max: None,
            pattern: None,
            equals_value: None,
            not_equals_value: None,
            is_in: None,
            not_in: None,
            custom: None,
            transform: None,
            conditional: None,
            date_format: None,
            must_be_future: false,
            must_be_past: false,
        }
    }

    /// The declared kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether the field must be present and non-empty.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Minimum bound, if set.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Maximum bound, if set.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Pattern constraint, if set.
    #[must_use]
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Conditional override, if set.
    #[must_use]
    pub fn conditional(&self) -> Option<&ConditionalRule> {
        self.conditional.as_ref()
    }

    /// Advisory date format hint, if set. Not enforced by the engine.
    #[must_use]
    pub fn date_format(&self) -> Option<&str> {
        self.date_format.as_deref()
    }

    /// Returns a copy of this rule with every slot set in `over` replacing
    /// the corresponding slot here. Unset override slots leave the base
    /// untouched; an override can never unset a base slot.
    pub(crate) fn overlay(&self, over: &RuleOverride) -> FieldRule {
        let mut merged = self.clone();

        if let Some(kind) = over.kind {
            merged.kind = kind;
        }
        if let Some(required) = over.required {
            merged.required = required;
        }
        if let Some(min) = over.min {
            merged.min = Some(min);
        }
        if let Some(max) = over.max {
            merged.max = Some(max);
        }
        if let Some(pattern) = &over.pattern {
            merged.pattern = Some(pattern.clone());
        }
        if let Some(equals_value) = &over.equals_value {
            merged.equals_value = Some(equals_value.clone());
        }
        if let Some(not_equals_value) = &over.not_equals_value {
            merged.not_equals_value = Some(not_equals_value.clone());
        }
        if let Some(is_in) = &over.is_in {
            merged.is_in = Some(is_in.clone());
        }
        if let Some(not_in) = &over.not_in {
            merged.not_in = Some(not_in.clone());
        }
        if let Some(custom) = &over.custom {
            merged.custom = Some(Arc::clone(custom));
        }
        if let Some(transform) = &over.transform {
            merged.transform = Some(Arc::clone(transform));
        }
        if let Some(date_format) = &over.date_format {
            merged.date_format = Some(date_format.clone());
        }
        if let Some(must_be_future) = over.must_be_future {
            merged.must_be_future = must_be_future;
        }
        if let Some(must_be_past) = over.must_be_past {
            merged.must_be_past = must_be_past;
        }

        merged
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("equals", &self.equals_value)
            .field("not_equals", &self.not_equals_value)
            .field("is_in", &self.is_in)
            .field("not_in", &self.not_in)
            .field("custom", &self.custom.as_ref().map(|_| "<function>"))
            .field("transform", &self.transform.as_ref().map(|_| "<function>"))
            .field("conditional", &self.conditional)
            .field("date_format", &self.date_format)
            .field("future", &self.must_be_future)
            .field("past", &self.must_be_past)
            .finish()
    }
}

// ============================================================================
// RULE OVERRIDE
// ============================================================================

/// A partial rule used as the `then`/`otherwise` branch of a conditional.
///
/// Every slot is optional, including booleans (tri-state: unset leaves the
/// base rule's flag alone). Built with its own chainable setters:
///
/// ```
/// use fluent_validator::prelude::*;
///
/// let when_business = RuleOverride::new().required(true).min(5);
/// ```
///
/// Overrides carry no nested conditional: a conditional is resolved once per
/// validation pass against the stored rule.
#[derive(Clone, Default)]
pub struct RuleOverride {
    pub(crate) kind: Option<FieldKind>,
    pub(crate) required: Option<bool>,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    pub(crate) pattern: Option<Regex>,
    pub(crate) equals_value: Option<Value>,
    pub(crate) not_equals_value: Option<Value>,
    pub(crate) is_in: Option<Vec<Value>>,
    pub(crate) not_in: Option<Vec<Value>>,
    pub(crate) custom: Option<CustomFn>,
    pub(crate) transform: Option<TransformFn>,
    pub(crate) date_format: Option<String>,
    pub(crate) must_be_future: Option<bool>,
    pub(crate) must_be_past: Option<bool>,
}

impl RuleOverride {
    /// An empty override that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the declared kind.
    #[must_use = "builder methods must be chained or built"]
    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets or clears the required flag.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Replaces the minimum bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, bound: impl Into<f64>) -> Self {
        self.min = Some(bound.into());
        self
    }

    /// Replaces the maximum bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, bound: impl Into<f64>) -> Self {
        self.max = Some(bound.into());
        self
    }

    /// Replaces the pattern constraint.
    #[must_use = "builder methods must be chained or built"]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Replaces the mandated value.
    #[must_use = "builder methods must be chained or built"]
    pub fn equals(mut self, value: impl Into<Value>) -> Self {
        self.equals_value = Some(value.into());
        self
    }

    /// Replaces the forbidden value.
    #[must_use = "builder methods must be chained or built"]
    pub fn not_equals(mut self, value: impl Into<Value>) -> Self {
        self.not_equals_value = Some(value.into());
        self
    }

    /// Replaces the allowed set.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_in(mut self, values: Vec<Value>) -> Self {
        self.is_in = Some(values);
        self
    }

    /// Replaces the forbidden set.
    #[must_use = "builder methods must be chained or built"]
    pub fn not_in(mut self, values: Vec<Value>) -> Self {
        self.not_in = Some(values);
        self
    }

    /// Replaces the custom check.
    #[must_use = "builder methods must be chained or built"]
    pub fn custom(mut self, check: impl Fn(&Value) -> CustomOutcome + Send + Sync + 'static) -> Self {
        self.custom = Some(Arc::new(check));
        self
    }

    /// Replaces the transform.
    ///
    /// Note: the engine applies the *base* rule's transform before resolving
    /// the conditional, so a transform set here only replaces the stored
    /// slot, it does not run for the pass that selected it.
    #[must_use = "builder methods must be chained or built"]
    pub fn transform(
        mut self,
        transform: impl Fn(Option<Value>) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Replaces the advisory date format hint.
    #[must_use = "builder methods must be chained or built"]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// Sets or clears the must-be-future flag.
    #[must_use = "builder methods must be chained or built"]
    pub fn future(mut self, must_be_future: bool) -> Self {
        self.must_be_future = Some(must_be_future);
        self
    }

    /// Sets or clears the must-be-past flag.
    #[must_use = "builder methods must be chained or built"]
    pub fn past(mut self, must_be_past: bool) -> Self {
        self.must_be_past = Some(must_be_past);
        self
    }
}

impl fmt::Debug for RuleOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleOverride")
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("equals", &self.equals_value)
            .field("not_equals", &self.not_equals_value)
            .field("is_in", &self.is_in)
            .field("not_in", &self.not_in)
            .field("custom", &self.custom.as_ref().map(|_| "<function>"))
            .field("transform", &self.transform.as_ref().map(|_| "<function>"))
            .field("date_format", &self.date_format)
            .field("future", &self.must_be_future)
            .field("past", &self.must_be_past)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
