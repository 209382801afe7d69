//! The fluent schema builder.
//!
//! [`Validator`] accumulates an insertion-ordered mapping from field name to
//! [`FieldRule`] through chained calls, then applies it to a data record via
//! [`Validator::validate`].
//!
//! # Targeting semantics
//!
//! The builder is a singleton-cursor state machine. `field(name)` only
//! records a *pending* name; it creates no entry and moves no cursor. A
//! type-declaring call (`string()`, `number()`, `boolean()`, `date()`)
//! appends a new entry — keyed by the pending name if one is set, else by an
//! auto-generated `field_<N>` — and clears the pending name. Every rule
//! modifier targets the **last-inserted** entry, never the pending name:
//!
//! ```
//! use fluent_validator::prelude::*;
//!
//! let schema = Validator::new()
//!     .field("x").string()
//!     .field("y")      // pending only — no entry yet
//!     .required();     // attaches to "x", the last-inserted entry
//!
//! assert!(schema.rule("x").unwrap().is_required());
//! assert!(schema.rule("y").is_none());
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};

use super::rule::{ConditionalRule, CustomOutcome, FieldKind, FieldRule, RuleOverride};
use crate::engine;
use crate::foundation::{SchemaBuilderError, ValidationReport};

// ============================================================================
// VALIDATOR
// ============================================================================

/// A fluent, field-by-field schema validator for JSON records.
///
/// # Examples
///
/// ```
/// use fluent_validator::prelude::*;
/// use regex::Regex;
/// use serde_json::json;
///
/// let schema = Validator::new()
///     .field("username").string().required().min(3).max(50)
///     .pattern(Regex::new("^[a-zA-Z0-9]+$").unwrap());
///
/// let report = schema.validate_json(&json!({ "username": "John123" }));
/// assert!(report.is_valid());
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    fields: IndexMap<String, FieldRule>,
    pending: Option<String>,
}

impl Validator {
    /// An empty validator with no fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Field declaration
    // ------------------------------------------------------------------------

    /// Records `name` as the pending identifier for the next type-declaring
    /// call. Creates no schema entry and does not retarget modifiers.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.pending = Some(name.into());
        self
    }

    /// Declares a string field.
    #[must_use = "builder methods must be chained or built"]
    pub fn string(self) -> Self {
        self.declare(FieldKind::String)
    }

    /// Declares a number field.
    #[must_use = "builder methods must be chained or built"]
    pub fn number(self) -> Self {
        self.declare(FieldKind::Number)
    }

    /// Declares a boolean field.
    #[must_use = "builder methods must be chained or built"]
    pub fn boolean(self) -> Self {
        self.declare(FieldKind::Boolean)
    }

    /// Declares a date field (a string parseable as a date).
    #[must_use = "builder methods must be chained or built"]
    pub fn date(self) -> Self {
        self.declare(FieldKind::Date)
    }

    fn declare(mut self, kind: FieldKind) -> Self {
        let name = self
            .pending
            .take()
            .unwrap_or_else(|| format!("field_{}", self.fields.len()));
        self.fields.insert(name, FieldRule::new(kind));
        self
    }

    // ------------------------------------------------------------------------
    // Rule modifiers — all target the last-inserted entry
    // ------------------------------------------------------------------------

    /// Marks the current field as required: absent, null, and empty-string
    /// values are rejected before any other check runs.
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.active_rule().required = true;
        self
    }

    /// Sets the minimum bound: character count for strings, element count
    /// for arrays, numeric value for numbers.
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, bound: impl Into<f64>) -> Self {
        self.active_rule().min = Some(bound.into());
        self
    }

    /// Sets the maximum bound (same measure as [`min`](Self::min)).
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, bound: impl Into<f64>) -> Self {
        self.active_rule().max = Some(bound.into());
        self
    }

    /// Requires the value to match `pattern`. Non-string values are matched
    /// against their compact JSON rendering.
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.active_rule().pattern = Some(pattern);
        self
    }

    /// Requires the value to equal `value`.
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn equals(mut self, value: impl Into<Value>) -> Self {
        self.active_rule().equals_value = Some(value.into());
        self
    }

    /// Requires the value to differ from `value`.
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn not_equals(mut self, value: impl Into<Value>) -> Self {
        self.active_rule().not_equals_value = Some(value.into());
        self
    }

    /// Requires the value to be a member of `values`.
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_in(mut self, values: Vec<Value>) -> Self {
        self.active_rule().is_in = Some(values);
        self
    }

    /// Requires the value not to be a member of `values`.
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn not_in(mut self, values: Vec<Value>) -> Self {
        self.active_rule().not_in = Some(values);
        self
    }

    /// Attaches a custom check, run last in the check order. A panicking
    /// callback propagates out of `validate`.
    ///
    /// ```
    /// use fluent_validator::prelude::*;
    /// use serde_json::json;
    ///
    /// let schema = Validator::new().string().custom(|v| {
    ///     match v.as_str() {
    ///         Some(s) if s.len() > 2 => CustomOutcome::Pass,
    ///         _ => CustomOutcome::from("too short"),
    ///     }
    /// });
    ///
    /// let report = schema.validate_json(&json!({ "field_0": "a" }));
    /// assert_eq!(report.message("field_0"), Some("too short"));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn custom(mut self, check: impl Fn(&Value) -> CustomOutcome + Send + Sync + 'static) -> Self {
        self.active_rule().custom = Some(Arc::new(check));
        self
    }

    /// Attaches a transform, applied to the raw value (or `None` when the
    /// field is absent) before any checks run.
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn transform(
        mut self,
        transform: impl Fn(Option<Value>) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.active_rule().transform = Some(Arc::new(transform));
        self
    }

    /// Stores a conditional override: when `data[field] == is` at validation
    /// time, `then` is merged over this field's rule for that pass.
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn when_field(
        mut self,
        field: impl Into<String>,
        is: impl Into<Value>,
        then: RuleOverride,
    ) -> Self {
        self.active_rule().conditional = Some(ConditionalRule {
            field: field.into(),
            is: is.into(),
            then,
            otherwise: None,
        });
        self
    }

    /// Like [`when_field`](Self::when_field), with an `otherwise` override
    /// merged when the condition does not hold.
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn when_field_else(
        mut self,
        field: impl Into<String>,
        is: impl Into<Value>,
        then: RuleOverride,
        otherwise: RuleOverride,
    ) -> Self {
        self.active_rule().conditional = Some(ConditionalRule {
            field: field.into(),
            is: is.into(),
            then,
            otherwise: Some(otherwise),
        });
        self
    }

    /// Records an advisory date format hint. Stored for introspection only;
    /// the engine does not enforce it.
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.active_rule().date_format = Some(format.into());
        self
    }

    /// Requires a date field to be strictly in the future.
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn future(mut self) -> Self {
        self.active_rule().must_be_future = true;
        self
    }

    /// Requires a date field to be strictly in the past.
    ///
    /// # Panics
    ///
    /// Panics if no type-declaring call has created an entry yet.
    #[must_use = "builder methods must be chained or built"]
    pub fn past(mut self) -> Self {
        self.active_rule().must_be_past = true;
        self
    }

    /// The modifier target: the most recently inserted entry. `field(...)`
    /// never moves this cursor; only type-declaring calls do.
    #[track_caller]
    fn active_rule(&mut self) -> &mut FieldRule {
        let last = self.fields.len().checked_sub(1);
        match last.and_then(|index| self.fields.get_index_mut(index)) {
            Some((_, rule)) => rule,
            None => panic!("{}", SchemaBuilderError::NoActiveRule),
        }
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// Number of fields in the schema.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True iff the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The rule for `name`, if declared.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.get(name)
    }

    /// All fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// The pending field name, if `field(...)` has been called without a
    /// type-declaring call consuming it yet.
    #[must_use]
    pub fn pending_field(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Validates `data` against the schema.
    ///
    /// Walks the fields in insertion order and reports at most one error per
    /// field (last failing check wins). Data keys absent from the schema are
    /// ignored. The schema itself is never mutated, so repeated calls are
    /// independent.
    #[must_use = "validation result must be checked"]
    pub fn validate(&self, data: &Map<String, Value>) -> ValidationReport {
        engine::run(&self.fields, data)
    }

    /// Validates a JSON value. Non-object values validate like an empty
    /// record: only required fields can fail.
    #[must_use = "validation result must be checked"]
    pub fn validate_json(&self, data: &Value) -> ValidationReport {
        match data.as_object() {
            Some(map) => self.validate(map),
            None => self.validate(&Map::new()),
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({} field(s))", self.fields.len())
    }
}

// ============================================================================
// TESTS
// ============================================================================
