//! The result of applying a schema to one data record.

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Value, json};

use super::error::ValidationError;

// ============================================================================
// VALIDATION REPORT
// ============================================================================

/// Per-field outcome of a validation pass.
///
/// Holds at most one error per field, keyed by field name in schema insertion
/// order. When several checks fail for the same field, the engine keeps the
/// last one (last-check-wins).
///
/// # Examples
///
/// ```
/// use fluent_validator::prelude::*;
/// use serde_json::json;
///
/// let schema = Validator::new().field("age").number().required();
/// let report = schema.validate_json(&json!({}));
///
/// assert!(!report.is_valid());
/// assert_eq!(report.message("age"), Some("Ce champ est requis"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: IndexMap<String, ValidationError>,
}

impl ValidationReport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stores `error` for `field`, replacing any earlier error for it.
    pub(crate) fn record(&mut self, field: impl Into<String>, error: ValidationError) {
        self.errors.insert(field.into(), error);
    }

    /// True iff no field produced an error.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All errors, keyed by field name in schema insertion order.
    #[must_use]
    pub fn errors(&self) -> &IndexMap<String, ValidationError> {
        &self.errors
    }

    /// The error recorded for `field`, if any.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&ValidationError> {
        self.errors.get(field)
    }

    /// The message recorded for `field`, if any.
    #[must_use]
    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|e| e.message.as_ref())
    }

    /// Number of fields that produced an error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True iff no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Interchange rendering: `{"isValid": bool, "errors": {field: message}}`.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        let errors: serde_json::Map<String, Value> = self
            .errors
            .iter()
            .map(|(field, error)| (field.clone(), Value::String(error.message.to_string())))
            .collect();

        json!({
            "isValid": self.is_valid(),
            "errors": errors,
        })
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "validation passed");
        }

        writeln!(f, "validation failed with {} error(s):", self.errors.len())?;
        for (field, error) in &self.errors {
            writeln!(f, "  {field}: {}", error.message)?;
        }
        Ok(())
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn recording_twice_keeps_the_last_error() {
        let mut report = ValidationReport::new();
        report.record("name", ValidationError::below_min(3.0));
        report.record("name", ValidationError::pattern_mismatch());

        assert_eq!(report.len(), 1);
        assert_eq!(
            report.message("name"),
            Some("La valeur ne correspond pas au format requis")
        );
    }

    #[test]
    fn errors_keep_insertion_order() {
        let mut report = ValidationReport::new();
        report.record("b", ValidationError::required());
        report.record("a", ValidationError::required());

        let fields: Vec<&str> = report.errors().keys().map(String::as_str).collect();
        assert_eq!(fields, ["b", "a"]);
    }

    #[test]
    fn json_rendering_exposes_messages_only() {
        let mut report = ValidationReport::new();
        report.record("age", ValidationError::required());

        let rendered = report.to_json_value();
        assert_eq!(rendered["isValid"], false);
        assert_eq!(rendered["errors"]["age"], "Ce champ est requis");
    }

    #[test]
    fn serialize_matches_json_rendering() {
        let mut report = ValidationReport::new();
        report.record("age", ValidationError::required());

        let serialized = serde_json::to_value(&report).unwrap();
        assert_eq!(serialized, report.to_json_value());
    }
}
