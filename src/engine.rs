//! Single-pass validation engine.
//!
//! Walks a built schema in insertion order and produces a
//! [`ValidationReport`]. Per field the engine reads the value, applies the
//! transform, resolves the conditional override into an effective rule for
//! this pass only, then runs the checks in their fixed order.
//!
//! Two checks are terminal for a field: a required failure and a type
//! failure. Every later check overwrites the previous failure, so the
//! reported message is the *last* failing check's (last-check-wins).

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::foundation::{ValidationError, ValidationReport};
use crate::schema::rule::{CustomOutcome, FieldKind, FieldRule};

pub(crate) fn run(schema: &IndexMap<String, FieldRule>, data: &Map<String, Value>) -> ValidationReport {
    let mut report = ValidationReport::new();

    for (name, rule) in schema {
        if let Some(error) = check_field(name, rule, data) {
            report.record(name.clone(), error);
        }
    }

    report
}

fn check_field(name: &str, rule: &FieldRule, data: &Map<String, Value>) -> Option<ValidationError> {
    let mut value: Option<Value> = data.get(name).cloned();

    // The base rule's transform runs before the conditional is resolved,
    // so the condition and the checks both see the transformed value.
    if let Some(transform) = &rule.transform {
        value = transform(value);
    }

    let effective = resolve_conditional(rule, data);
    let rule = effective.as_ref().map_or(rule, |merged| merged);

    if rule.required && is_missing(value.as_ref()) {
        return Some(ValidationError::required());
    }

    // Absent and null values skip every remaining check.
    let value = match &value {
        None | Some(Value::Null) => return None,
        Some(present) => present,
    };

    run_checks(rule, value)
}

/// Resolves the conditional override, if any, into a merged rule for this
/// pass. The stored schema is left untouched; repeated `validate` calls are
/// independent.
fn resolve_conditional(rule: &FieldRule, data: &Map<String, Value>) -> Option<FieldRule> {
    let conditional = rule.conditional.as_ref()?;

    match data.get(&conditional.field) {
        Some(actual) if value_eq(actual, &conditional.is) => {
            Some(rule.overlay(&conditional.then))
        }
        _ => conditional
            .otherwise
            .as_ref()
            .map(|otherwise| rule.overlay(otherwise)),
    }
}

fn run_checks(rule: &FieldRule, value: &Value) -> Option<ValidationError> {
    // Type check first; a mismatch is terminal for the field.
    let parsed_date = match rule.kind {
        FieldKind::Date => match parse_date(value) {
            Some(parsed) => Some(parsed),
            None => return Some(ValidationError::invalid_date()),
        },
        kind => {
            if !kind.matches(value) {
                return Some(ValidationError::invalid_type(kind));
            }
            None
        }
    };

    let mut failure: Option<ValidationError> = None;

    if let Some(expected) = &rule.equals_value {
        if !value_eq(value, expected) {
            failure = Some(ValidationError::must_equal(expected));
        }
    }

    if let Some(forbidden) = &rule.not_equals_value {
        if value_eq(value, forbidden) {
            failure = Some(ValidationError::must_differ(forbidden));
        }
    }

    if let Some(allowed) = &rule.is_in {
        if !allowed.iter().any(|candidate| value_eq(value, candidate)) {
            failure = Some(ValidationError::not_in_set(allowed));
        }
    }

    if let Some(forbidden) = &rule.not_in {
        if forbidden.iter().any(|candidate| value_eq(value, candidate)) {
            failure = Some(ValidationError::in_forbidden_set(forbidden));
        }
    }

    if let Some(parsed) = parsed_date {
        let now = Utc::now();
        if rule.must_be_future && parsed <= now {
            failure = Some(ValidationError::future_required());
        }
        if rule.must_be_past && parsed >= now {
            failure = Some(ValidationError::past_required());
        }
    }

    if let Some(min) = rule.min {
        if let Some(measured) = measure(value) {
            if measured < min {
                failure = Some(ValidationError::below_min(min));
            }
        }
    }

    if let Some(max) = rule.max {
        if let Some(measured) = measure(value) {
            if measured > max {
                failure = Some(ValidationError::above_max(max));
            }
        }
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(&text_of(value)) {
            failure = Some(ValidationError::pattern_mismatch());
        }
    }

    if let Some(custom) = &rule.custom {
        match custom(value) {
            CustomOutcome::Pass => {}
            CustomOutcome::Message(message) => {
                failure = Some(ValidationError::custom_message(message));
            }
            CustomOutcome::Fail => failure = Some(ValidationError::custom_failed()),
        }
    }

    failure
}

/// Missing for the required check: absent key, explicit null, or the empty
/// string. Only the first two skip the remaining checks.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}

/// The measure used by the min/max bounds: character count for strings,
/// element count for arrays, numeric value for numbers. Other shapes are
/// unmeasured and pass the bounds.
#[allow(clippy::cast_precision_loss)]
fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::String(text) => Some(text.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        Value::Number(number) => number.as_f64(),
        _ => None,
    }
}

/// Deep equality with numeric coercion: integer and float representations of
/// the same number compare equal.
#[allow(clippy::float_cmp)]
fn value_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => match (l.as_f64(), r.as_f64()) {
            (Some(l), Some(r)) => l == r,
            _ => l == r,
        },
        _ => left == right,
    }
}

/// String rendering used by the pattern check: strings bare, everything else
/// in its compact JSON form.
fn text_of(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Parses a date-kind value. Accepts RFC 3339 as well as the common
/// `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`, and `YYYY-MM-DD` shapes
/// (naive forms are taken as UTC).
fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc());
        }
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

// ============================================================================
// TESTS
// ============================================================================
