//! Single-locale (French) message catalog.
//!
//! Every user-facing failure message lives here so the wording is defined in
//! exactly one place. The library ships one fixed locale; `ValidationError`
//! codes are the stable surface for callers that need their own wording.

use serde_json::Value;

use crate::schema::rule::FieldKind;

pub(crate) const REQUIRED: &str = "Ce champ est requis";
pub(crate) const INVALID_DATE: &str = "Le format de date est invalide";
pub(crate) const FUTURE_REQUIRED: &str = "La date doit être dans le futur";
pub(crate) const PAST_REQUIRED: &str = "La date doit être dans le passé";
pub(crate) const PATTERN_MISMATCH: &str = "La valeur ne correspond pas au format requis";
pub(crate) const CUSTOM_FAILED: &str = "Validation personnalisée échouée";

pub(crate) fn invalid_type(expected: FieldKind) -> String {
    format!("Le type doit être {expected}")
}

pub(crate) fn must_equal(expected: &Value) -> String {
    format!("La valeur doit être égale à {}", display_value(expected))
}

pub(crate) fn must_differ(forbidden: &Value) -> String {
    format!(
        "La valeur ne doit pas être égale à {}",
        display_value(forbidden)
    )
}

pub(crate) fn one_of(allowed: &[Value]) -> String {
    format!(
        "La valeur doit être l'une des suivantes: {}",
        join_values(allowed)
    )
}

pub(crate) fn none_of(forbidden: &[Value]) -> String {
    format!(
        "La valeur ne doit pas être l'une des suivantes: {}",
        join_values(forbidden)
    )
}

pub(crate) fn min_bound(min: f64) -> String {
    format!("La valeur minimale est {min}")
}

pub(crate) fn max_bound(max: f64) -> String {
    format!("La valeur maximale est {max}")
}

/// Renders a value the way it appears inside a message: strings bare
/// (no quotes), everything else in its compact JSON form.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn join_values(values: &[Value]) -> String {
    values
        .iter()
        .map(display_value)
        .collect::<Vec<_>>()
        .join(", ")
}
