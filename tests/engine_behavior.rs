//! Engine behaviour: check order, messages, and termination rules.

use fluent_validator::prelude::*;
use pretty_assertions::assert_eq;
use regex::Regex;
use rstest::rstest;
use serde_json::{Value, json};

// ============================================================================
// REQUIRED
// ============================================================================

#[test]
fn required_rejects_absent_null_and_empty() {
    let schema = Validator::new().field("name").string().required();

    for data in [json!({}), json!({ "name": null }), json!({ "name": "" })] {
        let report = schema.validate_json(&data);
        assert_eq!(report.message("name"), Some("Ce champ est requis"));
    }
}

#[test]
fn required_failure_stops_the_field() {
    // min would also fail on "", but required is terminal.
    let schema = Validator::new().field("name").string().required().min(5);

    let report = schema.validate_json(&json!({ "name": "" }));
    assert_eq!(report.message("name"), Some("Ce champ est requis"));
}

#[test]
fn optional_fields_skip_checks_when_absent_or_null() {
    let schema = Validator::new().field("nick").string().min(3);

    assert!(schema.validate_json(&json!({})).is_valid());
    assert!(schema.validate_json(&json!({ "nick": null })).is_valid());
}

#[test]
fn optional_empty_string_is_still_checked() {
    let schema = Validator::new().field("nick").string().min(3);

    let report = schema.validate_json(&json!({ "nick": "" }));
    assert_eq!(report.message("nick"), Some("La valeur minimale est 3"));
}

// ============================================================================
// TYPE CHECK
// ============================================================================

#[rstest]
#[case::string("string", json!(12))]
#[case::number("number", json!("abc"))]
#[case::boolean("boolean", json!(3))]
fn type_mismatch_names_the_expected_kind(#[case] kind: &str, #[case] value: Value) {
    let schema = match kind {
        "string" => Validator::new().string(),
        "number" => Validator::new().number(),
        _ => Validator::new().boolean(),
    };

    let report = schema.validate_json(&json!({ "field_0": value }));
    assert_eq!(
        report.message("field_0"),
        Some(format!("Le type doit être {kind}").as_str())
    );
}

#[test]
fn type_failure_stops_the_field() {
    let schema = Validator::new().field("age").number().min(18);

    let report = schema.validate_json(&json!({ "age": "old" }));
    assert_eq!(report.message("age"), Some("Le type doit être number"));
}

#[test]
fn matching_types_pass() {
    let schema = Validator::new()
        .field("name").string()
        .field("age").number()
        .field("admin").boolean();

    let report = schema.validate_json(&json!({
        "name": "Ada",
        "age": 36,
        "admin": false,
    }));
    assert!(report.is_valid());
}

// ============================================================================
// BOUNDS
// ============================================================================

#[test]
fn string_bounds_use_character_count() {
    let schema = Validator::new().string().min(3).max(5);

    let too_short = schema.validate_json(&json!({ "field_0": "ab" }));
    assert_eq!(too_short.message("field_0"), Some("La valeur minimale est 3"));

    let too_long = schema.validate_json(&json!({ "field_0": "abcdef" }));
    assert_eq!(too_long.message("field_0"), Some("La valeur maximale est 5"));

    assert!(schema.validate_json(&json!({ "field_0": "abc" })).is_valid());
}

#[test]
fn numeric_bounds_use_the_value() {
    let schema = Validator::new().field("age").number().min(18).max(99);

    assert!(schema.validate_json(&json!({ "age": 27 })).is_valid());
    assert_eq!(
        schema.validate_json(&json!({ "age": 12 })).message("age"),
        Some("La valeur minimale est 18")
    );
    assert_eq!(
        schema.validate_json(&json!({ "age": 120 })).message("age"),
        Some("La valeur maximale est 99")
    );
}

#[test]
fn fractional_bounds_render_plainly() {
    let schema = Validator::new().field("ratio").number().max(0.5);

    let report = schema.validate_json(&json!({ "ratio": 0.75 }));
    assert_eq!(report.message("ratio"), Some("La valeur maximale est 0.5"));
}

// ============================================================================
// PATTERN
// ============================================================================

#[test]
fn pattern_checks_the_string_value() {
    let schema = Validator::new()
        .string()
        .pattern(Regex::new("^[a-z]+$").unwrap());

    assert!(schema.validate_json(&json!({ "field_0": "abc" })).is_valid());

    let report = schema.validate_json(&json!({ "field_0": "ABC" }));
    assert_eq!(
        report.message("field_0"),
        Some("La valeur ne correspond pas au format requis")
    );
}

// ============================================================================
// EQUALITY AND SETS
// ============================================================================

#[test]
fn equals_mandates_the_exact_value() {
    let schema = Validator::new().field("role").string().equals("admin");

    assert!(schema.validate_json(&json!({ "role": "admin" })).is_valid());
    assert_eq!(
        schema.validate_json(&json!({ "role": "guest" })).message("role"),
        Some("La valeur doit être égale à admin")
    );
}

#[test]
fn equals_coerces_numeric_representations() {
    let schema = Validator::new().field("count").number().equals(1);

    assert!(schema.validate_json(&json!({ "count": 1.0 })).is_valid());
}

#[test]
fn not_equals_forbids_one_value() {
    let schema = Validator::new().field("name").string().not_equals("root");

    assert!(schema.validate_json(&json!({ "name": "alice" })).is_valid());
    assert_eq!(
        schema.validate_json(&json!({ "name": "root" })).message("name"),
        Some("La valeur ne doit pas être égale à root")
    );
}

#[test]
fn is_in_lists_the_allowed_values() {
    let schema = Validator::new()
        .field("color")
        .string()
        .is_in(vec![json!("red"), json!("green"), json!("blue")]);

    assert!(schema.validate_json(&json!({ "color": "red" })).is_valid());
    assert_eq!(
        schema.validate_json(&json!({ "color": "pink" })).message("color"),
        Some("La valeur doit être l'une des suivantes: red, green, blue")
    );
}

#[test]
fn not_in_lists_the_forbidden_values() {
    let schema = Validator::new()
        .field("name")
        .string()
        .not_in(vec![json!("admin"), json!("root")]);

    assert!(schema.validate_json(&json!({ "name": "alice" })).is_valid());
    assert_eq!(
        schema.validate_json(&json!({ "name": "root" })).message("name"),
        Some("La valeur ne doit pas être l'une des suivantes: admin, root")
    );
}

// ============================================================================
// DATES
// ============================================================================

#[test]
fn unparseable_dates_are_rejected() {
    let schema = Validator::new().field("when").date();

    assert!(schema.validate_json(&json!({ "when": "2024-06-01" })).is_valid());

    let report = schema.validate_json(&json!({ "when": "soon" }));
    assert_eq!(report.message("when"), Some("Le format de date est invalide"));
}

#[test]
fn non_string_dates_are_rejected() {
    let schema = Validator::new().field("when").date();

    let report = schema.validate_json(&json!({ "when": 20240601 }));
    assert_eq!(report.message("when"), Some("Le format de date est invalide"));
}

#[test]
fn future_requires_a_later_date() {
    let schema = Validator::new().field("when").date().future();

    assert!(schema.validate_json(&json!({ "when": "2100-01-01" })).is_valid());
    assert_eq!(
        schema.validate_json(&json!({ "when": "2000-01-01" })).message("when"),
        Some("La date doit être dans le futur")
    );
}

#[test]
fn past_requires_an_earlier_date() {
    let schema = Validator::new().field("when").date().past();

    assert!(schema.validate_json(&json!({ "when": "2000-01-01" })).is_valid());
    assert_eq!(
        schema.validate_json(&json!({ "when": "2100-01-01" })).message("when"),
        Some("La date doit être dans le passé")
    );
}

// ============================================================================
// CUSTOM AND TRANSFORM
// ============================================================================

#[test]
fn custom_message_is_reported_verbatim() {
    let schema = Validator::new().string().custom(|value| match value.as_str() {
        Some(text) if text.len() > 2 => CustomOutcome::Pass,
        _ => CustomOutcome::from("too short"),
    });

    assert!(schema.validate_json(&json!({ "field_0": "abcd" })).is_valid());
    assert_eq!(
        schema.validate_json(&json!({ "field_0": "a" })).message("field_0"),
        Some("too short")
    );
}

#[test]
fn custom_fail_uses_the_generic_message() {
    let schema = Validator::new().number().custom(|_| CustomOutcome::Fail);

    let report = schema.validate_json(&json!({ "field_0": 1 }));
    assert_eq!(
        report.message("field_0"),
        Some("Validation personnalisée échouée")
    );
}

#[test]
#[should_panic(expected = "boom")]
fn panicking_custom_check_propagates() {
    let schema = Validator::new().string().custom(|_| panic!("boom"));
    let _ = schema.validate_json(&json!({ "field_0": "x" }));
}

#[test]
fn transform_runs_before_every_check() {
    let schema = Validator::new()
        .field("name")
        .string()
        .required()
        .transform(|value| {
            value.map(|v| match v {
                Value::String(text) => Value::String(text.trim().to_owned()),
                other => other,
            })
        });

    // Whitespace trims down to empty, which required rejects.
    let report = schema.validate_json(&json!({ "name": "   " }));
    assert_eq!(report.message("name"), Some("Ce champ est requis"));

    assert!(schema.validate_json(&json!({ "name": "  Ada " })).is_valid());
}

#[test]
fn transform_sees_absent_fields_as_none() {
    let schema = Validator::new()
        .field("tag")
        .string()
        .required()
        .transform(|value| value.or_else(|| Some(json!("fallback"))));

    assert!(schema.validate_json(&json!({})).is_valid());
}

// ============================================================================
// AGGREGATION
// ============================================================================

#[test]
fn last_failing_check_wins() {
    // "abc" fails equals, then fails the pattern; only the pattern message
    // survives.
    let schema = Validator::new()
        .string()
        .equals("xyz")
        .pattern(Regex::new("^[0-9]+$").unwrap());

    let report = schema.validate_json(&json!({ "field_0": "abc" }));
    assert_eq!(
        report.message("field_0"),
        Some("La valeur ne correspond pas au format requis")
    );
}

#[test]
fn earlier_failure_survives_when_later_checks_pass() {
    let schema = Validator::new()
        .string()
        .equals("xyz")
        .pattern(Regex::new("^[a-z]+$").unwrap());

    let report = schema.validate_json(&json!({ "field_0": "abc" }));
    assert_eq!(
        report.message("field_0"),
        Some("La valeur doit être égale à xyz")
    );
}

#[test]
fn each_field_is_validated_independently() {
    let schema = Validator::new()
        .field("name").string().required()
        .field("age").number().min(18);

    let report = schema.validate_json(&json!({ "age": 12 }));
    assert_eq!(report.len(), 2);
    assert_eq!(report.message("name"), Some("Ce champ est requis"));
    assert_eq!(report.message("age"), Some("La valeur minimale est 18"));
}

#[test]
fn unknown_data_fields_are_ignored() {
    let schema = Validator::new().field("name").string();

    let report = schema.validate_json(&json!({
        "name": "Ada",
        "extra": { "nested": true },
    }));
    assert!(report.is_valid());
}

#[test]
fn non_object_records_validate_like_empty_ones() {
    let schema = Validator::new().field("name").string().required();

    let report = schema.validate_json(&json!("not an object"));
    assert_eq!(report.message("name"), Some("Ce champ est requis"));
}

#[test]
fn report_renders_the_interchange_shape() {
    let schema = Validator::new()
        .field("name").string().required()
        .field("age").number();

    let report = schema.validate_json(&json!({ "age": 30 }));
    assert_eq!(
        report.to_json_value(),
        json!({
            "isValid": false,
            "errors": { "name": "Ce champ est requis" },
        })
    );
}
