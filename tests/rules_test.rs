//! Integration tests for rule semantics and message resolution.

use checkup::rule::compile_rule;
use checkup::{FieldBuilder, RuleDeclaration, RuleKind, Validator};
use serde_json::json;

fn string_field(
    configure: impl FnOnce(FieldBuilder<'_>) -> FieldBuilder<'_>,
) -> Validator {
    let mut validator = Validator::object();
    configure(validator.required("value").as_string())
        .compile()
        .unwrap();
    validator
}

#[test]
fn test_length_boundaries() {
    for n in 0..6usize {
        let at_bound = "x".repeat(n);
        let mut validator = string_field(|f| f.min_length(n).unwrap().max_length(n).unwrap());
        assert!(
            validator.validate_property("value", &json!(at_bound)).unwrap(),
            "length {} should satisfy both bounds",
            n
        );

        let longer = "x".repeat(n + 1);
        assert!(!validator.validate_property("value", &json!(longer)).unwrap());

        if n > 0 {
            let shorter = "x".repeat(n - 1);
            assert!(!validator.validate_property("value", &json!(shorter)).unwrap());
        }
    }
}

#[test]
fn test_min_boundary() {
    let mut validator = Validator::object();
    validator
        .required("n")
        .as_integer()
        .min(10)
        .unwrap()
        .compile()
        .unwrap();

    assert!(validator.validate_property("n", &json!(10)).unwrap());
    assert!(!validator.validate_property("n", &json!(9)).unwrap());
    assert_eq!(
        validator.errors().get("n"),
        Some("Value must be larger than or equal to 10")
    );
}

#[test]
fn test_max_boundary() {
    let mut validator = Validator::object();
    validator
        .required("n")
        .as_number()
        .max(0.5)
        .unwrap()
        .compile()
        .unwrap();

    assert!(validator.validate_property("n", &json!(0.5)).unwrap());
    assert!(validator.validate_property("n", &json!(-3)).unwrap());
    assert!(!validator.validate_property("n", &json!(0.75)).unwrap());
    assert_eq!(
        validator.errors().get("n"),
        Some("Value must be less than or equal to 0.5")
    );
}

#[test]
fn test_pattern_is_a_search() {
    let mut validator = string_field(|f| f.has_pattern("[0-9]+").unwrap());

    assert!(validator.validate_property("value", &json!("order-42-final")).unwrap());
    assert!(!validator.validate_property("value", &json!("no digits")).unwrap());
}

#[test]
fn test_equal_to_is_strict_about_types() {
    let mut validator = Validator::object();
    validator.required("one").equal_to(1).compile().unwrap();

    assert!(validator.validate_property("one", &json!(1)).unwrap());
    assert!(!validator.validate_property("one", &json!("1")).unwrap());
    assert_eq!(
        validator.errors().get("one"),
        Some("Value does not match the compared value")
    );
}

#[test]
fn test_equal_to_structured_values() {
    let mut validator = Validator::object();
    validator
        .required("settings")
        .as_object()
        .equal_to(json!({"theme": "dark", "sizes": [1, 2]}))
        .compile()
        .unwrap();

    let reordered: serde_json::Value =
        serde_json::from_str(r#"{"sizes": [1, 2], "theme": "dark"}"#).unwrap();
    assert!(validator.validate_property("settings", &reordered).unwrap());
    assert!(!validator
        .validate_property("settings", &json!({"theme": "dark", "sizes": [2, 1]}))
        .unwrap());
}

#[test]
fn test_default_message_substitution() {
    let checker =
        compile_rule(&RuleDeclaration::new(RuleKind::MinLength).with_operand(5)).unwrap();
    assert!(checker.message().contains('5'));
    assert!(!checker.message().contains("[value]"));

    let checker = compile_rule(
        &RuleDeclaration::new(RuleKind::MinLength)
            .with_operand(5)
            .with_message("needs [value] chars"),
    )
    .unwrap();
    assert_eq!(checker.message(), "needs [value] chars");
}

#[test]
fn test_custom_message_through_builder() {
    let mut validator = string_field(|f| f.is_email().unwrap().error("please enter an email"));

    validator.validate_property("value", &json!("nope")).unwrap();
    assert_eq!(validator.errors().get("value"), Some("please enter an email"));
}

#[test]
fn test_first_failing_rule_wins() {
    let mut validator =
        string_field(|f| f.min_length(10).unwrap().has_pattern("^[a-z]+$").unwrap());

    validator.validate_property("value", &json!("ABC")).unwrap();

    let error = validator.errors().error("value").unwrap();
    assert_eq!(error.code, "min_length");
    assert_eq!(error.message, "Text must have the minimum length of 10");
    assert_eq!(error.got.as_deref(), Some("\"ABC\""));
}

#[test]
fn test_rules_on_mismatched_values_fail() {
    let mut validator = Validator::object();
    validator
        .required("free")
        .min_length(1)
        .unwrap()
        .compile()
        .unwrap();

    assert!(!validator.validate_property("free", &json!(42)).unwrap());
    assert!(validator.validate_property("free", &json!(["a"])).unwrap());
}
