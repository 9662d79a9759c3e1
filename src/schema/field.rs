//! Per-field declaration builder.

use serde_json::Value;

use crate::error::UsageError;
use crate::kind::PrimitiveKind;
use crate::rule::{MessageTemplate, RuleDeclaration, RuleKind};
use crate::validator::Validator;

use super::FieldSpec;

/// Configures one field of a [`Validator`] until [`compile`](Self::compile)
/// is called.
///
/// The builder holds the validator mutably, so a field must be finished
/// before another can be declared or any data validated. Rule methods check
/// the rule against the type set so far and fail with
/// [`UsageError::TypeConflict`] on a mismatch; `compile` repeats the check
/// for the complete field, whatever order the calls were made in.
///
/// # Example
///
/// ```rust
/// use checkup::Validator;
/// use serde_json::json;
///
/// let mut validator = Validator::object();
/// validator
///     .required("username")
///     .as_string()
///     .min_length(3)?
///     .max_length(16)?
///     .has_pattern(r"^[a-z0-9_]+$")?
///     .error("lowercase letters, digits and underscores only")
///     .compile()?;
///
/// assert!(validator.validate_property("username", &json!("ada_99"))?);
/// assert!(!validator.validate_property("username", &json!("Ada!"))?);
/// assert_eq!(
///     validator.errors().get("username"),
///     Some("lowercase letters, digits and underscores only")
/// );
/// # Ok::<(), checkup::UsageError>(())
/// ```
#[must_use = "a field declaration takes effect only once `compile()` is called"]
pub struct FieldBuilder<'v> {
    validator: &'v mut Validator,
    name: String,
    spec: FieldSpec,
}

impl<'v> FieldBuilder<'v> {
    pub(crate) fn new(validator: &'v mut Validator, name: String) -> Self {
        Self {
            validator,
            name,
            spec: FieldSpec::default(),
        }
    }

    /// The name of the field being declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the field's primitive type.
    pub fn as_type(mut self, kind: PrimitiveKind) -> Self {
        self.spec.value_type = Some(kind);
        self
    }

    pub fn as_string(self) -> Self {
        self.as_type(PrimitiveKind::String)
    }

    pub fn as_number(self) -> Self {
        self.as_type(PrimitiveKind::Number)
    }

    pub fn as_integer(self) -> Self {
        self.as_type(PrimitiveKind::Integer)
    }

    pub fn as_boolean(self) -> Self {
        self.as_type(PrimitiveKind::Boolean)
    }

    pub fn as_null(self) -> Self {
        self.as_type(PrimitiveKind::Null)
    }

    pub fn as_array(self) -> Self {
        self.as_type(PrimitiveKind::Array)
    }

    pub fn as_object(self) -> Self {
        self.as_type(PrimitiveKind::Object)
    }

    /// Requires an email-shaped string. Types the field as `string` if no
    /// type has been set.
    pub fn is_email(self) -> Result<Self, UsageError> {
        self.rule(RuleDeclaration::new(RuleKind::Email))
    }

    /// Requires at least `min` characters (or elements, for arrays).
    pub fn min_length(self, min: usize) -> Result<Self, UsageError> {
        self.rule(RuleDeclaration::new(RuleKind::MinLength).with_operand(min))
    }

    /// Requires at most `max` characters (or elements, for arrays).
    pub fn max_length(self, max: usize) -> Result<Self, UsageError> {
        self.rule(RuleDeclaration::new(RuleKind::MaxLength).with_operand(max))
    }

    /// Requires a match of `pattern` somewhere in the string.
    ///
    /// The pattern is compiled by [`compile`](Self::compile); an invalid
    /// expression is reported there.
    pub fn has_pattern(self, pattern: &str) -> Result<Self, UsageError> {
        self.rule(RuleDeclaration::new(RuleKind::Pattern).with_operand(pattern))
    }

    /// Requires a number greater than or equal to `bound`.
    pub fn min(self, bound: impl Into<Value>) -> Result<Self, UsageError> {
        self.rule(RuleDeclaration::new(RuleKind::Min).with_operand(bound))
    }

    /// Requires a number less than or equal to `bound`.
    pub fn max(self, bound: impl Into<Value>) -> Result<Self, UsageError> {
        self.rule(RuleDeclaration::new(RuleKind::Max).with_operand(bound))
    }

    /// Requires a value structurally equal to `expected`. Applies to every
    /// type.
    pub fn equal_to(mut self, expected: impl Into<Value>) -> Self {
        self.spec
            .rules
            .push(RuleDeclaration::new(RuleKind::EqualTo).with_operand(expected));
        self
    }

    /// Attaches an arbitrary rule declaration.
    pub fn rule(mut self, rule: RuleDeclaration) -> Result<Self, UsageError> {
        match self.spec.value_type {
            None if rule.kind == RuleKind::Email => {
                self.spec.value_type = Some(PrimitiveKind::String);
            }
            Some(value_type) if !rule.kind.accepts(value_type) => {
                return Err(UsageError::TypeConflict {
                    field: self.name,
                    rule: rule.kind,
                    value_type,
                });
            }
            _ => {}
        }
        self.spec.rules.push(rule);
        Ok(self)
    }

    /// Attaches a rule written in the textual `kind[:operand]` form, such as
    /// `"maxLength:20"`.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::UnsupportedRule`] for an unknown kind, or
    /// [`UsageError::TypeConflict`] as for [`rule`](Self::rule).
    pub fn rule_str(self, rule: &str) -> Result<Self, UsageError> {
        let rule: RuleDeclaration = rule.parse()?;
        self.rule(rule)
    }

    /// Sets a literal message for the most recent rule.
    ///
    /// Before any rule has been attached this sets the message used when type
    /// enforcement rejects a value.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.spec.rules.last_mut() {
            Some(rule) => rule.message = MessageTemplate::Literal(message.into()),
            None => self.spec.type_message = Some(message.into()),
        }
        self
    }

    /// Finishes the field: checks every rule against the final type,
    /// compiles the rules in order and stores the result in the validator.
    ///
    /// Returns the validator so further fields can be declared in the same
    /// chain.
    ///
    /// # Errors
    ///
    /// Returns a [`UsageError`] for a type conflict or a rule that fails to
    /// compile. The field then stays declared but uncompiled.
    pub fn compile(self) -> Result<&'v mut Validator, UsageError> {
        let FieldBuilder {
            validator,
            name,
            spec,
        } = self;
        validator.install(name, spec)?;
        Ok(validator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_then_rule_conflict_is_caught_at_declaration() {
        let mut validator = Validator::object();
        let result = validator.required("age").as_number().max_length(3);

        match result {
            Err(UsageError::TypeConflict {
                field,
                rule,
                value_type,
            }) => {
                assert_eq!(field, "age");
                assert_eq!(rule, RuleKind::MaxLength);
                assert_eq!(value_type, PrimitiveKind::Number);
            }
            _ => panic!("expected a type conflict"),
        }
    }

    #[test]
    fn test_min_on_string_is_rejected() {
        let mut validator = Validator::object();
        let result = validator.required("name").as_string().min(1);
        assert!(matches!(
            result,
            Err(UsageError::TypeConflict { rule: RuleKind::Min, .. })
        ));
    }

    #[test]
    fn test_rule_then_type_conflict_is_caught_at_compile() {
        let mut validator = Validator::object();
        let builder = validator.required("age").min_length(2).unwrap().as_number();

        let err = builder.compile().unwrap_err();
        assert!(matches!(
            err,
            UsageError::TypeConflict { rule: RuleKind::MinLength, .. }
        ));
        assert!(!validator.is_compiled("age"));
        assert_eq!(validator.schema().field("age").map(|s| s.rules.len()), Some(1));
    }

    #[test]
    fn test_is_email_implies_string() {
        let mut validator = Validator::object();
        validator.required("email").is_email().unwrap().compile().unwrap();

        let spec = validator.schema().field("email").unwrap();
        assert_eq!(spec.value_type, Some(PrimitiveKind::String));
    }

    #[test]
    fn test_is_email_on_number_conflicts() {
        let mut validator = Validator::object();
        let result = validator.required("email").as_number().is_email();
        assert!(matches!(
            result,
            Err(UsageError::TypeConflict { rule: RuleKind::Email, .. })
        ));
    }

    #[test]
    fn test_error_targets_last_rule() {
        let mut validator = Validator::object();
        validator
            .required("code")
            .as_string()
            .min_length(2)
            .unwrap()
            .max_length(4)
            .unwrap()
            .error("too long")
            .compile()
            .unwrap();

        let spec = validator.schema().field("code").unwrap();
        assert_eq!(spec.rules[0].message, MessageTemplate::Default);
        assert_eq!(
            spec.rules[1].message,
            MessageTemplate::Literal("too long".to_string())
        );
    }

    #[test]
    fn test_error_before_rules_sets_type_message() {
        let mut validator = Validator::object();
        validator
            .optional("count")
            .as_integer()
            .error("count must be a whole number")
            .compile()
            .unwrap();

        let spec = validator.schema().field("count").unwrap();
        assert_eq!(
            spec.type_message.as_deref(),
            Some("count must be a whole number")
        );
        assert!(spec.rules.is_empty());
    }

    #[test]
    fn test_rule_str() {
        let mut validator = Validator::object();
        validator
            .required("name")
            .as_string()
            .rule_str("maxLength:5")
            .unwrap()
            .compile()
            .unwrap();
        assert!(validator.is_compiled("name"));

        let result = validator.required("name").rule_str("between:1");
        assert!(matches!(result, Err(UsageError::UnsupportedRule(_))));
    }

    #[test]
    fn test_compile_returns_validator_for_chaining() {
        let mut validator = Validator::object();
        validator
            .required("a")
            .as_string()
            .compile()
            .unwrap()
            .optional("b")
            .as_number()
            .compile()
            .unwrap();

        assert!(validator.is_compiled("a"));
        assert!(validator.is_compiled("b"));
    }
}
