//! Rule declarations and their compilation into checkers.
//!
//! A [`RuleDeclaration`] is the declarative half: a [`RuleKind`], an optional
//! operand and a [`MessageTemplate`]. [`compile_rule`] turns one declaration
//! into an executable [`Checker`].
//!
//! # Example
//!
//! ```rust
//! use checkup::rule::{compile_rule, RuleDeclaration, RuleKind};
//! use serde_json::json;
//!
//! let rule = RuleDeclaration::new(RuleKind::MinLength).with_operand(5);
//! let checker = compile_rule(&rule).unwrap();
//!
//! assert!(checker.check(&json!("hello")).is_success());
//! assert_eq!(
//!     checker.check(&json!("hi")).into_result().unwrap_err(),
//!     "Text must have the minimum length of 5"
//! );
//! ```

mod compiler;
mod equality;

use std::fmt::{self, Display};
use std::str::FromStr;

use serde_json::Value;

use crate::error::UsageError;
use crate::kind::PrimitiveKind;

pub use compiler::{compile_rule, Checker};
pub use equality::deep_equal;

/// The closed set of rule kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Email,
    Min,
    Max,
    MinLength,
    MaxLength,
    Pattern,
    EqualTo,
}

impl RuleKind {
    /// Returns the rule's name as used in textual declarations (`minLength`).
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Email => "email",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
            RuleKind::MinLength => "minLength",
            RuleKind::MaxLength => "maxLength",
            RuleKind::Pattern => "pattern",
            RuleKind::EqualTo => "equalTo",
        }
    }

    /// Returns the error code recorded when this rule fails.
    pub fn code(self) -> &'static str {
        match self {
            RuleKind::Email => "email",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
            RuleKind::MinLength => "min_length",
            RuleKind::MaxLength => "max_length",
            RuleKind::Pattern => "pattern",
            RuleKind::EqualTo => "equal_to",
        }
    }

    /// Returns the default message template. `[value]` marks where the
    /// operand is substituted.
    pub fn default_template(self) -> &'static str {
        match self {
            RuleKind::Email => "Wrong email format",
            RuleKind::Min => "Value must be larger than or equal to [value]",
            RuleKind::Max => "Value must be less than or equal to [value]",
            RuleKind::MinLength => "Text must have the minimum length of [value]",
            RuleKind::MaxLength => "Text must have the maximum length of [value]",
            RuleKind::Pattern => "Text must match the provided pattern",
            RuleKind::EqualTo => "Value does not match the compared value",
        }
    }

    /// Returns true if a field declared as `value_type` can carry this rule.
    ///
    /// Length bounds apply to strings and arrays, numeric bounds to numbers
    /// and integers, `pattern` and `email` to strings. `equalTo` applies to
    /// every type.
    pub fn accepts(self, value_type: PrimitiveKind) -> bool {
        match self {
            RuleKind::MinLength | RuleKind::MaxLength => {
                matches!(value_type, PrimitiveKind::String | PrimitiveKind::Array)
            }
            RuleKind::Min | RuleKind::Max => value_type.is_numeric(),
            RuleKind::Pattern | RuleKind::Email => value_type == PrimitiveKind::String,
            RuleKind::EqualTo => true,
        }
    }
}

impl Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(RuleKind::Email),
            "min" => Ok(RuleKind::Min),
            "max" => Ok(RuleKind::Max),
            "minLength" => Ok(RuleKind::MinLength),
            "maxLength" => Ok(RuleKind::MaxLength),
            "pattern" => Ok(RuleKind::Pattern),
            "equalTo" => Ok(RuleKind::EqualTo),
            other => Err(UsageError::UnsupportedRule(other.to_string())),
        }
    }
}

/// Where a rule's error message comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MessageTemplate {
    /// Use the kind's default template with the operand substituted.
    #[default]
    Default,
    /// Use this text verbatim.
    Literal(String),
}

/// One rule attached to a field.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDeclaration {
    pub kind: RuleKind,
    pub operand: Option<Value>,
    pub message: MessageTemplate,
}

impl RuleDeclaration {
    /// Creates a declaration with no operand and the default message.
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            operand: None,
            message: MessageTemplate::Default,
        }
    }

    /// Sets the operand and returns self for chaining.
    pub fn with_operand(mut self, operand: impl Into<Value>) -> Self {
        self.operand = Some(operand.into());
        self
    }

    /// Sets a literal message and returns self for chaining.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = MessageTemplate::Literal(message.into());
        self
    }

    /// Resolves the effective error message.
    ///
    /// A literal message is returned verbatim. The default template has its
    /// first `[value]` placeholder replaced by the operand: strings are
    /// inserted as-is, other values in their JSON form. `email` never
    /// substitutes.
    pub fn resolve_message(&self) -> String {
        match &self.message {
            MessageTemplate::Literal(text) => text.clone(),
            MessageTemplate::Default => {
                let template = self.kind.default_template();
                match &self.operand {
                    Some(operand) if self.kind != RuleKind::Email => {
                        template.replacen("[value]", &render_operand(operand), 1)
                    }
                    _ => template.to_string(),
                }
            }
        }
    }
}

/// Parses the textual `kind[:operand]` form, e.g. `minLength:5` or
/// `pattern:^[a-z]+$`.
///
/// Everything after the first `:` is the operand. Pattern operands are kept
/// as raw text; other operands are read as JSON when possible and as a
/// plain string otherwise, leaving shape checks to [`compile_rule`].
impl FromStr for RuleDeclaration {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, operand) = match s.split_once(':') {
            Some((name, operand)) => (name, Some(operand)),
            None => (s, None),
        };
        let kind: RuleKind = name.trim().parse()?;

        let operand = operand.map(|text| match kind {
            RuleKind::Pattern => Value::String(text.to_string()),
            _ => serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())),
        });

        Ok(Self {
            kind,
            operand,
            message: MessageTemplate::Default,
        })
    }
}

fn render_operand(operand: &Value) -> String {
    match operand {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
