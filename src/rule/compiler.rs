//! Compilation of rule declarations into executable checkers.

use regex::Regex;
use std::cmp::Ordering;

use serde_json::{Number, Value};
use stillwater::Validation;

use crate::error::UsageError;

use super::equality::{compare_numbers, deep_equal};
use super::{RuleDeclaration, RuleKind};

/// Approximate email shape: word characters with `.`/`-` separators, an `@`,
/// a domain, and at least one 2-3 character suffix.
const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$";

/// The test a checker applies, with its operand already in native form.
#[derive(Debug, Clone)]
enum Test {
    MinLength(usize),
    MaxLength(usize),
    Min(Number),
    Max(Number),
    Pattern(Regex),
    EqualTo(Value),
    Email(Regex),
}

/// An executable rule: a predicate over a value plus the message reported
/// when the predicate fails.
#[derive(Debug, Clone)]
pub struct Checker {
    kind: RuleKind,
    message: String,
    test: Test,
}

impl Checker {
    /// The kind of rule this checker was compiled from.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// The resolved error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if `value` satisfies the rule.
    ///
    /// Values the rule cannot measure (a length rule on a number, a numeric
    /// bound on a string) do not satisfy it.
    pub fn passes(&self, value: &Value) -> bool {
        match &self.test {
            Test::MinLength(min) => length(value).is_some_and(|len| len >= *min),
            Test::MaxLength(max) => length(value).is_some_and(|len| len <= *max),
            Test::Min(min) => compare(value, min).is_some_and(|o| o != Ordering::Less),
            Test::Max(max) => compare(value, max).is_some_and(|o| o != Ordering::Greater),
            Test::Pattern(regex) | Test::Email(regex) => {
                value.as_str().is_some_and(|s| regex.is_match(s))
            }
            Test::EqualTo(expected) => deep_equal(value, expected),
        }
    }

    /// Runs the checker, yielding the error message on failure.
    pub fn check(&self, value: &Value) -> Validation<(), String> {
        if self.passes(value) {
            Validation::Success(())
        } else {
            Validation::Failure(self.message.clone())
        }
    }
}

/// Compiles one rule declaration into a [`Checker`].
///
/// The message is resolved once, here. Operands are checked for shape:
/// length bounds need a non-negative integer, numeric bounds a number,
/// `pattern` a string holding a valid regular expression, and `equalTo` any
/// value. `email` ignores its operand.
///
/// # Errors
///
/// Returns a [`UsageError`] for a missing or malformed operand or an invalid
/// pattern. These describe a broken declaration, not bad input.
pub fn compile_rule(rule: &RuleDeclaration) -> Result<Checker, UsageError> {
    let test = match rule.kind {
        RuleKind::MinLength => Test::MinLength(length_operand(rule)?),
        RuleKind::MaxLength => Test::MaxLength(length_operand(rule)?),
        RuleKind::Min => Test::Min(numeric_operand(rule)?),
        RuleKind::Max => Test::Max(numeric_operand(rule)?),
        RuleKind::Pattern => {
            let operand = operand(rule)?;
            let pattern = operand
                .as_str()
                .ok_or_else(|| invalid_operand(rule.kind, "a pattern string", operand))?;
            Test::Pattern(build_regex(pattern)?)
        }
        RuleKind::EqualTo => Test::EqualTo(operand(rule)?.clone()),
        RuleKind::Email => Test::Email(build_regex(EMAIL_PATTERN)?),
    };

    Ok(Checker {
        kind: rule.kind,
        message: rule.resolve_message(),
        test,
    })
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn compare(value: &Value, bound: &Number) -> Option<Ordering> {
    match value {
        Value::Number(n) => compare_numbers(n, bound),
        _ => None,
    }
}

fn operand(rule: &RuleDeclaration) -> Result<&Value, UsageError> {
    rule.operand
        .as_ref()
        .ok_or(UsageError::MissingOperand(rule.kind))
}

fn length_operand(rule: &RuleDeclaration) -> Result<usize, UsageError> {
    let operand = operand(rule)?;
    operand
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| invalid_operand(rule.kind, "a non-negative integer", operand))
}

fn numeric_operand(rule: &RuleDeclaration) -> Result<Number, UsageError> {
    match operand(rule)? {
        Value::Number(n) => Ok(n.clone()),
        other => Err(invalid_operand(rule.kind, "a number", other)),
    }
}

fn invalid_operand(rule: RuleKind, expected: &'static str, got: &Value) -> UsageError {
    UsageError::InvalidOperand {
        rule,
        expected,
        got: got.to_string(),
    }
}

fn build_regex(pattern: &str) -> Result<Regex, UsageError> {
    Regex::new(pattern).map_err(|source| UsageError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
