//! Usage errors raised by malformed or out-of-order API use.

use crate::kind::PrimitiveKind;
use crate::rule::RuleKind;

/// An error in the schema declaration itself, as opposed to bad input data.
///
/// Usage errors abort the offending call and are returned to its caller.
/// They are never recorded in an [`ErrorMap`](crate::ErrorMap).
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    /// Validation was requested for a field that has not been compiled.
    #[error("field '{0}' has not been compiled")]
    NotCompiled(String),

    /// A rule was attached to a field whose type it cannot check.
    #[error("rule {rule} cannot be applied to field '{field}' with type {value_type}")]
    TypeConflict {
        field: String,
        rule: RuleKind,
        value_type: PrimitiveKind,
    },

    /// A rule declaration named a kind the compiler does not know.
    #[error("rule {0} is not supported")]
    UnsupportedRule(String),

    /// A rule that compares against an operand was declared without one.
    #[error("rule {0} requires an operand")]
    MissingOperand(RuleKind),

    /// A rule operand has the wrong shape for its kind.
    #[error("invalid operand for rule {rule}: expected {expected}, got {got}")]
    InvalidOperand {
        rule: RuleKind,
        expected: &'static str,
        got: String,
    },

    /// A pattern operand is not a valid regular expression.
    #[error("invalid pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
