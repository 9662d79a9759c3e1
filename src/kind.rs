//! Primitive value kinds.
//!
//! This module provides [`PrimitiveKind`], the closed set of JSON value kinds a
//! schema root or a field can be declared as.

use std::fmt::{self, Display};

use serde_json::Value;

/// The primitive kind of a JSON value.
///
/// # Example
///
/// ```rust
/// use checkup::PrimitiveKind;
/// use serde_json::json;
///
/// assert_eq!(PrimitiveKind::of(&json!("hi")), PrimitiveKind::String);
/// assert!(PrimitiveKind::Number.matches(&json!(1.5)));
/// assert!(!PrimitiveKind::Integer.matches(&json!(1.5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl PrimitiveKind {
    /// Returns the lower-case name of this kind (e.g. `"string"`).
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Object => "object",
            PrimitiveKind::Array => "array",
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Null => "null",
        }
    }

    /// Classifies a value.
    ///
    /// Numbers are always reported as [`PrimitiveKind::Number`]; use
    /// [`matches`](Self::matches) to test for integers.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => PrimitiveKind::Null,
            Value::Bool(_) => PrimitiveKind::Boolean,
            Value::Number(_) => PrimitiveKind::Number,
            Value::String(_) => PrimitiveKind::String,
            Value::Array(_) => PrimitiveKind::Array,
            Value::Object(_) => PrimitiveKind::Object,
        }
    }

    /// Returns true if `value` conforms to this kind.
    ///
    /// `Integer` only accepts numbers stored as `i64` or `u64`, so `1.0` is
    /// rejected just like `1.5`.
    pub fn matches(self, value: &Value) -> bool {
        match (self, value) {
            (PrimitiveKind::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (kind, value) => kind == Self::of(value),
        }
    }

    /// Returns true for `Number` and `Integer`.
    pub fn is_numeric(self) -> bool {
        matches!(self, PrimitiveKind::Number | PrimitiveKind::Integer)
    }
}

impl Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
