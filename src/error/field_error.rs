//! Field validation error types.
//!
//! This module provides [`FieldError`] for a single failed field and
//! [`FieldErrors`] for reporting several of them at once.

use std::fmt::{self, Display};

use stillwater::prelude::*;

/// A validation failure recorded against one field.
///
/// - **field**: the name of the field that failed
/// - **message**: human-readable description, already resolved from the
///   rule's message template
/// - **code**: machine-readable error code (`required`, `min_length`, ...)
/// - **got**: the offending value rendered as JSON, when there was one
///
/// # Example
///
/// ```rust
/// use checkup::FieldError;
///
/// let error = FieldError::new("email", "Wrong email format")
///     .with_code("email")
///     .with_got("\"not-an-email\"");
///
/// assert_eq!(error.code, "email");
/// assert_eq!(error.to_string(), "email: Wrong email format (got: \"not-an-email\")");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// The field that failed validation.
    pub field: String,
    /// Human-readable error message.
    pub message: String,
    /// Machine-readable error code.
    pub code: String,
    /// The value that was received, rendered as JSON.
    pub got: Option<String>,
}

impl FieldError {
    /// Creates a new field error. The code defaults to `"validation_error"`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: "validation_error".to_string(),
            got: None,
        }
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the "got" (actual value) field and returns self for chaining.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldError>();
    assert_sync::<FieldError>();
};

/// A non-empty collection of field errors.
///
/// Produced by [`ErrorMap::to_validation`](crate::ErrorMap::to_validation)
/// so that results compose with stillwater's `Validation`. Implements
/// `Semigroup`, so collections from separate validators can be combined.
///
/// ```rust
/// use checkup::{FieldError, FieldErrors};
/// use stillwater::prelude::*;
///
/// let a = FieldErrors::single(FieldError::new("name", "Property name is required"));
/// let b = FieldErrors::single(FieldError::new("age", "Value must be larger than or equal to 18"));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrors(NonEmptyVec<FieldError>);

impl FieldErrors {
    /// Creates a collection holding a single error.
    pub fn single(error: FieldError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the error recorded for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    /// Returns all errors with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first error.
    pub fn first(&self) -> &FieldError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<FieldError>`.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0.into_vec()
    }
}

impl Semigroup for FieldErrors {
    fn combine(self, other: Self) -> Self {
        FieldErrors(self.0.combine(other.0))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_defaults() {
        let error = FieldError::new("name", "Property name is required");

        assert_eq!(error.field, "name");
        assert_eq!(error.message, "Property name is required");
        assert_eq!(error.code, "validation_error");
        assert!(error.got.is_none());
    }

    #[test]
    fn test_display_without_got() {
        let error = FieldError::new("age", "Value must be larger than or equal to 18");
        assert_eq!(
            error.to_string(),
            "age: Value must be larger than or equal to 18"
        );
    }

    #[test]
    fn test_field_errors_lookup() {
        let errors = FieldErrors::single(FieldError::new("a", "first").with_code("required"))
            .combine(FieldErrors::single(
                FieldError::new("b", "second").with_code("min"),
            ))
            .combine(FieldErrors::single(
                FieldError::new("c", "third").with_code("required"),
            ));

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.first().field, "a");
        assert_eq!(errors.for_field("b").map(|e| e.message.as_str()), Some("second"));
        assert!(errors.for_field("z").is_none());
        assert_eq!(errors.with_code("required").len(), 2);
    }

    #[test]
    fn test_field_errors_display() {
        let errors = FieldErrors::single(FieldError::new("name", "required"))
            .combine(FieldErrors::single(FieldError::new("email", "invalid")));
        let display = errors.to_string();

        assert!(display.contains("2 error(s)"));
        assert!(display.contains("1. name: required"));
        assert!(display.contains("2. email: invalid"));
    }

    #[test]
    fn test_into_iter_keeps_order() {
        let errors = FieldErrors::single(FieldError::new("x", "1"))
            .combine(FieldErrors::single(FieldError::new("y", "2")));
        let fields: Vec<String> = errors.into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["x", "y"]);
    }
}
