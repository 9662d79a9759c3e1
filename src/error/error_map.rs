//! The accumulated per-field error map.

use indexmap::IndexMap;
use stillwater::prelude::*;
use stillwater::Validation;

use super::field_error::{FieldError, FieldErrors};

/// Maps field names to the single error recorded for each.
///
/// A field has at most one entry. Recording a second error for the same field
/// replaces the first; entries for other fields are never touched. Fields keep
/// the order in which they first failed.
///
/// # Example
///
/// ```rust
/// use checkup::{ErrorMap, FieldError};
///
/// let mut errors = ErrorMap::new();
/// assert!(errors.is_empty());
///
/// errors.record(FieldError::new("age", "too young"));
/// assert_eq!(errors.get("age"), Some("too young"));
/// assert_eq!(errors.get("name"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorMap {
    entries: IndexMap<String, FieldError>,
}

impl ErrorMap {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error under its field name, replacing any previous entry.
    pub fn record(&mut self, error: FieldError) {
        self.entries.insert(error.field.clone(), error);
    }

    /// Returns the message recorded for `field`, or `None` if it has no entry.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(|e| e.message.as_str())
    }

    /// Returns the full error recorded for `field`.
    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.entries.get(field)
    }

    /// Returns true if `field` has an entry.
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(field, message)` pairs in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, error)| (field.as_str(), error.message.as_str()))
    }

    /// Iterates over the recorded errors.
    pub fn errors(&self) -> impl Iterator<Item = &FieldError> {
        self.entries.values()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Converts the map into a stillwater `Validation`.
    ///
    /// An empty map is a success; otherwise every entry is reported, in
    /// recording order.
    pub fn to_validation(&self) -> Validation<(), FieldErrors> {
        let mut errors = self.entries.values().cloned();
        match errors.next() {
            None => Validation::Success(()),
            Some(first) => Validation::Failure(
                errors.fold(FieldErrors::single(first), |acc, e| {
                    acc.combine(FieldErrors::single(e))
                }),
            ),
        }
    }
}
