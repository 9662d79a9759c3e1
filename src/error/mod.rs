//! Error types.
//!
//! Two classes are kept apart: [`UsageError`] for defects in the schema
//! declaration or API use, and [`FieldError`] for values that fail a rule.
//! The latter are collected in an [`ErrorMap`].

mod error_map;
mod field_error;
mod usage_error;

pub use error_map::ErrorMap;
pub use field_error::{FieldError, FieldErrors};
pub use usage_error::UsageError;
