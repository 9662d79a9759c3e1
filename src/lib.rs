//! # Checkup
//!
//! A small declarative validation engine for flat objects: declare fields,
//! their primitive type and per-field rules, compile the declaration once,
//! then validate values and read back one error message per failing field.
//!
//! ## Overview
//!
//! Every validator goes through DECLARE → COMPILE → VALIDATE. A field is
//! declared through a [`FieldBuilder`] and finished with
//! [`FieldBuilder::compile`], which turns each [`RuleDeclaration`] into an
//! executable [`Checker`]. Validation runs a field's checkers in order and
//! keeps only the first failure; failures accumulate in an [`ErrorMap`].
//!
//! Two error classes are kept apart. A [`UsageError`] is a defect in the
//! declaration or in API use (validating an uncompiled field, a length rule
//! on a numeric field) and is returned as `Err`. A [`FieldError`] is bad
//! input and is only ever recorded in the [`ErrorMap`].
//!
//! ## Core Types
//!
//! - [`Validator`]: owns the schema, the compiled fields and the errors
//! - [`FieldBuilder`]: configures one field until it is compiled
//! - [`rule::compile_rule`]: turns one declaration into a [`Checker`]
//! - [`ErrorMap`]: the accumulated first failure per field
//! - [`SharedValidator`]: a validator guarded by a lock
//!
//! ## Example
//!
//! ```rust
//! use checkup::Validator;
//! use serde_json::json;
//!
//! let mut validator = Validator::object();
//! validator.required("email").as_string().is_email()?.compile()?;
//! validator.optional("age").as_number().min(18)?.compile()?;
//!
//! validator.validate_all(json!({"email": "a@b.com", "age": 18}).as_object().unwrap())?;
//! assert!(validator.errors().is_empty());
//!
//! validator.validate_all(json!({"email": "bad", "age": 17}).as_object().unwrap())?;
//! assert_eq!(validator.errors().len(), 2);
//! # Ok::<(), checkup::UsageError>(())
//! ```

pub mod config;
pub mod error;
pub mod kind;
pub mod rule;
pub mod schema;
pub mod shared;
pub mod validator;

pub use config::{NullPolicy, ValidatorConfig};
pub use error::{ErrorMap, FieldError, FieldErrors, UsageError};
pub use kind::PrimitiveKind;
pub use rule::{Checker, MessageTemplate, RuleDeclaration, RuleKind};
pub use schema::{FieldBuilder, FieldSpec, Schema};
pub use shared::SharedValidator;
pub use validator::{CompiledField, Validator};

/// Type alias for validation results using FieldErrors
pub type ValidationResult<T> = stillwater::Validation<T, FieldErrors>;
