//! The validator: schema declaration, compilation and evaluation.
//!
//! A [`Validator`] follows a DECLARE → COMPILE → VALIDATE lifecycle. Fields
//! are declared with [`Validator::required`] or [`Validator::optional`],
//! configured through the returned [`FieldBuilder`], and compiled with
//! [`FieldBuilder::compile`]. Only compiled fields can be validated; failures
//! accumulate in an [`ErrorMap`] until explicitly cleared.

use std::collections::HashSet;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::{Map, Value};
use stillwater::Validation;
use tracing::{debug, trace};

use crate::config::{NullPolicy, ValidatorConfig};
use crate::error::{ErrorMap, FieldError, UsageError};
use crate::kind::PrimitiveKind;
use crate::rule::{compile_rule, Checker};
use crate::schema::{FieldBuilder, FieldSpec, Schema};
use crate::ValidationResult;

/// The executable form of one field.
///
/// Built by [`FieldBuilder::compile`] and never modified afterwards;
/// recompiling a field replaces it.
#[derive(Debug, Clone)]
pub struct CompiledField {
    value_type: Option<PrimitiveKind>,
    required: bool,
    type_message: Option<String>,
    checkers: Vec<Checker>,
}

impl CompiledField {
    fn build(name: &str, spec: &FieldSpec, required: bool) -> Result<Self, UsageError> {
        spec.check_rule_types(name)?;
        let checkers = spec
            .rules
            .iter()
            .map(compile_rule)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            value_type: spec.value_type,
            required,
            type_message: spec.type_message.clone(),
            checkers,
        })
    }

    pub fn value_type(&self) -> Option<PrimitiveKind> {
        self.value_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The checkers, in declaration order.
    pub fn checkers(&self) -> &[Checker] {
        &self.checkers
    }

    /// Runs the field's checks against `value`, returning the first failure.
    fn evaluate(&self, name: &str, value: &Value, enforce_types: bool) -> Option<FieldError> {
        if enforce_types {
            if let Some(kind) = self.value_type.filter(|kind| !kind.matches(value)) {
                let message = self
                    .type_message
                    .clone()
                    .unwrap_or_else(|| format!("Value must be of type {}", kind));
                return Some(
                    FieldError::new(name, message)
                        .with_code("invalid_type")
                        .with_got(value.to_string()),
                );
            }
        }

        for checker in &self.checkers {
            if let Validation::Failure(message) = checker.check(value) {
                return Some(
                    FieldError::new(name, message)
                        .with_code(checker.kind().code())
                        .with_got(value.to_string()),
                );
            }
        }
        None
    }
}

/// A schema-driven validator for flat objects.
///
/// # Example
///
/// ```rust
/// use checkup::Validator;
/// use serde_json::json;
///
/// let mut validator = Validator::object();
/// validator.required("email").as_string().is_email()?.compile()?;
/// validator.optional("age").as_number().min(18)?.compile()?;
///
/// let data = json!({"email": "bad", "age": 17});
/// validator.validate_all(data.as_object().unwrap())?;
///
/// assert_eq!(validator.errors().get("email"), Some("Wrong email format"));
/// assert_eq!(
///     validator.errors().get("age"),
///     Some("Value must be larger than or equal to 18")
/// );
/// # Ok::<(), checkup::UsageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Schema,
    compiled: IndexMap<String, CompiledField>,
    errors: ErrorMap,
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator with an empty schema of the given root type.
    pub fn new(root_type: PrimitiveKind) -> Self {
        Self {
            schema: Schema::new(root_type),
            compiled: IndexMap::new(),
            errors: ErrorMap::new(),
            config: ValidatorConfig::default(),
        }
    }

    /// Creates a validator for object data, the only root type the
    /// field-oriented API exercises.
    pub fn object() -> Self {
        Self::new(PrimitiveKind::Object)
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets how `null` is treated by bulk validation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use checkup::{NullPolicy, Validator};
    /// use serde_json::json;
    ///
    /// let mut validator = Validator::object().with_null_policy(NullPolicy::Present);
    /// validator.optional("nickname").equal_to(json!(null)).compile()?;
    ///
    /// validator.validate_all(json!({"nickname": null}).as_object().unwrap())?;
    /// assert!(validator.errors().is_empty());
    /// # Ok::<(), checkup::UsageError>(())
    /// ```
    pub fn with_null_policy(mut self, policy: NullPolicy) -> Self {
        self.config.null_policy = policy;
        self
    }

    /// When enabled, required fields absent from the data are recorded with
    /// the required message. Disabled by default: only keys present in the
    /// data are considered.
    pub fn with_absent_required_reported(mut self, report: bool) -> Self {
        self.config.report_absent_required = report;
        self
    }

    /// When enabled, a value that does not match the field's declared type
    /// is rejected with code `invalid_type` before any rule runs.
    pub fn with_type_enforcement(mut self, enforce: bool) -> Self {
        self.config.enforce_types = enforce;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn root_type(&self) -> PrimitiveKind {
        self.schema.root_type()
    }

    /// The declarative schema built so far.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Declares a required field, discarding any earlier declaration and
    /// compiled state under the same name.
    pub fn required(&mut self, name: impl Into<String>) -> FieldBuilder<'_> {
        self.declare(name.into(), true)
    }

    /// Declares an optional field, discarding any earlier declaration and
    /// compiled state under the same name.
    pub fn optional(&mut self, name: impl Into<String>) -> FieldBuilder<'_> {
        self.declare(name.into(), false)
    }

    fn declare(&mut self, name: String, required: bool) -> FieldBuilder<'_> {
        self.schema.declare(&name, required);
        self.compiled.shift_remove(&name);
        FieldBuilder::new(self, name)
    }

    /// Stores a finished field declaration and its compiled form.
    pub(crate) fn install(&mut self, name: String, spec: FieldSpec) -> Result<(), UsageError> {
        let compiled = CompiledField::build(&name, &spec, self.schema.is_required(&name));
        self.schema.store(name.clone(), spec);
        let compiled = compiled?;

        debug!(field = %name, rules = compiled.checkers.len(), "compiled field");
        self.compiled.insert(name, compiled);
        Ok(())
    }

    pub fn is_compiled(&self, name: &str) -> bool {
        self.compiled.contains_key(name)
    }

    /// Returns the compiled form of `name`, if it has been compiled.
    pub fn compiled(&self, name: &str) -> Option<&CompiledField> {
        self.compiled.get(name)
    }

    /// Validates one value against a compiled field.
    ///
    /// Checkers run in declaration order and stop at the first failure,
    /// whose message is recorded under `name`, replacing any earlier entry
    /// for that field. Returns whether the value passed. A pass leaves
    /// existing entries untouched.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::NotCompiled`] if `name` has not been compiled.
    pub fn validate_property(&mut self, name: &str, value: &Value) -> Result<bool, UsageError> {
        let field = self.compiled_field(name)?;
        match field.evaluate(name, value, self.config.enforce_types) {
            Some(error) => {
                record(&mut self.errors, error);
                Ok(false)
            }
            None => Ok(true),
        }
    }

    /// Validates every key present in `data`, in the map's insertion order.
    ///
    /// Keys absent from `data` are skipped unless
    /// [`with_absent_required_reported`](Self::with_absent_required_reported)
    /// is enabled. A `null` value is handled according to the
    /// [`NullPolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::NotCompiled`] for a key with a value whose field
    /// was never compiled. Errors recorded before that key are kept.
    pub fn validate_all(&mut self, data: &Map<String, Value>) -> Result<(), UsageError> {
        self.validate_entries(data.iter().map(|(name, value)| (name.as_str(), Some(value))))
    }

    /// Validates `(name, value)` pairs, where `None` marks a key that is
    /// present but undefined.
    ///
    /// An undefined value records `Property <name> is required` without
    /// running the field's rules; defined values go through
    /// [`validate_property`](Self::validate_property).
    ///
    /// # Example
    ///
    /// ```rust
    /// use checkup::Validator;
    ///
    /// let mut validator = Validator::object();
    /// validator.required("a").as_string().min_length(1)?.compile()?;
    ///
    /// validator.validate_entries([("a", None)])?;
    /// assert_eq!(validator.errors().get("a"), Some("Property a is required"));
    /// # Ok::<(), checkup::UsageError>(())
    /// ```
    pub fn validate_entries<'a, I>(&mut self, entries: I) -> Result<(), UsageError>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a Value>)>,
    {
        let mut errors = std::mem::take(&mut self.errors);
        let result = self.run_entries(entries, &mut errors);
        self.errors = errors;
        result
    }

    /// Validates each record into its own fresh [`ErrorMap`], in parallel.
    ///
    /// The validator's accumulated errors are neither read nor modified.
    ///
    /// # Example
    ///
    /// ```rust
    /// use checkup::Validator;
    /// use serde_json::json;
    ///
    /// let mut validator = Validator::object();
    /// validator.required("age").as_integer().min(0)?.compile()?;
    ///
    /// let records: Vec<_> = [json!({"age": 3}), json!({"age": -1})]
    ///     .iter()
    ///     .map(|r| r.as_object().unwrap().clone())
    ///     .collect();
    /// let results = validator.validate_batch(&records)?;
    ///
    /// assert!(results[0].is_empty());
    /// assert!(results[1].contains("age"));
    /// assert!(validator.errors().is_empty());
    /// # Ok::<(), checkup::UsageError>(())
    /// ```
    pub fn validate_batch(
        &self,
        records: &[Map<String, Value>],
    ) -> Result<Vec<ErrorMap>, UsageError> {
        records
            .par_iter()
            .map(|record| -> Result<ErrorMap, UsageError> {
                let mut errors = ErrorMap::new();
                self.run_entries(
                    record.iter().map(|(name, value)| (name.as_str(), Some(value))),
                    &mut errors,
                )?;
                Ok(errors)
            })
            .collect()
    }

    /// The errors accumulated so far.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// The accumulated errors as a stillwater `Validation`.
    pub fn report(&self) -> ValidationResult<()> {
        self.errors.to_validation()
    }

    /// Removes every accumulated error.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    fn compiled_field(&self, name: &str) -> Result<&CompiledField, UsageError> {
        self.compiled
            .get(name)
            .ok_or_else(|| UsageError::NotCompiled(name.to_string()))
    }

    fn run_entries<'a, I>(&self, entries: I, errors: &mut ErrorMap) -> Result<(), UsageError>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a Value>)>,
    {
        let mut seen = HashSet::new();
        for (name, value) in entries {
            seen.insert(name.to_string());
            if let Some(error) = self.evaluate_entry(name, value)? {
                record(errors, error);
            }
        }

        if self.config.report_absent_required {
            for name in self.schema.required_fields() {
                if !seen.contains(name) {
                    record(errors, required_error(name));
                }
            }
        }

        debug!(entries = seen.len(), errors = errors.len(), "validated entries");
        Ok(())
    }

    fn evaluate_entry(
        &self,
        name: &str,
        value: Option<&Value>,
    ) -> Result<Option<FieldError>, UsageError> {
        let value = match value {
            Some(Value::Null) if self.config.null_policy == NullPolicy::Missing => None,
            other => other,
        };

        match value {
            None => Ok(Some(required_error(name))),
            Some(value) => {
                let field = self.compiled_field(name)?;
                Ok(field.evaluate(name, value, self.config.enforce_types))
            }
        }
    }
}

fn required_error(name: &str) -> FieldError {
    FieldError::new(name, format!("Property {} is required", name)).with_code("required")
}

fn record(errors: &mut ErrorMap, error: FieldError) {
    trace!(field = %error.field, code = %error.code, "field failed validation");
    errors.record(error);
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Validator>();
    assert_sync::<Validator>();
};
