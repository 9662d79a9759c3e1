//! A lock-guarded validator for use from several threads.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::ErrorMap;
use crate::validator::Validator;

/// A [`Validator`] behind an `Arc<Mutex<...>>`.
///
/// The declaration API is sequential: a field is declared, typed, given
/// rules and compiled in one chain. [`with`](Self::with) holds the lock for
/// the whole closure, so one caller's chain never interleaves with
/// another's. Clones share the same validator.
///
/// # Example
///
/// ```rust
/// use checkup::{SharedValidator, Validator};
/// use serde_json::json;
///
/// let shared = SharedValidator::new(Validator::object());
/// shared.with(|v| -> Result<bool, checkup::UsageError> {
///     v.required("name").as_string().min_length(1)?.compile()?;
///     v.validate_property("name", &json!(""))
/// })?;
///
/// assert!(shared.errors().contains("name"));
/// # Ok::<(), checkup::UsageError>(())
/// ```
#[derive(Clone)]
pub struct SharedValidator {
    inner: Arc<Mutex<Validator>>,
}

impl SharedValidator {
    pub fn new(validator: Validator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(validator)),
        }
    }

    /// Runs `f` with exclusive access to the validator.
    pub fn with<R>(&self, f: impl FnOnce(&mut Validator) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Returns a snapshot of the accumulated errors.
    pub fn errors(&self) -> ErrorMap {
        self.inner.lock().errors().clone()
    }

    /// Returns the validator if this is the last handle to it.
    pub fn into_inner(self) -> Result<Validator, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<Validator> for SharedValidator {
    fn from(validator: Validator) -> Self {
        Self::new(validator)
    }
}
