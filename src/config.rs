//! Validator configuration.
//!
//! Settings are applied through the `with_*` builder methods on
//! [`Validator`](crate::Validator); [`ValidatorConfig`] holds the result.

/// How bulk validation treats a JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullPolicy {
    /// `null` means the value is missing: the field gets the required
    /// message and its rules are not run.
    #[default]
    Missing,
    /// `null` is an ordinary value and is handed to the field's rules.
    Present,
}

/// Settings controlling how a [`Validator`](crate::Validator) evaluates data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidatorConfig {
    /// Treatment of `null` in `validate_all` and `validate_entries`.
    pub null_policy: NullPolicy,
    /// Record the required message for required fields absent from the data.
    pub report_absent_required: bool,
    /// Reject values that do not match the field's declared type before any
    /// rule runs.
    pub enforce_types: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.null_policy, NullPolicy::Missing);
        assert!(!config.report_absent_required);
        assert!(!config.enforce_types);
    }
}
