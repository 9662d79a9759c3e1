//! Declarative schema description.
//!
//! A [`Schema`] records which fields exist, which are required, and for each
//! field a [`FieldSpec`]: its optional primitive type and ordered rule list.
//! Fields are declared through [`FieldBuilder`], obtained from
//! [`Validator::required`](crate::Validator::required) or
//! [`Validator::optional`](crate::Validator::optional).

mod field;

use indexmap::{IndexMap, IndexSet};

use crate::error::UsageError;
use crate::kind::PrimitiveKind;
use crate::rule::RuleDeclaration;

pub use field::FieldBuilder;

/// The declaration of a single field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSpec {
    /// The declared primitive type, if any.
    pub value_type: Option<PrimitiveKind>,
    /// Rules in declaration order.
    pub rules: Vec<RuleDeclaration>,
    /// Literal message used when type enforcement rejects a value.
    pub type_message: Option<String>,
}

impl FieldSpec {
    /// Checks every rule against the declared type.
    ///
    /// Unlike the check made when a rule is attached, this does not depend on
    /// whether the type was set before or after the rule.
    pub fn check_rule_types(&self, field: &str) -> Result<(), UsageError> {
        let Some(value_type) = self.value_type else {
            return Ok(());
        };
        match self.rules.iter().find(|rule| !rule.kind.accepts(value_type)) {
            Some(rule) => Err(UsageError::TypeConflict {
                field: field.to_string(),
                rule: rule.kind,
                value_type,
            }),
            None => Ok(()),
        }
    }
}

/// The declarative description of one flat object.
///
/// Every name in the required set has an entry in the field table.
#[derive(Debug, Clone)]
pub struct Schema {
    root_type: PrimitiveKind,
    required: IndexSet<String>,
    fields: IndexMap<String, FieldSpec>,
}

impl Schema {
    /// Creates an empty schema with the given root type.
    pub fn new(root_type: PrimitiveKind) -> Self {
        Self {
            root_type,
            required: IndexSet::new(),
            fields: IndexMap::new(),
        }
    }

    pub fn root_type(&self) -> PrimitiveKind {
        self.root_type
    }

    /// Introduces `name` with an empty spec, replacing any earlier one, and
    /// sets whether it is required.
    pub(crate) fn declare(&mut self, name: &str, required: bool) {
        self.fields.insert(name.to_string(), FieldSpec::default());
        if required {
            self.required.insert(name.to_string());
        } else {
            self.required.shift_remove(name);
        }
    }

    /// Replaces the spec of a field.
    pub(crate) fn store(&mut self, name: String, spec: FieldSpec) {
        self.fields.insert(name, spec);
    }

    /// Returns the spec for `name`.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Iterates over fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Iterates over required field names in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
