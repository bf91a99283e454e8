//! Field validation and the invalid-field tracker.

use crate::field::ContactField;
use crate::rules::RuleRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Judgment on one field value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validity {
    /// The value satisfies the field's format rule
    Valid,
    /// The value is empty or malformed
    Invalid,
}

impl Validity {
    /// Whether the value passed
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Validates a raw input value for `field`
///
/// Surrounding whitespace is trimmed first. An empty value is always
/// invalid. Never fails and never touches shared state.
#[must_use]
pub fn validate(rules: &RuleRegistry, field: ContactField, raw: &str) -> Validity {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && rules.matches(field, trimmed) {
        Validity::Valid
    } else {
        Validity::Invalid
    }
}

/// The contact fields currently failing validation
///
/// Updated one field at a time as the user edits: fields that have not
/// been touched keep whatever status they had, even if stale.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvalidFields(BTreeSet<ContactField>);

impl InvalidFields {
    /// Creates an empty set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Validates `value` and folds the judgment in for `field` only
    ///
    /// Returns `true` if the set changed.
    pub fn track(&mut self, rules: &RuleRegistry, field: ContactField, value: &str) -> bool {
        self.apply(field, validate(rules, field, value))
    }

    /// Folds an existing judgment in for `field`
    ///
    /// Returns `true` if the set changed.
    pub fn apply(&mut self, field: ContactField, validity: Validity) -> bool {
        match validity {
            Validity::Invalid => self.0.insert(field),
            Validity::Valid => self.0.remove(&field),
        }
    }

    /// Whether `field` is currently invalid
    #[must_use]
    pub fn contains(&self, field: ContactField) -> bool {
        self.0.contains(&field)
    }

    /// Whether every tracked field is valid
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Invalid fields in form order
    pub fn iter(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ContactField> for InvalidFields {
    fn from_iter<I: IntoIterator<Item = ContactField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
