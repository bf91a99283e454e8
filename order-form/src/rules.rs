//! Validation rule registry.
//!
//! Rules are compiled once into a [`RuleRegistry`] value that callers own
//! and pass to the validator. There is no process-wide rule table.

use crate::error::{OrderFormError, Result};
use crate::field::ContactField;
use regex::Regex;

/// Letters and whitespace.
pub const NAME_PATTERN: &str = r"^[A-Za-z\s]+$";
/// Word characters, whitespace and `. , # -`.
pub const ADDRESS_PATTERN: &str = r"^[A-Za-z0-9_\s.,#-]+$";
/// Exactly sixteen digits.
pub const CARD_NUMBER_PATTERN: &str = r"^[0-9]{16}$";
/// `MM/YY` with month 01-12.
pub const EXPIRY_PATTERN: &str = r"^(0[1-9]|1[0-2])/[0-9]{2}$";
/// Three or four digits.
pub const CVV_PATTERN: &str = r"^[0-9]{3,4}$";

/// Compiled format rules, one per kind of field
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    name: Regex,
    address: Regex,
    card_number: Regex,
    expiry: Regex,
    cvv: Regex,
}

impl RuleRegistry {
    /// Compiles the standard rule set
    ///
    /// # Errors
    ///
    /// Returns [`OrderFormError::InvalidPattern`] if a pattern fails to
    /// compile.
    pub fn standard() -> Result<Self> {
        Ok(Self {
            name: compile("name", NAME_PATTERN)?,
            address: compile("address", ADDRESS_PATTERN)?,
            card_number: compile("cardNumber", CARD_NUMBER_PATTERN)?,
            expiry: compile("expiry", EXPIRY_PATTERN)?,
            cvv: compile("cvv", CVV_PATTERN)?,
        })
    }

    /// The rule that governs `field`
    ///
    /// Both name fields share the name rule, which is also the default for
    /// any field without a dedicated pattern.
    #[must_use]
    pub const fn rule_for(&self, field: ContactField) -> &Regex {
        match field {
            ContactField::Address => &self.address,
            ContactField::CardNumber => &self.card_number,
            ContactField::Expiry => &self.expiry,
            ContactField::Cvv => &self.cvv,
            ContactField::FirstName | ContactField::LastName => &self.name,
        }
    }

    /// Whether already-trimmed input satisfies the rule for `field`
    #[must_use]
    pub fn matches(&self, field: ContactField, trimmed: &str) -> bool {
        self.rule_for(field).is_match(trimmed)
    }
}

fn compile(rule: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| OrderFormError::InvalidPattern { rule, source })
}
