//! Order-form state.

use crate::catalog::Money;
use crate::field::ContactField;
use crate::ledger::TicketSelections;
use crate::validation::InvalidFields;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six free-form values the user types in
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Postal address
    pub address: String,
    /// Payment card number
    pub card_number: String,
    /// Card expiry, `MM/YY`
    pub expiry: String,
    /// Card security code
    pub cvv: String,
}

impl ContactDetails {
    /// Value currently stored for `field`
    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Address => &self.address,
            ContactField::CardNumber => &self.card_number,
            ContactField::Expiry => &self.expiry,
            ContactField::Cvv => &self.cvv,
        }
    }

    /// Replaces the value stored for `field`
    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Address => &mut self.address,
            ContactField::CardNumber => &mut self.card_number,
            ContactField::Expiry => &mut self.expiry,
            ContactField::Cvv => &mut self.cvv,
        };
        *slot = value;
    }

    /// Fields that are still empty, in form order
    pub fn missing(&self) -> impl Iterator<Item = ContactField> + '_ {
        ContactField::ALL
            .into_iter()
            .filter(|&field| self.get(field).is_empty())
    }
}

// Card number and CVV must never reach logs.
impl fmt::Debug for ContactDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactDetails")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("address", &self.address)
            .field("card_number", &mask(&self.card_number))
            .field("expiry", &self.expiry)
            .field("cvv", &mask(&self.cvv))
            .finish()
    }
}

/// Masks all but the last four characters
pub(crate) fn mask(value: &str) -> String {
    let count = value.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = value.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}

/// Everything the order form currently holds
///
/// `Default` is the pristine session state: no ledger entries, zero total,
/// empty contact fields and no invalid fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderState {
    /// Band → ticket type → quantity
    pub ticket_selections: TicketSelections,
    /// Running total, kept in step with every selection change
    pub total_cost: Money,
    /// Contact and payment fields
    #[serde(flatten)]
    pub contact: ContactDetails,
    /// Fields currently failing validation
    #[serde(rename = "errors")]
    pub invalid_fields: InvalidFields,
}

impl OrderState {
    /// Creates the pristine state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
