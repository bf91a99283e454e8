//! Contact and payment fields of the order form.

use crate::error::OrderFormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six free-form inputs the user fills in
///
/// The set is closed, so the invalid-field set can only ever hold these
/// names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    /// Given name
    FirstName,
    /// Family name
    LastName,
    /// Postal address
    Address,
    /// Payment card number
    CardNumber,
    /// Card expiry, `MM/YY`
    Expiry,
    /// Card security code
    Cvv,
}

impl ContactField {
    /// Every field, in form order
    pub const ALL: [Self; 6] = [
        Self::FirstName,
        Self::LastName,
        Self::Address,
        Self::CardNumber,
        Self::Expiry,
        Self::Cvv,
    ];

    /// Wire name, as used in actions and payloads
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Address => "address",
            Self::CardNumber => "cardNumber",
            Self::Expiry => "expiry",
            Self::Cvv => "cvv",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Address => "Address",
            Self::CardNumber => "Credit Card Number",
            Self::Expiry => "Expiry Date",
            Self::Cvv => "CVV",
        }
    }

    /// Inline message shown while the field is invalid
    #[must_use]
    pub fn error_message(self) -> String {
        format!("{} is required.", self.label())
    }

    /// Whether the stored value is masked in logs and debug output
    #[must_use]
    pub const fn is_sensitive(self) -> bool {
        matches!(self, Self::CardNumber | Self::Cvv)
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContactField {
    type Err = OrderFormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| OrderFormError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for field in ContactField::ALL {
            assert_eq!(field.name().parse::<ContactField>().unwrap(), field);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "middleName".parse::<ContactField>().unwrap_err();
        assert!(matches!(err, OrderFormError::UnknownField(name) if name == "middleName"));
    }

    #[test]
    fn serde_uses_camel_case_names() {
        let json = serde_json::to_string(&ContactField::CardNumber).unwrap();
        assert_eq!(json, "\"cardNumber\"");
        assert!(serde_json::from_str::<ContactField>("\"nickname\"").is_err());
    }

    #[test]
    fn error_messages() {
        assert_eq!(ContactField::FirstName.error_message(), "First Name is required.");
        assert_eq!(ContactField::CardNumber.error_message(), "Credit Card Number is required.");
        assert_eq!(ContactField::Cvv.error_message(), "CVV is required.");
    }
}
