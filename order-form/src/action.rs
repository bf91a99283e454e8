//! Actions accepted by the order-form reducer.

use crate::catalog::{BandId, Catalog, Money, TicketTypeId};
use crate::error::{OrderFormError, Result};
use crate::field::ContactField;
use crate::state::mask;
use crate::transport::{Acknowledgement, TransportError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every input the order form reacts to
///
/// Encoded as JSON objects tagged by `"type"`. A tag this enum does not
/// know decodes to [`OrderAction::Unknown`], which the reducer ignores.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum OrderAction {
    /// Shape the ledger after the catalog, every quantity zero
    Initialize {
        /// Bands on sale this session
        catalog: Catalog,
    },

    /// One ticket quantity changed
    UpdateTicketSelection {
        /// Band the ticket belongs to
        band_id: BandId,
        /// Ticket type within the band
        ticket_type: TicketTypeId,
        /// Quantity now selected
        new_quantity: u32,
        /// `(new − previous) × unit price`, computed by the caller
        cost_delta: Money,
    },

    /// The user edited a contact field
    UpdateField {
        /// Field edited
        field: ContactField,
        /// Raw input
        value: String,
    },

    /// Return to the pristine state
    Reset,

    /// The user asked to place the order
    Submit,

    /// The transport accepted the order
    SubmissionAcknowledged {
        /// Transport receipt
        acknowledgement: Acknowledgement,
    },

    /// The transport could not deliver the order
    SubmissionFailed {
        /// What the transport reported
        error: TransportError,
    },

    /// Any tag not listed above
    #[serde(other)]
    Unknown,
}

impl OrderAction {
    /// Decodes one JSON action
    ///
    /// # Errors
    ///
    /// Returns [`OrderFormError::ActionDecode`] when the JSON is malformed,
    /// lacks a `"type"` tag, or a known action carries a bad payload (for
    /// example a field name outside the contact fields).
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(OrderFormError::ActionDecode)
    }

    /// Short name for logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Initialize { .. } => "initialize",
            Self::UpdateTicketSelection { .. } => "updateTicketSelection",
            Self::UpdateField { .. } => "updateField",
            Self::Reset => "reset",
            Self::Submit => "submit",
            Self::SubmissionAcknowledged { .. } => "submissionAcknowledged",
            Self::SubmissionFailed { .. } => "submissionFailed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Debug for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialize { catalog } => f
                .debug_struct("Initialize")
                .field("bands", &catalog.len())
                .finish(),
            Self::UpdateTicketSelection {
                band_id,
                ticket_type,
                new_quantity,
                cost_delta,
            } => f
                .debug_struct("UpdateTicketSelection")
                .field("band_id", band_id)
                .field("ticket_type", ticket_type)
                .field("new_quantity", new_quantity)
                .field("cost_delta", cost_delta)
                .finish(),
            Self::UpdateField { field, value } => {
                let shown = if field.is_sensitive() { mask(value) } else { value.clone() };
                f.debug_struct("UpdateField")
                    .field("field", field)
                    .field("value", &shown)
                    .finish()
            },
            Self::Reset => f.write_str("Reset"),
            Self::Submit => f.write_str("Submit"),
            Self::SubmissionAcknowledged { acknowledgement } => f
                .debug_struct("SubmissionAcknowledged")
                .field("acknowledgement", acknowledgement)
                .finish(),
            Self::SubmissionFailed { error } => f
                .debug_struct("SubmissionFailed")
                .field("error", error)
                .finish(),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}
