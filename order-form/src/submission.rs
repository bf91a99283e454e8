//! Submission gate and order payload.

use crate::catalog::Money;
use crate::ledger::TicketSelections;
use crate::state::{ContactDetails, OrderState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an order may not be submitted yet
///
/// The display text is the notice shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionError {
    /// The total is zero or negative.
    #[error("Please select at least one ticket to purchase.")]
    NoTickets,

    /// A contact field is empty or currently invalid.
    #[error("Please fill in all fields before submitting.")]
    IncompleteFields,
}

/// Checks whether `state` may be submitted
///
/// Checks run in order: tickets first, then fields. Never mutates state.
///
/// # Errors
///
/// - [`SubmissionError::NoTickets`] if the total is not positive
/// - [`SubmissionError::IncompleteFields`] if any field is invalid or empty
pub fn check(state: &OrderState) -> Result<(), SubmissionError> {
    if !state.total_cost.is_positive() {
        return Err(SubmissionError::NoTickets);
    }
    if !state.invalid_fields.is_empty() || state.contact.missing().next().is_some() {
        return Err(SubmissionError::IncompleteFields);
    }
    Ok(())
}

/// What is sent to the order endpoint
///
/// Everything in the order state except the invalid-field set, plus the
/// submission time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    /// Band → ticket type → quantity
    pub ticket_selections: TicketSelections,
    /// Order total
    pub total_cost: Money,
    /// Contact and payment fields
    #[serde(flatten)]
    pub contact: ContactDetails,
    /// When the order was handed to the transport
    pub submitted_at: DateTime<Utc>,
}

impl OrderPayload {
    /// Runs the gate and builds the payload from `state`
    ///
    /// # Errors
    ///
    /// Returns the first failing check, see [`check`].
    pub fn from_state(state: &OrderState, submitted_at: DateTime<Utc>) -> Result<Self, SubmissionError> {
        check(state)?;
        Ok(Self {
            ticket_selections: state.ticket_selections.clone(),
            total_cost: state.total_cost,
            contact: state.contact.clone(),
            submitted_at,
        })
    }
}
