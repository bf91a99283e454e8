//! Band Ticket Order Form - client-side order state for a concert box office
//!
//! A visitor picks ticket quantities per band, types contact and payment
//! details, and submits. This crate holds everything the page needs between
//! keystrokes:
//!
//! - **Ticket ledger**: band → ticket type → quantity, with a running total
//! - **Field validation**: format rules for the six contact fields
//! - **Invalid-field tracker**: which fields currently fail their rule
//! - **Submission gate**: blocks empty or incomplete orders with a notice
//!
//! # Architecture
//!
//! ```text
//!   UI event ──► OrderAction ──► OrderFormReducer ──► OrderState
//!                                       │
//!                                  Effect::Future
//!                                       │
//!                                       ▼
//!                               OrderTransport::submit
//!                                       │
//!             SubmissionAcknowledged / SubmissionFailed (fed back)
//! ```
//!
//! All state changes go through [`reducer::OrderFormReducer`]. The
//! [`form::OrderForm`] facade runs it in a [`box_office_runtime::Store`].

pub mod action;
pub mod catalog;
pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod ledger;
pub mod mocks;
pub mod reducer;
pub mod rules;
pub mod state;
pub mod submission;
pub mod transport;
pub mod validation;

pub use action::OrderAction;
pub use catalog::{Band, BandId, Catalog, Money, TicketType, TicketTypeId};
pub use config::Config;
pub use error::{OrderFormError, Result};
pub use field::ContactField;
pub use form::{OrderForm, OrderStore};
pub use ledger::TicketSelections;
pub use reducer::{OrderFormEnvironment, OrderFormReducer};
pub use rules::RuleRegistry;
pub use state::{ContactDetails, OrderState};
pub use submission::{OrderPayload, SubmissionError};
pub use transport::{Acknowledgement, LoggingTransport, OrderTransport, TransportError};
pub use validation::{InvalidFields, Validity};
