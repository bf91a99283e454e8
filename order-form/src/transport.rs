//! Order submission transport.
//!
//! The order form hands a finished [`OrderPayload`] to an [`OrderTransport`]
//! and waits for an [`Acknowledgement`]. Retries, timeouts and cancellation
//! belong to the transport, not to the form.

use crate::submission::OrderPayload;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use uuid::Uuid;

/// Receipt returned by the order endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    /// Confirmation number shown to the user
    pub confirmation: String,
}

impl Acknowledgement {
    /// Acknowledgement with a fresh random confirmation number
    #[must_use]
    pub fn generate() -> Self {
        Self {
            confirmation: Uuid::new_v4().to_string(),
        }
    }
}

/// Errors an order transport can report
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum TransportError {
    /// The endpoint could not be reached.
    #[error("Order endpoint unavailable: {0}")]
    Unavailable(String),

    /// The endpoint refused the order.
    #[error("Order rejected by endpoint: {0}")]
    Rejected(String),
}

/// Boxed future returned by [`OrderTransport::submit`]
pub type SubmitFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Acknowledgement, TransportError>> + Send + 'a>>;

/// Delivers order payloads to the order-processing endpoint
///
/// Returns `Pin<Box<dyn Future>>` rather than using `async fn` so the
/// transport can live behind `Arc<dyn OrderTransport>` in the environment
/// and be captured by effects.
pub trait OrderTransport: Send + Sync {
    /// Submits one order
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the order was not accepted.
    fn submit(&self, payload: OrderPayload) -> SubmitFuture<'_>;
}

/// Stand-in transport that logs the request and acknowledges it
#[derive(Debug, Clone)]
pub struct LoggingTransport {
    endpoint: String,
}

impl LoggingTransport {
    /// Creates a logging transport for `endpoint`
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint named in log lines
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl OrderTransport for LoggingTransport {
    fn submit(&self, payload: OrderPayload) -> SubmitFuture<'_> {
        Box::pin(async move {
            tracing::info!(
                endpoint = %self.endpoint,
                total = %payload.total_cost,
                ?payload,
                "POST {}", self.endpoint
            );
            Ok(Acknowledgement::generate())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Money;
    use crate::ledger::TicketSelections;
    use crate::state::ContactDetails;
    use box_office_testing::test_clock;
    use box_office_core::environment::Clock;

    #[tokio::test]
    async fn logging_transport_acknowledges() {
        let transport = LoggingTransport::new("/api/purchaseTickets");
        let payload = OrderPayload {
            ticket_selections: TicketSelections::new(),
            total_cost: Money::from_cents(1500),
            contact: ContactDetails::default(),
            submitted_at: test_clock().now(),
        };

        let ack = transport.submit(payload).await.unwrap();

        assert_eq!(transport.endpoint(), "/api/purchaseTickets");
        assert!(Uuid::parse_str(&ack.confirmation).is_ok());
    }

    #[test]
    fn confirmations_are_unique() {
        assert_ne!(Acknowledgement::generate(), Acknowledgement::generate());
    }
}
