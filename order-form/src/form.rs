//! One order-form session.
//!
//! [`OrderForm`] wraps a [`Store`] running the [`OrderFormReducer`] and adds
//! the request/response shape the page needs around submission.

use crate::action::OrderAction;
use crate::catalog::Catalog;
use crate::error::{OrderFormError, Result};
use crate::reducer::{OrderFormEnvironment, OrderFormReducer};
use crate::state::OrderState;
use crate::submission;
use crate::transport::{Acknowledgement, TransportError};
use box_office_runtime::Store;

/// Store type driving one order-form session
pub type OrderStore = Store<OrderState, OrderAction, OrderFormEnvironment, OrderFormReducer>;

/// A single visitor's order form
///
/// Keeps the session catalog so the ledger can be re-seeded with zero
/// quantities once an order has been acknowledged.
#[derive(Clone)]
pub struct OrderForm {
    store: OrderStore,
    catalog: Catalog,
}

impl OrderForm {
    /// Opens a session with the ledger shaped after `catalog`
    pub async fn new(catalog: Catalog, environment: OrderFormEnvironment) -> Self {
        let store = Store::new(OrderState::default(), OrderFormReducer::new(), environment);
        let form = Self { store, catalog };
        form.initialize().await;
        form
    }

    /// Reduces one action and returns any feedback actions it produced
    pub async fn dispatch(&self, action: OrderAction) -> Vec<OrderAction> {
        tracing::debug!(kind = action.kind(), "Dispatching");
        let acknowledged = |action: &OrderAction| matches!(action, OrderAction::SubmissionAcknowledged { .. });
        let reseed = acknowledged(&action);
        let feedback = self.store.send(action).await;
        if reseed || feedback.iter().any(acknowledged) {
            self.initialize().await;
        }
        feedback
    }

    async fn initialize(&self) {
        let _ = self
            .store
            .send(OrderAction::Initialize {
                catalog: self.catalog.clone(),
            })
            .await;
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> OrderState {
        self.store.state(Clone::clone).await
    }

    /// Submits the order
    ///
    /// On acknowledgement the form is already back in its initial state, with
    /// every ticket of the catalog at zero, when this returns. On any error
    /// the state is untouched.
    ///
    /// # Errors
    ///
    /// - [`OrderFormError::Submission`] with the user-facing notice when the
    ///   order is not ready
    /// - [`OrderFormError::Transport`] when the transport fails
    pub async fn submit(&self) -> Result<Acknowledgement> {
        submission::check(&self.snapshot().await)?;

        for action in self.dispatch(OrderAction::Submit).await {
            match action {
                OrderAction::SubmissionAcknowledged { acknowledgement } => return Ok(acknowledgement),
                OrderAction::SubmissionFailed { error } => return Err(error.into()),
                _ => {},
            }
        }

        // Another dispatch changed the order between the check and the send.
        submission::check(&self.snapshot().await)?;
        Err(OrderFormError::Transport(TransportError::Unavailable(
            "no response from transport".to_string(),
        )))
    }
}
