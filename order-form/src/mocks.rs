//! Test doubles for the order form.

use crate::submission::OrderPayload;
use crate::transport::{Acknowledgement, OrderTransport, SubmitFuture, TransportError};
use std::sync::{Arc, Mutex};

/// Transport that records every payload it receives
///
/// Acknowledges with sequential confirmations (`CONF-0001`, ...) unless a
/// failure has been queued with [`RecordingTransport::fail_with`].
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    submitted: Arc<Mutex<Vec<OrderPayload>>>,
    failure: Arc<Mutex<Option<TransportError>>>,
}

impl RecordingTransport {
    /// Creates a transport that accepts everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following submission fail with `error`
    pub fn fail_with(&self, error: TransportError) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(error);
        }
    }

    /// Payloads received so far, oldest first
    #[must_use]
    pub fn submitted(&self) -> Vec<OrderPayload> {
        self.submitted
            .lock()
            .map(|submitted| submitted.clone())
            .unwrap_or_default()
    }
}

impl OrderTransport for RecordingTransport {
    fn submit(&self, payload: OrderPayload) -> SubmitFuture<'_> {
        Box::pin(async move {
            let failure = self.failure.lock().ok().and_then(|failure| failure.clone());
            let mut submitted = self
                .submitted
                .lock()
                .map_err(|_| TransportError::Unavailable("recording lock poisoned".to_string()))?;
            submitted.push(payload);

            match failure {
                Some(error) => Err(error),
                None => Ok(Acknowledgement {
                    confirmation: format!("CONF-{:04}", submitted.len()),
                }),
            }
        })
    }
}
