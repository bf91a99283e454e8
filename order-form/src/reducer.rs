//! Reducer logic for the order form.
//!
//! Every user interaction becomes one [`OrderAction`]; this reducer is the
//! only code that changes [`OrderState`].

use crate::action::OrderAction;
use crate::field::ContactField;
use crate::ledger::TicketSelections;
use crate::rules::RuleRegistry;
use crate::state::OrderState;
use crate::submission::OrderPayload;
use crate::transport::OrderTransport;
use box_office_core::{effect::Effect, environment::Clock, reducer::Reducer, smallvec, SmallVec};
use std::sync::Arc;

/// Environment dependencies for the order-form reducer
#[derive(Clone)]
pub struct OrderFormEnvironment {
    /// Field format rules
    pub rules: Arc<RuleRegistry>,
    /// Where accepted orders are sent
    pub transport: Arc<dyn OrderTransport>,
    /// Stamps payloads with their submission time
    pub clock: Arc<dyn Clock>,
}

impl OrderFormEnvironment {
    /// Creates a new `OrderFormEnvironment`
    #[must_use]
    pub fn new(
        rules: Arc<RuleRegistry>,
        transport: Arc<dyn OrderTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rules,
            transport,
            clock,
        }
    }
}

/// Reducer for the order form
#[derive(Clone, Debug, Default)]
pub struct OrderFormReducer;

impl OrderFormReducer {
    /// Creates a new `OrderFormReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn submit(state: &OrderState, env: &OrderFormEnvironment) -> SmallVec<[Effect<OrderAction>; 4]> {
        let payload = match OrderPayload::from_state(state, env.clock.now()) {
            Ok(payload) => payload,
            Err(reason) => {
                tracing::warn!(%reason, "Submission blocked");
                return SmallVec::new();
            },
        };

        tracing::debug!(total = %payload.total_cost, "Submitting order");
        let transport = Arc::clone(&env.transport);
        smallvec![Effect::future(async move {
            match transport.submit(payload).await {
                Ok(acknowledgement) => Some(OrderAction::SubmissionAcknowledged { acknowledgement }),
                Err(error) => Some(OrderAction::SubmissionFailed { error }),
            }
        })]
    }
}

/// Inserts the `/` once four expiry digits have been entered contiguously
///
/// A `/` right after the month is earlier formatting and is skipped, so a
/// formatted value formats to itself. Slashes anywhere else, or any other
/// length, leave the input unchanged.
#[must_use]
pub fn format_expiry(raw: String) -> String {
    let digits = match raw.as_bytes().get(2) {
        Some(b'/') => format!("{}{}", &raw[..2], &raw[3..]),
        _ => raw.clone(),
    };
    if digits.len() == 4 && digits.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        raw
    }
}

impl Reducer for OrderFormReducer {
    type State = OrderState;
    type Action = OrderAction;
    type Environment = OrderFormEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            OrderAction::Initialize { catalog } => {
                state.ticket_selections = TicketSelections::for_catalog(&catalog);
                tracing::debug!(bands = catalog.len(), "Ledger initialized");
            },

            OrderAction::UpdateTicketSelection {
                band_id,
                ticket_type,
                new_quantity,
                cost_delta,
            } => {
                let previous = state
                    .ticket_selections
                    .set_quantity(&band_id, &ticket_type, new_quantity);
                state.total_cost = state.total_cost.saturating_add(cost_delta);
                tracing::debug!(
                    band = %band_id,
                    ticket = %ticket_type,
                    previous,
                    new_quantity,
                    total = %state.total_cost,
                    "Ticket selection updated"
                );
            },

            OrderAction::UpdateField { field, value } => {
                let value = if field == ContactField::Expiry {
                    format_expiry(value)
                } else {
                    value
                };
                state.contact.set(field, value);
                let changed = state
                    .invalid_fields
                    .track(&env.rules, field, state.contact.get(field));
                if changed {
                    tracing::debug!(%field, invalid = state.invalid_fields.contains(field), "Field validity changed");
                }
            },

            OrderAction::Reset => {
                *state = OrderState::default();
                tracing::debug!("Order form reset");
            },

            OrderAction::Submit => return Self::submit(state, env),

            OrderAction::SubmissionAcknowledged { acknowledgement } => {
                tracing::info!(confirmation = %acknowledgement.confirmation, "Order acknowledged");
                *state = OrderState::default();
            },

            OrderAction::SubmissionFailed { error } => {
                tracing::error!(%error, "Order submission failed");
            },

            OrderAction::Unknown => {
                tracing::debug!("Ignoring unrecognized action");
            },
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{fixtures, BandId, Money, TicketTypeId};
    use crate::mocks::RecordingTransport;
    use crate::state::ContactDetails;
    use crate::validation::InvalidFields;
    use box_office_testing::{assertions, test_clock, ReducerTest};

    fn create_test_env() -> OrderFormEnvironment {
        OrderFormEnvironment::new(
            Arc::new(RuleRegistry::standard().unwrap()),
            Arc::new(RecordingTransport::new()),
            Arc::new(test_clock()),
        )
    }

    fn field(field: ContactField, value: &str) -> OrderAction {
        OrderAction::UpdateField {
            field,
            value: value.to_string(),
        }
    }

    fn select(band: &str, ticket: &str, new_quantity: u32, cents: i64) -> OrderAction {
        OrderAction::UpdateTicketSelection {
            band_id: BandId::new(band),
            ticket_type: TicketTypeId::new(ticket),
            new_quantity,
            cost_delta: Money::from_cents(cents),
        }
    }

    fn messy_state() -> OrderState {
        let mut state = OrderState::new();
        state
            .ticket_selections
            .set_quantity(&BandId::new("skalar"), &TicketTypeId::new("vip"), 4);
        state.total_cost = Money::from_cents(19_996);
        state.contact.first_name = "Ada".to_string();
        state.contact.cvv = "1".to_string();
        state.invalid_fields = [ContactField::Cvv].into_iter().collect();
        state
    }

    #[test]
    fn test_initialize_zeroes_every_ticket() {
        let catalog = fixtures::catalog();
        let expected = catalog.clone();

        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(OrderState::new())
            .when_action(OrderAction::Initialize { catalog })
            .then_state(move |state| {
                for band in expected.bands() {
                    for ticket in &band.ticket_types {
                        assert_eq!(state.ticket_selections.quantity(&band.id, &ticket.id), 0);
                        assert!(state.ticket_selections.band(&band.id).unwrap().contains_key(&ticket.id));
                    }
                }
                assert_eq!(state.total_cost, Money::ZERO);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_initialize_is_idempotent_and_keeps_contact() {
        let catalog = fixtures::catalog();

        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(OrderState {
                contact: ContactDetails {
                    first_name: "Ada".to_string(),
                    ..ContactDetails::default()
                },
                ..OrderState::default()
            })
            .when_action(OrderAction::Initialize {
                catalog: catalog.clone(),
            })
            .when_action(OrderAction::Initialize {
                catalog: catalog.clone(),
            })
            .then_state(move |state| {
                assert_eq!(state.ticket_selections, TicketSelections::for_catalog(&catalog));
                assert_eq!(state.contact.first_name, "Ada");
            })
            .run();
    }

    #[test]
    fn test_update_ticket_selection_applies_delta() {
        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(OrderState::new())
            .when_actions([
                OrderAction::Initialize {
                    catalog: fixtures::catalog(),
                },
                select("skalar", "vip", 2, 9998),
                select("skalar", "vip", 1, -4999),
                select("kpop-stars", "floor", 1, 8000),
            ])
            .then_state(|state| {
                assert_eq!(
                    state
                        .ticket_selections
                        .quantity(&BandId::new("skalar"), &TicketTypeId::new("vip")),
                    1
                );
                assert_eq!(state.total_cost, Money::from_cents(4999 + 8000));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_total_is_not_clamped() {
        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(OrderState::new())
            .when_action(select("skalar", "general", 0, -1500))
            .then_state(|state| assert_eq!(state.total_cost, Money::from_cents(-1500)))
            .run();
    }

    #[test]
    fn test_expiry_four_digits_are_formatted() {
        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(OrderState::new())
            .when_action(field(ContactField::Expiry, "1225"))
            .then_state(|state| {
                assert_eq!(state.contact.expiry, "12/25");
                assert!(state.invalid_fields.is_empty());
            })
            .run();
    }

    #[test]
    fn test_expiry_with_stray_slashes_is_stored_as_typed() {
        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(OrderState::new())
            .when_action(field(ContactField::Expiry, "1/2/25"))
            .then_state(|state| {
                assert_eq!(state.contact.expiry, "1/2/25");
                assert!(state.invalid_fields.contains(ContactField::Expiry));
            })
            .run();
    }

    #[test]
    fn test_huge_cost_deltas_saturate_instead_of_panicking() {
        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(OrderState::new())
            .when_actions([
                select("skalar", "vip", 1, i64::MAX),
                select("skalar", "vip", 2, i64::MAX),
            ])
            .then_state(|state| {
                assert_eq!(state.total_cost, Money::from_cents(i64::MAX));
                assert_eq!(
                    state
                        .ticket_selections
                        .quantity(&BandId::new("skalar"), &TicketTypeId::new("vip")),
                    2
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_expiry_short_input_passes_through() {
        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(OrderState::new())
            .when_action(field(ContactField::Expiry, "122"))
            .then_state(|state| {
                assert_eq!(state.contact.expiry, "122");
                assert!(state.invalid_fields.contains(ContactField::Expiry));
            })
            .run();
    }

    #[test]
    fn test_validity_uses_stored_value() {
        // "1325" formats to "13/25", which is then judged invalid
        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(OrderState::new())
            .when_action(field(ContactField::Expiry, "1325"))
            .then_state(|state| {
                assert_eq!(state.contact.expiry, "13/25");
                assert!(state.invalid_fields.contains(ContactField::Expiry));
            })
            .run();
    }

    #[test]
    fn test_field_update_only_touches_its_own_validity() {
        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(OrderState {
                invalid_fields: [ContactField::Address].into_iter().collect(),
                ..OrderState::default()
            })
            .when_actions([
                field(ContactField::FirstName, "Ada"),
                field(ContactField::Cvv, "12"),
            ])
            .then_state(|state| {
                let expected: InvalidFields = [ContactField::Address, ContactField::Cvv].into_iter().collect();
                assert_eq!(state.invalid_fields, expected);
                assert_eq!(state.contact.first_name, "Ada");
                assert_eq!(state.contact.cvv, "12");
            })
            .run();
    }

    #[test]
    fn test_fixing_a_field_removes_it() {
        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(OrderState::new())
            .when_actions([
                field(ContactField::CardNumber, "4111"),
                field(ContactField::CardNumber, "4111111111111111"),
            ])
            .then_state(|state| assert!(state.invalid_fields.is_empty()))
            .run();
    }

    #[test]
    fn test_reset_restores_initial_state() {
        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(messy_state())
            .when_action(OrderAction::Reset)
            .then_state(|state| assert_eq!(*state, OrderState::default()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_unknown_action_is_identity() {
        let before = messy_state();

        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(before.clone())
            .when_action(OrderAction::Unknown)
            .then_state(move |state| assert_eq!(*state, before))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_blocked_submit_changes_nothing() {
        let before = messy_state();

        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(before.clone())
            .when_action(OrderAction::Submit)
            .then_state(move |state| assert_eq!(*state, before))
            .then_effects(|effects| assertions::assert_effects_count(effects, 0))
            .run();
    }

    #[test]
    fn test_ready_submit_returns_transport_effect() {
        let mut ready = messy_state();
        ready.invalid_fields = InvalidFields::new();
        ready.contact = ContactDetails {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "1 Loop Rd".to_string(),
            card_number: "4111111111111111".to_string(),
            expiry: "01/30".to_string(),
            cvv: "321".to_string(),
        };
        let before = ready.clone();

        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(ready)
            .when_action(OrderAction::Submit)
            .then_state(move |state| assert_eq!(*state, before))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_acknowledgement_resets() {
        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(messy_state())
            .when_action(OrderAction::SubmissionAcknowledged {
                acknowledgement: crate::transport::Acknowledgement {
                    confirmation: "ABC123".to_string(),
                },
            })
            .then_state(|state| assert_eq!(*state, OrderState::default()))
            .run();
    }

    #[test]
    fn test_transport_failure_keeps_the_order() {
        let before = messy_state();

        ReducerTest::new(OrderFormReducer::new())
            .with_env(create_test_env())
            .given_state(before.clone())
            .when_action(OrderAction::SubmissionFailed {
                error: crate::transport::TransportError::Unavailable("timeout".to_string()),
            })
            .then_state(move |state| assert_eq!(*state, before))
            .run();
    }

    #[test]
    fn format_expiry_cases() {
        assert_eq!(format_expiry("1225".to_string()), "12/25");
        assert_eq!(format_expiry("12/25".to_string()), "12/25");
        assert_eq!(format_expiry("122".to_string()), "122");
        assert_eq!(format_expiry("12/2".to_string()), "12/2");
        assert_eq!(format_expiry("12345".to_string()), "12345");
        assert_eq!(format_expiry("ab12".to_string()), "ab12");
        assert_eq!(format_expiry("1/225".to_string()), "1/225");
        assert_eq!(format_expiry("1/2/25".to_string()), "1/2/25");
        assert_eq!(format_expiry("12/2/5".to_string()), "12/2/5");
        assert_eq!(format_expiry("/1225".to_string()), "/1225");
        assert_eq!(format_expiry(String::new()), "");
    }
}
