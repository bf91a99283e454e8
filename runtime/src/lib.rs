//! # Box Office Runtime
//!
//! The Store runtime that coordinates reducer execution and effect handling
//! for a single order-form session.
//!
//! ## Core Components
//!
//! - **Store**: owns the state and the reducer, executes effects
//! - **Feedback loop**: actions produced by effects are reduced in turn
//!
//! ## Execution model
//!
//! One action is processed to completion before the next is accepted. The
//! reducer runs under the state write lock, the lock is released, and then
//! each returned effect is driven to completion in order. Any action an
//! effect produces goes to the back of the same queue, so a `send()` only
//! returns once its whole feedback chain has settled.
//!
//! ## Example
//!
//! ```ignore
//! use box_office_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use box_office_core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Store module - the runtime for reducers
pub mod store {
    use super::{Arc, Effect, Mutex, Reducer, RwLock, VecDeque};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` so reads never observe a half-applied action)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Cloning a Store is cheap and every clone drives the same session.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        /// Held for the full duration of a `send()`, including effects.
        turn: Arc<Mutex<()>>,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                turn: Arc::clone(&self.turn),
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: Clone + std::fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                turn: Arc::new(Mutex::new(())),
            }
        }

        /// Send an action to the store
        ///
        /// 1. Waits for any in-flight `send()` to finish
        /// 2. Acquires the write lock and calls the reducer
        /// 3. Releases the lock and drives each returned effect
        /// 4. Reduces every action the effects produce, in order
        ///
        /// # Returns
        ///
        /// The actions produced by effects during this call, in the order
        /// they were reduced. The initial action is not included.
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic propagates. Reducers should be
        /// pure functions that do not panic.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Vec<A> {
            let _turn = self.turn.lock().await;

            let mut feedback = Vec::new();
            let mut queue = VecDeque::from([action]);

            while let Some(action) = queue.pop_front() {
                tracing::trace!(?action, "Reducing action");

                let effects = {
                    let mut state = self.state.write().await;
                    self.reducer.reduce(&mut *state, action, &self.environment)
                };

                for effect in effects {
                    if let Some(produced) = Self::execute_effect(effect).await {
                        feedback.push(produced.clone());
                        queue.push_back(produced);
                    }
                }
            }

            feedback
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let total = store.state(|s| s.total_cost).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// The environment this store was built with
        #[must_use]
        pub fn environment(&self) -> &E {
            &self.environment
        }

        async fn execute_effect(effect: Effect<A>) -> Option<A> {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    None
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    let produced = fut.await;
                    if produced.is_none() {
                        tracing::trace!("Effect::Future completed with no action");
                    }
                    produced
                },
            }
        }
    }
}

pub use store::Store;
