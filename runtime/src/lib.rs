//! # SIPK Runtime
//!
//! The imperative shell around the reducers.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, runs the reducer, and executes the returned effects
//! - **Console**: Line-oriented terminal I/O with retry-until-valid prompts
//!
//! ## Example
//!
//! ```ignore
//! use sipk_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use sipk_core::{action::Action, effect::Effect, reducer::Reducer};
use std::collections::VecDeque;

/// Console I/O and prompt helpers
pub mod console;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Feedback actions kept producing more actions past the configured limit
        ///
        /// State changes made before the limit was hit are kept.
        #[error("Action feedback loop exceeded {limit} reductions (last action: {last_action})")]
        FeedbackLimitExceeded {
            /// Configured maximum reductions per `send`
            limit: usize,
            /// Name of the action that would have exceeded the limit
            last_action: &'static str,
        },
    }
}

pub use error::StoreError;

/// Store configuration
///
/// # Example
///
/// ```
/// use sipk_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_actions_per_send(8);
/// assert_eq!(config.max_actions_per_send, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum reductions (the sent action plus fed-back actions) per `send`
    pub max_actions_per_send: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_actions_per_send: usize) -> Self {
        Self {
            max_actions_per_send,
        }
    }

    /// Set the feedback limit
    #[must_use]
    pub const fn with_max_actions_per_send(mut self, limit: usize) -> Self {
        self.max_actions_per_send = limit;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_actions_per_send: 64,
        }
    }
}

/// Store module - the runtime for reducers
pub mod store {
    use super::{Action, Effect, Reducer, StoreConfig, StoreError, VecDeque};
    use std::marker::PhantomData;

    /// The Store - owns state and coordinates reducer execution
    ///
    /// Single-threaded: the shell holds the store and borrows it mutably for
    /// every `send`. State is never touched except by the reducer.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer type
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
        _action: PhantomData<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: Action,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub const fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
                _action: PhantomData,
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer, then executes the returned effects in order.
        /// `Effect::Send` actions are queued and reduced before this call
        /// returns.
        ///
        /// Returns the number of actions reduced.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] when fed-back actions
        /// push the reduction count past `StoreConfig::max_actions_per_send`.
        #[tracing::instrument(skip_all, name = "store_send", fields(action = action.name()))]
        pub fn send(&mut self, action: A) -> Result<usize, StoreError> {
            let mut queue = VecDeque::from([action]);
            let mut reduced = 0;

            while let Some(next) = queue.pop_front() {
                if reduced >= self.config.max_actions_per_send {
                    tracing::warn!(
                        limit = self.config.max_actions_per_send,
                        action = next.name(),
                        "Feedback limit exceeded, dropping remaining actions"
                    );
                    return Err(StoreError::FeedbackLimitExceeded {
                        limit: self.config.max_actions_per_send,
                        last_action: next.name(),
                    });
                }

                let kind = if next.is_command() { "command" } else { "event" };
                tracing::debug!(action = next.name(), kind, "Processing action");
                let effects = self.reducer.reduce(&mut self.state, next, &self.environment);
                reduced += 1;

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                for effect in effects {
                    Self::execute_effect(effect, &mut queue);
                }
            }

            Ok(reduced)
        }

        fn execute_effect(effect: Effect<A>, queue: &mut VecDeque<A>) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                },
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    for effect in effects {
                        Self::execute_effect(effect, queue);
                    }
                },
                Effect::Send(action) => {
                    tracing::trace!(action = action.name(), "Effect::Send queued an action");
                    queue.push_back(*action);
                },
            }
        }

        /// Read state via a closure
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Access the injected environment
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Consume the store and return the final state
        pub fn into_state(self) -> S {
            self.state
        }
    }
}

pub use store::Store;
