//! Reducer for accounts, profiles and bookings.
//!
//! Commands are validated against the current state. A valid command becomes
//! an event that is applied immediately; an invalid one becomes
//! `ValidationFailed`, which only records `last_error`.

use crate::error::BookingError;
use crate::types::{
    AppAction, AppState, Booking, BookingChanges, BookingRequest, Password, Profile,
    ProfileUpdate, UserId,
};
use sipk_core::{effect::Effect, environment::Clock, reducer::Reducer, SmallVec};
use std::sync::Arc;

/// Account rules
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountPolicy {
    /// Minimum trimmed password length
    pub min_password_len: usize,
}

impl Default for AccountPolicy {
    fn default() -> Self {
        Self {
            min_password_len: 4,
        }
    }
}

/// Environment dependencies for the reservation reducer
#[derive(Clone)]
pub struct AppEnvironment {
    /// Clock for booking timestamps
    pub clock: Arc<dyn Clock>,
    /// Account rules
    pub policy: AccountPolicy,
}

impl AppEnvironment {
    /// Creates an environment with the default policy
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            policy: AccountPolicy::default(),
        }
    }

    /// Replaces the account policy
    #[must_use]
    pub const fn with_policy(mut self, policy: AccountPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Reducer for the reservation system
#[derive(Clone, Debug, Default)]
pub struct AppReducer;

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn validate_register(
        state: &AppState,
        policy: AccountPolicy,
        user_id: &UserId,
        password: &Password,
        profile: &Profile,
    ) -> Result<(), BookingError> {
        if user_id.as_str().trim().is_empty() {
            return Err(BookingError::EmptyField { field: "ID" });
        }

        if state.user_exists(user_id) {
            return Err(BookingError::DuplicateAccount(user_id.clone()));
        }

        if password.trimmed_len() < policy.min_password_len {
            return Err(BookingError::PasswordTooShort {
                min: policy.min_password_len,
            });
        }

        for (field, value) in [
            ("Nama", &profile.name),
            ("Alamat", &profile.address),
            ("No. HP", &profile.phone),
        ] {
            if value.trim().is_empty() {
                return Err(BookingError::EmptyField { field });
            }
        }

        Ok(())
    }

    fn validate_known_user(state: &AppState, user_id: &UserId) -> Result<(), BookingError> {
        if state.user_exists(user_id) {
            Ok(())
        } else {
            Err(BookingError::UnknownAccount(user_id.clone()))
        }
    }

    fn validate_submit(
        state: &AppState,
        user_id: &UserId,
        request: &BookingRequest,
    ) -> Result<(), BookingError> {
        Self::validate_known_user(state, user_id)?;

        if request.purpose.trim().is_empty() {
            return Err(BookingError::EmptyField { field: "Keperluan" });
        }

        Ok(())
    }

    /// Looks up the booking at `index`, failing if it does not exist
    fn existing_booking<'a>(
        state: &'a AppState,
        user_id: &UserId,
        index: usize,
    ) -> Result<&'a Booking, BookingError> {
        Self::validate_known_user(state, user_id)?;

        let bookings = state.bookings(user_id);
        bookings.get(index).ok_or(BookingError::IndexOutOfRange {
            index,
            len: bookings.len(),
        })
    }

    fn fail(state: &mut AppState, error: BookingError) {
        tracing::debug!(%error, "Command rejected");
        Self::apply_event(state, &AppAction::ValidationFailed { error });
    }

    /// Applies an event to state
    fn apply_event(state: &mut AppState, action: &AppAction) {
        match action {
            AppAction::AccountRegistered {
                user_id,
                password,
                profile,
            } => {
                state.accounts.insert(user_id.clone(), password.clone());
                state.profiles.insert(user_id.clone(), profile.clone());
                state.bookings.insert(user_id.clone(), Vec::new());
                state.last_error = None;
            },
            AppAction::ProfileUpdated { user_id, profile } => {
                state.profiles.insert(user_id.clone(), profile.clone());
                state.last_error = None;
            },
            AppAction::BookingSubmitted { user_id, booking } => {
                state
                    .bookings
                    .entry(user_id.clone())
                    .or_default()
                    .push(booking.clone());
                state.last_error = None;
            },
            AppAction::BookingUpdated {
                user_id,
                index,
                booking,
            } => {
                if let Some(slot) = state
                    .bookings
                    .get_mut(user_id)
                    .and_then(|list| list.get_mut(*index))
                {
                    *slot = booking.clone();
                }
                state.last_error = None;
            },
            AppAction::BookingCancelled { user_id, index } => {
                if let Some(list) = state.bookings.get_mut(user_id) {
                    if *index < list.len() {
                        list.remove(*index);
                    }
                }
                state.last_error = None;
            },
            AppAction::ValidationFailed { error } => {
                state.last_error = Some(error.clone());
            },
            // Commands are not applied to state
            AppAction::RegisterAccount { .. }
            | AppAction::UpdateProfile { .. }
            | AppAction::SubmitBooking { .. }
            | AppAction::UpdateBooking { .. }
            | AppAction::CancelBooking { .. } => {},
        }
    }

    fn register(
        state: &mut AppState,
        env: &AppEnvironment,
        user_id: UserId,
        password: Password,
        profile: Profile,
    ) {
        if let Err(error) = Self::validate_register(state, env.policy, &user_id, &password, &profile)
        {
            Self::fail(state, error);
            return;
        }

        let profile = Profile::new(
            profile.name.trim(),
            profile.address.trim(),
            profile.phone.trim(),
        );
        Self::apply_event(
            state,
            &AppAction::AccountRegistered {
                user_id,
                password,
                profile,
            },
        );
    }

    fn update_profile(state: &mut AppState, user_id: UserId, changes: &ProfileUpdate) {
        let merged = match state.profile(&user_id) {
            Some(current) => current.merged(changes),
            None => {
                Self::fail(state, BookingError::UnknownAccount(user_id));
                return;
            },
        };

        Self::apply_event(
            state,
            &AppAction::ProfileUpdated {
                user_id,
                profile: merged,
            },
        );
    }

    fn submit(state: &mut AppState, env: &AppEnvironment, user_id: UserId, request: BookingRequest) {
        if let Err(error) = Self::validate_submit(state, &user_id, &request) {
            Self::fail(state, error);
            return;
        }

        let booking = Booking::from_request(request, env.clock.now());
        Self::apply_event(state, &AppAction::BookingSubmitted { user_id, booking });
    }

    fn update_booking(
        state: &mut AppState,
        env: &AppEnvironment,
        user_id: UserId,
        index: usize,
        changes: &BookingChanges,
    ) {
        let booking = match Self::existing_booking(state, &user_id, index) {
            Ok(current) => current.with_changes(changes, env.clock.now()),
            Err(error) => {
                Self::fail(state, error);
                return;
            },
        };

        Self::apply_event(
            state,
            &AppAction::BookingUpdated {
                user_id,
                index,
                booking,
            },
        );
    }

    fn cancel_booking(state: &mut AppState, user_id: UserId, index: usize) {
        if let Err(error) = Self::existing_booking(state, &user_id, index) {
            Self::fail(state, error);
            return;
        }

        Self::apply_event(state, &AppAction::BookingCancelled { user_id, index });
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            AppAction::RegisterAccount {
                user_id,
                password,
                profile,
            } => Self::register(state, env, user_id, password, profile),
            AppAction::UpdateProfile { user_id, changes } => {
                Self::update_profile(state, user_id, &changes);
            },
            AppAction::SubmitBooking { user_id, request } => {
                Self::submit(state, env, user_id, request);
            },
            AppAction::UpdateBooking {
                user_id,
                index,
                changes,
            } => Self::update_booking(state, env, user_id, index, &changes),
            AppAction::CancelBooking { user_id, index } => {
                Self::cancel_booking(state, user_id, index);
            },

            // ========== Events ==========
            AppAction::AccountRegistered { .. }
            | AppAction::ProfileUpdated { .. }
            | AppAction::BookingSubmitted { .. }
            | AppAction::BookingUpdated { .. }
            | AppAction::BookingCancelled { .. }
            | AppAction::ValidationFailed { .. } => {
                // Replayed events go straight to state
                Self::apply_event(state, &action);
            },
        }

        SmallVec::new()
    }
}
