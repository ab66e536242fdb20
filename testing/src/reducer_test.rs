//! Given/When/Then runner for reducers.
//!
//! A test sets up state (optionally by replaying earlier actions), reduces one
//! action, then checks the resulting state and the effects that action
//! returned. Effects are inspected, never executed.

#![allow(clippy::module_name_repetitions)]

use sipk_core::{effect::Effect, reducer::Reducer};

type StateCheck<S> = Box<dyn FnOnce(&S)>;
type EffectCheck<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent reducer test.
///
/// ```ignore
/// ReducerTest::new(AppReducer::new())
///     .with_env(test_environment())
///     .given_state(AppState::new())
///     .given_actions([register("budi")])
///     .when_action(AppAction::SubmitBooking { .. })
///     .then_state(|state| assert_eq!(state.bookings(&budi).len(), 1))
///     .then_effects(assertions::assert_no_effects)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    history: Vec<A>,
    action: Option<A>,
    state_checks: Vec<StateCheck<S>>,
    effect_checks: Vec<EffectCheck<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Starts a test for `reducer`
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            history: Vec::new(),
            action: None,
            state_checks: Vec::new(),
            effect_checks: Vec::new(),
        }
    }

    /// Environment handed to every reduction
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Starting state
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Actions reduced before the one under test.
    ///
    /// Their effects are discarded; only the state they leave behind matters.
    #[must_use]
    pub fn given_actions(mut self, actions: impl IntoIterator<Item = A>) -> Self {
        self.history.extend(actions);
        self
    }

    /// The action under test
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Checks the state after the action under test
    #[must_use]
    pub fn then_state(mut self, check: impl FnOnce(&S) + 'static) -> Self {
        self.state_checks.push(Box::new(check));
        self
    }

    /// Checks the effects returned by the action under test
    #[must_use]
    pub fn then_effects(mut self, check: impl FnOnce(&[Effect<A>]) + 'static) -> Self {
        self.effect_checks.push(Box::new(check));
        self
    }

    /// Reduces everything and runs the checks in the order they were added.
    ///
    /// Returns the final state for any follow-up assertions.
    ///
    /// # Panics
    ///
    /// Panics if the state, environment or action was never set, or if a
    /// check fails.
    #[allow(clippy::panic)]
    #[allow(clippy::expect_used)]
    pub fn run(self) -> S {
        let mut state = self.initial_state.expect("call given_state() first");
        let env = self.environment.expect("call with_env() first");
        let action = self.action.expect("call when_action() first");

        for earlier in self.history {
            let _ = self.reducer.reduce(&mut state, earlier, &env);
        }

        let effects = self.reducer.reduce(&mut state, action, &env);

        for check in self.state_checks {
            check(&state);
        }
        for check in self.effect_checks {
            check(&effects);
        }

        state
    }
}

/// Effect checks for [`ReducerTest::then_effects`]
pub mod assertions {
    use sipk_core::effect::Effect;

    /// Collects every action an effect list would feed back, depth first
    #[must_use]
    pub fn sent_actions<A>(effects: &[Effect<A>]) -> Vec<&A> {
        fn walk<'a, A>(effect: &'a Effect<A>, out: &mut Vec<&'a A>) {
            match effect {
                Effect::None => {}
                Effect::Send(action) => out.push(&**action),
                Effect::Sequential(inner) => inner.iter().for_each(|e| walk(e, out)),
            }
        }

        let mut out = Vec::new();
        for effect in effects {
            walk(effect, &mut out);
        }
        out
    }

    /// The reduction did nothing observable beyond changing state
    ///
    /// # Panics
    ///
    /// Panics if any effect is not a no-op.
    #[allow(clippy::panic)]
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "expected no effects, got {effects:?}"
        );
    }

    /// Exactly `expected` top-level effects
    ///
    /// # Panics
    ///
    /// Panics on a count mismatch.
    #[allow(clippy::panic)]
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(effects.len(), expected, "unexpected effect count");
    }

    /// At least one action is fed back, possibly inside a sequence
    ///
    /// # Panics
    ///
    /// Panics if nothing is sent.
    #[allow(clippy::panic)]
    pub fn assert_has_send_effect<A>(effects: &[Effect<A>]) {
        assert!(
            !sent_actions(effects).is_empty(),
            "expected a Send effect, found none"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sipk_core::{smallvec, SmallVec};

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Seats {
        taken: Vec<u8>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum SeatAction {
        Take(u8),
        Release(u8),
        TakePair(u8),
    }

    struct SeatReducer;

    impl Reducer for SeatReducer {
        type State = Seats;
        type Action = SeatAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Seats,
            action: SeatAction,
            _env: &(),
        ) -> SmallVec<[Effect<SeatAction>; 4]> {
            match action {
                SeatAction::Take(seat) => {
                    if !state.taken.contains(&seat) {
                        state.taken.push(seat);
                    }
                    SmallVec::new()
                }
                SeatAction::Release(seat) => {
                    state.taken.retain(|s| *s != seat);
                    smallvec![Effect::None]
                }
                SeatAction::TakePair(seat) => smallvec![Effect::chain(vec![
                    Effect::send(SeatAction::Take(seat)),
                    Effect::send(SeatAction::Take(seat + 1)),
                ])],
            }
        }
    }

    #[test]
    fn history_builds_the_starting_point() {
        let state = ReducerTest::new(SeatReducer)
            .with_env(())
            .given_state(Seats::default())
            .given_actions([SeatAction::Take(1), SeatAction::Take(2)])
            .when_action(SeatAction::Release(1))
            .then_state(|s| assert_eq!(s.taken, vec![2]))
            .then_effects(assertions::assert_no_effects)
            .run();

        assert_eq!(state.taken.len(), 1);
    }

    #[test]
    fn duplicate_take_is_ignored() {
        ReducerTest::new(SeatReducer)
            .with_env(())
            .given_state(Seats { taken: vec![4] })
            .when_action(SeatAction::Take(4))
            .then_state(|s| assert_eq!(s.taken, vec![4]))
            .then_effects(|effects| assertions::assert_effects_count(effects, 0))
            .run();
    }

    #[test]
    fn sends_are_reported_not_executed() {
        ReducerTest::new(SeatReducer)
            .with_env(())
            .given_state(Seats::default())
            .when_action(SeatAction::TakePair(7))
            .then_state(|s| assert!(s.taken.is_empty()))
            .then_effects(assertions::assert_has_send_effect)
            .then_effects(|effects| {
                assert_eq!(
                    assertions::sent_actions(effects),
                    vec![&SeatAction::Take(7), &SeatAction::Take(8)]
                );
            })
            .run();
    }

    #[test]
    #[should_panic(expected = "call when_action() first")]
    fn missing_action_panics() {
        ReducerTest::new(SeatReducer)
            .with_env(())
            .given_state(Seats::default())
            .run();
    }
}
