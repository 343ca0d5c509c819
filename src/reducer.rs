//! Reducer composition.
//!
//! The top-level transition is `with_history(combine([image, general]))`: the
//! image reducer runs first, then the general one, and the history wrapper sees
//! the state as it was before either of them.

use crate::action::Action;
use crate::handlers;
use crate::history::with_history;
use crate::ids::{Clock, IdGenerator};
use crate::state::AnnotationState;

/// Capabilities a reducer may use besides the state itself.
pub struct Env<'a> {
    pub ids: &'a mut dyn IdGenerator,
    pub clock: &'a dyn Clock,
    /// Maximum number of history entries kept.
    pub history_limit: usize,
}

impl<'a> Env<'a> {
    pub fn new(ids: &'a mut dyn IdGenerator, clock: &'a dyn Clock, history_limit: usize) -> Self {
        Self {
            ids,
            clock,
            history_limit,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn next_id(&mut self) -> String {
        self.ids.generate()
    }
}

/// A pure transition function.
pub type Reducer = fn(AnnotationState, &Action, &mut Env<'_>) -> AnnotationState;

/// Reducers applied in order on every dispatch.
const REDUCERS: [Reducer; 2] = [handlers::image::reduce, handlers::reduce];

/// Run every reducer in order, feeding each the previous one's output.
pub fn combine(
    reducers: &[Reducer],
    state: AnnotationState,
    action: &Action,
    env: &mut Env<'_>,
) -> AnnotationState {
    reducers
        .iter()
        .fold(state, |state, reducer| reducer(state, action, env))
}

fn combined(state: AnnotationState, action: &Action, env: &mut Env<'_>) -> AnnotationState {
    combine(&REDUCERS, state, action, env)
}

/// Apply one action and return the next state.
///
/// Never fails: actions that do not apply leave the state unchanged.
pub fn dispatch(state: &AnnotationState, action: &Action, env: &mut Env<'_>) -> AnnotationState {
    log::trace!("Dispatch {}", action.type_name());
    with_history(state, action, env, combined)
}
