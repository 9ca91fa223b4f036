//! State machine that applies events through a lifecycle table.

use super::history::{StateHistory, StateTransition};
use super::state::{Event, Lifecycle};
use chrono::Utc;
use serde::Serialize;

/// A running instance of a lifecycle.
///
/// The machine owns the current state and its history. [`fire`] is the
/// only way to change the state; a rejected event leaves both untouched.
///
/// [`fire`]: StateMachine::fire
#[derive(Clone, Debug, Serialize)]
#[serde(bound = "")]
pub struct StateMachine<S: Lifecycle<E>, E: Event> {
    current: S,
    history: StateHistory<S, E>,
}

impl<S: Lifecycle<E>, E: Event> StateMachine<S, E> {
    /// Create a machine in `initial`, recording `event` as its creation entry.
    pub fn new(initial: S, event: E) -> Self {
        let history = StateHistory::new().record(StateTransition::initial(initial.clone(), event));
        Self {
            current: initial,
            history,
        }
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Check if machine is in a final state (pure)
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    /// Get state history (pure)
    pub fn history(&self) -> &StateHistory<S, E> {
        &self.history
    }

    /// Apply `event` to the current state.
    ///
    /// On success the new state becomes current and exactly one entry is
    /// appended to the history.
    pub fn fire(&mut self, event: E) -> Result<&S, S::Rejection> {
        let next = self.current.on(&event)?;
        let from = std::mem::replace(&mut self.current, next.clone());
        self.history = self.history.record(StateTransition {
            from: Some(from),
            to: next,
            event,
            timestamp: Utc::now(),
        });
        Ok(&self.current)
    }
}
