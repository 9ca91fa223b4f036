//! State transition history tracking.
//!
//! History is an append-only log: recording returns a new history with the
//! transition added and never rewrites earlier entries.

use super::state::{Event, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single state transition.
///
/// `from` is `None` only for the entry that brought the machine into
/// existence.
///
/// # Example
///
/// ```rust
/// use cloudconnect::core::StateTransition;
/// use cloudconnect::{LifecycleEvent, ResourceState};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Some(ResourceState::Created),
///     to: ResourceState::Started,
///     event: LifecycleEvent::Start,
///     timestamp: Utc::now(),
/// };
/// assert!(!transition.is_initial());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State, E: Event> {
    /// The state being transitioned from
    pub from: Option<S>,
    /// The state being transitioned to
    pub to: S,
    /// The event that caused the transition
    pub event: E,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl<S: State, E: Event> StateTransition<S, E> {
    /// Entry recording the birth of a machine in `to`.
    pub fn initial(to: S, event: E) -> Self {
        Self {
            from: None,
            to,
            event,
            timestamp: Utc::now(),
        }
    }

    /// Whether this entry is the creation record.
    pub fn is_initial(&self) -> bool {
        self.from.is_none()
    }
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use cloudconnect::core::{StateHistory, StateTransition};
/// use cloudconnect::{LifecycleEvent, ResourceState};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition::initial(ResourceState::Created, LifecycleEvent::Create))
///     .record(StateTransition {
///         from: Some(ResourceState::Created),
///         to: ResourceState::Started,
///         event: LifecycleEvent::Start,
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&ResourceState::Created, &ResourceState::Started]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State, E: Event> {
    transitions: Vec<StateTransition<S, E>>,
}

impl<S: State, E: Event> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> StateHistory<S, E> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition<S, E>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// The path starts with the origin of the first entry (or its target
    /// when the first entry is a creation record), followed by the `to`
    /// state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(from) = self.transitions.first().and_then(|t| t.from.as_ref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S, E>> {
        self.transitions.last()
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Get all transitions in the order they happened.
    pub fn transitions(&self) -> &[StateTransition<S, E>] {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{LifecycleEvent, ResourceState};

    fn step(
        from: ResourceState,
        to: ResourceState,
        event: LifecycleEvent,
    ) -> StateTransition<ResourceState, LifecycleEvent> {
        StateTransition {
            from: Some(from),
            to,
            event,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<ResourceState, LifecycleEvent> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(StateTransition::initial(
            ResourceState::Created,
            LifecycleEvent::Create,
        ));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn get_path_starts_at_creation_target() {
        let history = StateHistory::new()
            .record(StateTransition::initial(
                ResourceState::Created,
                LifecycleEvent::Create,
            ))
            .record(step(
                ResourceState::Created,
                ResourceState::Started,
                LifecycleEvent::Start,
            ))
            .record(step(
                ResourceState::Started,
                ResourceState::Stopped,
                LifecycleEvent::Stop,
            ));

        let path = history.get_path();
        assert_eq!(
            path,
            vec![
                &ResourceState::Created,
                &ResourceState::Started,
                &ResourceState::Stopped
            ]
        );
    }

    #[test]
    fn get_path_includes_origin_without_creation_record() {
        let history = StateHistory::new().record(step(
            ResourceState::Stopped,
            ResourceState::Started,
            LifecycleEvent::Start,
        ));

        assert_eq!(
            history.get_path(),
            vec![&ResourceState::Stopped, &ResourceState::Started]
        );
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(StateTransition::initial(
            ResourceState::Created,
            LifecycleEvent::Create,
        ));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<ResourceState, LifecycleEvent> =
            serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert!(deserialized.transitions()[0].is_initial());
        assert_eq!(deserialized.transitions()[0].event, LifecycleEvent::Create);
    }
}
