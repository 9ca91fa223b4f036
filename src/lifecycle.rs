//! The resource lifecycle: states, events and the transition table.
//!
//! ```text
//!            start            stop
//!  Created ────────► Started ──────► Stopped
//!     │                 ▲              │
//!     │ delete          └──── start ───┤
//!     ▼                                │ delete
//!  Deleted ◄───────────────────────────┘
//! ```
//!
//! `Deleted` is terminal. A running resource has to be stopped before it
//! can be deleted, and re-applying the event that produced the current
//! state is rejected rather than ignored.

use crate::core::{Event, Lifecycle, State};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

crate::state_enum! {
    /// Lifecycle state of a simulated resource.
    #[derive(Copy, Eq, Hash)]
    pub enum ResourceState {
        Created,
        Started,
        Stopped,
        Deleted,
    }
    terminal: [Deleted]
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Events recorded against a resource.
///
/// `Create` only ever appears as the first history entry; the operator
/// drives a resource with `Start`, `Stop` and `Delete`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleEvent {
    Create,
    Start,
    Stop,
    Delete,
}

impl Event for LifecycleEvent {
    fn name(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An event that is illegal for the resource's current state.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot stop: resource has not been started")]
    NotStarted,

    #[error("cannot start: resource is already running")]
    AlreadyRunning,

    #[error("cannot delete: resource must be stopped first")]
    MustStopFirst,

    #[error("cannot stop: resource is already stopped")]
    AlreadyStopped,

    #[error("cannot {event}: resource is deleted")]
    TerminalState { event: LifecycleEvent },

    #[error("cannot create: resource already exists in state {state}")]
    AlreadyCreated { state: ResourceState },
}

impl Lifecycle<LifecycleEvent> for ResourceState {
    type Rejection = TransitionError;

    fn on(&self, event: &LifecycleEvent) -> Result<Self, TransitionError> {
        use LifecycleEvent::*;
        use ResourceState::*;

        match (self, event) {
            (Deleted, event) => Err(TransitionError::TerminalState { event: *event }),
            (state, Create) => Err(TransitionError::AlreadyCreated { state: *state }),

            (Created, Start) => Ok(Started),
            (Created, Stop) => Err(TransitionError::NotStarted),
            (Created, Delete) => Ok(Deleted),

            (Started, Start) => Err(TransitionError::AlreadyRunning),
            (Started, Stop) => Ok(Stopped),
            (Started, Delete) => Err(TransitionError::MustStopFirst),

            (Stopped, Start) => Ok(Started),
            (Stopped, Stop) => Err(TransitionError::AlreadyStopped),
            (Stopped, Delete) => Ok(Deleted),
        }
    }
}
