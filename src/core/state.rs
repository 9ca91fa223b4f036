//! Core traits for lifecycle states and the events that move between them.
//!
//! States and events are plain values. The transition rules live on the
//! state type itself via [`Lifecycle`], so the table for a given lifecycle
//! is written once and shared by every machine that embeds it.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure - no side effects.
///
/// # Required Traits
///
/// - `Clone`: States are copied into history records
/// - `PartialEq`: States must be comparable for transition logic
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States appear in snapshots
///
/// # Example
///
/// ```rust
/// use cloudconnect::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Power {
///     Off,
///     On,
///     Scrapped,
/// }
///
/// impl State for Power {
///     fn name(&self) -> &str {
///         match self {
///             Self::Off => "Off",
///             Self::On => "On",
///             Self::Scrapped => "Scrapped",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Scrapped)
///     }
/// }
///
/// assert!(Power::Scrapped.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Final states accept no further transitions.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Trait for the events recorded against a state machine.
pub trait Event:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Lower-case event name as it appears in history and logs.
    fn name(&self) -> &str;
}

/// Transition table of a lifecycle, expressed on its state type.
///
/// `on` is the only place that decides where an event leads. It must be
/// pure: given the same state and event it returns the same outcome.
pub trait Lifecycle<E: Event>: State {
    /// Typed rejection returned for events that are illegal in a state.
    type Rejection: std::error::Error;

    /// Compute the next state for `event`, or reject it.
    fn on(&self, event: &E) -> Result<Self, Self::Rejection>;
}
