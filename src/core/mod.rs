//! Core state machine types and logic.
//!
//! This module contains the pure core shared by every lifecycle:
//! - State and event definitions via the `State` and `Event` traits
//! - Transition tables via the `Lifecycle` trait
//! - Append-only history tracking
//! - The `state_enum!` declaration macro

mod history;
mod machine;
pub mod macros;
mod state;

pub use history::{StateHistory, StateTransition};
pub use machine::StateMachine;
pub use state::{Event, Lifecycle, State};
