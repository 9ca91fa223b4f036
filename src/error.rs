//! Errors returned by the lifecycle engine.
//!
//! Every registry operation yields either its value or exactly one of
//! these. Rendering them for an operator is the caller's job; the messages
//! here only carry the structured identity and the offending name or field.

use crate::lifecycle::TransitionError;
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown resource type '{0}'")]
    UnknownResourceType(String),

    #[error("resource name cannot be empty")]
    InvalidName,

    #[error("resource '{0}' already exists")]
    DuplicateName(String),

    #[error("resource '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("deletion of '{0}' was not confirmed")]
    DeletionNotConfirmed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
