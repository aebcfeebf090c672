//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// An identifier was empty after trimming. Carries the identifier kind.
    #[error("{0} identifier must not be empty")]
    EmptyIdentifier(&'static str),

    /// An action kind string did not name a known lifecycle action.
    #[error("unknown task action kind: {0}")]
    UnknownActionKind(String),
}
