//! Identifier types for the task domain.
//!
//! Every identifier is an opaque, non-empty string. The surrounding store
//! owns identifier generation; this crate only validates and carries them.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trims `raw` and rejects empty values.
fn normalize(kind: &'static str, raw: String) -> Result<String, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyIdentifier(kind));
    }
    if trimmed.len() == raw.len() {
        return Ok(raw);
    }
    Ok(trimmed.to_owned())
}

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a validated ", $kind, " identifier.")]
            ///
            /// # Errors
            ///
            /// Returns [`TaskDomainError::EmptyIdentifier`] when the value is
            /// empty after trimming.
            pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
                normalize($kind, value.into()).map(Self)
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = TaskDomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TaskDomainError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_identifier!(
    /// Unique identifier of a task or subtask.
    TaskId,
    "task"
);

string_identifier!(
    /// Identifier of a reminder owned by the reminder subsystem.
    ///
    /// Tasks hold this as a weak back-reference only.
    ReminderId,
    "reminder"
);

string_identifier!(
    /// Identifier of the project a task belongs to.
    ProjectId,
    "project"
);

string_identifier!(
    /// Identifier of an externally owned attachment.
    AttachmentId,
    "attachment"
);
