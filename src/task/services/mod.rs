//! Application services for task lifecycle coordination.

mod archival;
mod completion_sync;
mod dispatcher;
mod related_data;
mod relocation;
mod support;

pub use archival::{ArchivalCoordinator, ArchivalError, ArchivalResult, ArchiveOutcome};
pub use completion_sync::CompletionSyncTranslator;
pub use dispatcher::{ActionDispatcher, DispatchError, DispatchResult, MAX_CASCADE};
pub use related_data::{RelatedDataError, RelatedDataService};
pub use relocation::{
    RelocationCoordinator, RelocationError, RelocationOutcome, RelocationResult,
};
pub use support::ReminderFailure;
