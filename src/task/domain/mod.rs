//! Domain model for task lifecycle coordination.
//!
//! The domain covers task snapshots, archive records, reminder change-sets,
//! and the typed actions exchanged on the action bus. All infrastructure
//! concerns stay outside of the domain boundary.

mod action;
mod archive;
mod error;
mod ids;
mod reminder;
mod task;

pub use action::{
    ListPositionChanged, MoveToArchive, MoveToOtherProject, RestoreTask, TaskAction,
    TaskActionKind, TodayListSection, UpdateTask,
};
pub use archive::{ArchiveBatch, ArchivedTask};
pub use error::TaskDomainError;
pub use ids::{AttachmentId, ProjectId, ReminderId, TaskId};
pub use reminder::{Reminder, ReminderChanges};
pub use task::{Task, TaskChanges, TaskRef, TaskUpdate, TaskWithSubTasks};
