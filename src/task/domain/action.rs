//! Lifecycle actions carried on the action bus.

use super::{ProjectId, TaskDomainError, TaskId, TaskRef, TaskUpdate, TaskWithSubTasks};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Section label of the "today" ordering list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TodayListSection {
    /// Completed tasks section.
    Done,
    /// Open tasks section.
    Undone,
    /// Any other list label.
    Other(String),
}

impl TodayListSection {
    /// Returns the wire label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Done => "DONE",
            Self::Undone => "UNDONE",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for TodayListSection {
    fn from(value: &str) -> Self {
        match value {
            "DONE" => Self::Done,
            "UNDONE" => Self::Undone,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for TodayListSection {
    fn from(value: String) -> Self {
        match value.as_str() {
            "DONE" => Self::Done,
            "UNDONE" => Self::Undone,
            _ => Self::Other(value),
        }
    }
}

impl From<TodayListSection> for String {
    fn from(value: TodayListSection) -> Self {
        match value {
            TodayListSection::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for TodayListSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload: archive tasks together with their subtasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveToArchive {
    /// Tasks to archive, each resolved with its subtasks.
    pub tasks: Vec<TaskWithSubTasks>,
}

/// Payload: move tasks together with their subtasks to another project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToOtherProject {
    /// Tasks to move, each resolved with its subtasks.
    pub tasks: Vec<TaskWithSubTasks>,
    /// Destination project.
    pub project_id: ProjectId,
}

/// Payload: restore a task and its subtasks from the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreTask {
    /// Task to restore.
    pub task: TaskRef,
}

/// Payload: a task was dragged between sections of the today list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPositionChanged {
    /// Task that moved.
    pub task_id: TaskId,
    /// Section the task left.
    pub src: TodayListSection,
    /// Section the task entered.
    pub target: TodayListSection,
}

/// Payload: canonical partial task update for the owning store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTask {
    /// Update to apply.
    pub task: TaskUpdate,
}

/// Typed lifecycle action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum TaskAction {
    /// Archive tasks.
    MoveToArchive(MoveToArchive),
    /// Move tasks between projects.
    MoveToOtherProject(MoveToOtherProject),
    /// Restore an archived task.
    RestoreTask(RestoreTask),
    /// Today list reordering.
    ListPositionChanged(ListPositionChanged),
    /// Partial task update.
    UpdateTask(UpdateTask),
}

impl TaskAction {
    /// Returns the action's kind tag.
    #[must_use]
    pub const fn kind(&self) -> TaskActionKind {
        match self {
            Self::MoveToArchive(_) => TaskActionKind::MoveToArchive,
            Self::MoveToOtherProject(_) => TaskActionKind::MoveToOtherProject,
            Self::RestoreTask(_) => TaskActionKind::RestoreTask,
            Self::ListPositionChanged(_) => TaskActionKind::ListPositionChanged,
            Self::UpdateTask(_) => TaskActionKind::UpdateTask,
        }
    }
}

impl From<MoveToArchive> for TaskAction {
    fn from(payload: MoveToArchive) -> Self {
        Self::MoveToArchive(payload)
    }
}

impl From<MoveToOtherProject> for TaskAction {
    fn from(payload: MoveToOtherProject) -> Self {
        Self::MoveToOtherProject(payload)
    }
}

impl From<RestoreTask> for TaskAction {
    fn from(payload: RestoreTask) -> Self {
        Self::RestoreTask(payload)
    }
}

impl From<ListPositionChanged> for TaskAction {
    fn from(payload: ListPositionChanged) -> Self {
        Self::ListPositionChanged(payload)
    }
}

impl From<UpdateTask> for TaskAction {
    fn from(payload: UpdateTask) -> Self {
        Self::UpdateTask(payload)
    }
}

/// Kind tag used to route actions to handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskActionKind {
    /// See [`MoveToArchive`].
    MoveToArchive,
    /// See [`MoveToOtherProject`].
    MoveToOtherProject,
    /// See [`RestoreTask`].
    RestoreTask,
    /// See [`ListPositionChanged`].
    ListPositionChanged,
    /// See [`UpdateTask`].
    UpdateTask,
}

impl TaskActionKind {
    /// Returns the canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MoveToArchive => "MoveToArchive",
            Self::MoveToOtherProject => "MoveToOtherProject",
            Self::RestoreTask => "RestoreTask",
            Self::ListPositionChanged => "ListPositionChanged",
            Self::UpdateTask => "UpdateTask",
        }
    }
}

impl TryFrom<&str> for TaskActionKind {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "MoveToArchive" => Ok(Self::MoveToArchive),
            "MoveToOtherProject" => Ok(Self::MoveToOtherProject),
            "RestoreTask" => Ok(Self::RestoreTask),
            "ListPositionChanged" => Ok(Self::ListPositionChanged),
            "UpdateTask" => Ok(Self::UpdateTask),
            _ => Err(TaskDomainError::UnknownActionKind(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
