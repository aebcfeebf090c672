//! Task records and the transient views built over them.

use super::{AttachmentId, ProjectId, ReminderId, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Key under which the owning store nests resolved subtasks.
const SUB_TASKS_KEY: &str = "subTasks";

/// Point-in-time snapshot of a task as supplied by the owning store.
///
/// The lifecycle coordinators never mutate live store state; they read these
/// snapshots from action payloads and derive gateway writes from them.
/// Fields the store sends that are not modelled here are kept verbatim and
/// written back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_id: Option<ProjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<TaskId>,
    #[serde(default)]
    is_done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reminder_id: Option<ReminderId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attachment_ids: Vec<AttachmentId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sub_task_ids: Vec<TaskId>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Task {
    /// Creates an open task with no reminder, attachments, or subtasks.
    #[must_use]
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            title: String::new(),
            project_id: None,
            parent_id: None,
            is_done: false,
            reminder_id: None,
            attachment_ids: Vec::new(),
            sub_task_ids: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Sets the task title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the owning project.
    #[must_use]
    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Marks the task as a subtask of `parent_id`.
    #[must_use]
    pub fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }

    /// Attaches a reminder reference.
    #[must_use]
    pub fn with_reminder(mut self, reminder_id: ReminderId) -> Self {
        self.reminder_id = Some(reminder_id);
        self
    }

    /// Sets the attachment references.
    #[must_use]
    pub fn with_attachment_ids(mut self, ids: impl IntoIterator<Item = AttachmentId>) -> Self {
        self.attachment_ids = ids.into_iter().collect();
        self
    }

    /// Sets the ordered subtask references.
    #[must_use]
    pub fn with_sub_task_ids(mut self, ids: impl IntoIterator<Item = TaskId>) -> Self {
        self.sub_task_ids = ids.into_iter().collect();
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the owning project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Returns the parent task when this is a subtask.
    #[must_use]
    pub const fn parent_id(&self) -> Option<&TaskId> {
        self.parent_id.as_ref()
    }

    /// Returns whether the task is complete.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.is_done
    }

    /// Returns the reminder reference, if any.
    #[must_use]
    pub const fn reminder_id(&self) -> Option<&ReminderId> {
        self.reminder_id.as_ref()
    }

    /// Returns the attachment references in order.
    #[must_use]
    pub fn attachment_ids(&self) -> &[AttachmentId] {
        &self.attachment_ids
    }

    /// Returns the subtask references in order.
    #[must_use]
    pub fn sub_task_ids(&self) -> &[TaskId] {
        &self.sub_task_ids
    }

    /// Returns fields carried through from the store without being modelled.
    #[must_use]
    pub const fn extra_fields(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Returns the archived form of this task.
    ///
    /// The reminder reference and any nested subtasks are dropped and the
    /// task is forced done. Every other field is copied.
    #[must_use]
    pub fn to_archived(&self) -> Self {
        let mut archived = Self {
            is_done: true,
            reminder_id: None,
            ..self.clone()
        };
        archived.extra.remove(SUB_TASKS_KEY);
        archived
    }
}

/// A task with its subtasks eagerly resolved.
///
/// Used only as a transient view for archival and relocation; it is never
/// persisted in this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithSubTasks {
    #[serde(flatten)]
    task: Task,
    #[serde(default)]
    sub_tasks: Vec<Task>,
}

impl TaskWithSubTasks {
    /// Creates a view with no resolved subtasks.
    #[must_use]
    pub const fn new(task: Task) -> Self {
        Self {
            task,
            sub_tasks: Vec::new(),
        }
    }

    /// Sets the resolved subtasks.
    #[must_use]
    pub fn with_sub_tasks(mut self, sub_tasks: impl IntoIterator<Item = Task>) -> Self {
        self.sub_tasks = sub_tasks.into_iter().collect();
        self
    }

    /// Returns the parent task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the resolved subtasks in order.
    #[must_use]
    pub fn sub_tasks(&self) -> &[Task] {
        &self.sub_tasks
    }

    /// Iterates over the parent followed by each subtask.
    pub fn iter_tasks(&self) -> impl Iterator<Item = &Task> {
        std::iter::once(&self.task).chain(self.sub_tasks.iter())
    }

    /// Returns subtask ids referenced by the parent but absent from the view.
    #[must_use]
    pub fn missing_sub_tasks(&self) -> Vec<&TaskId> {
        let resolved: HashSet<&TaskId> = self.sub_tasks.iter().map(Task::id).collect();
        self.task
            .sub_task_ids()
            .iter()
            .filter(|id| !resolved.contains(id))
            .collect()
    }

}

impl From<Task> for TaskWithSubTasks {
    fn from(task: Task) -> Self {
        Self::new(task)
    }
}

/// Minimal task reference carried by restore actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRef {
    id: TaskId,
    #[serde(default)]
    sub_task_ids: Vec<TaskId>,
}

impl TaskRef {
    /// Creates a reference from a task id and its subtask ids.
    #[must_use]
    pub fn new(id: TaskId, sub_task_ids: impl IntoIterator<Item = TaskId>) -> Self {
        Self {
            id,
            sub_task_ids: sub_task_ids.into_iter().collect(),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the subtask identifiers.
    #[must_use]
    pub fn sub_task_ids(&self) -> &[TaskId] {
        &self.sub_task_ids
    }

    /// Returns the task id followed by its subtask ids, without duplicates.
    #[must_use]
    pub fn archive_ids(&self) -> Vec<TaskId> {
        let mut seen = HashSet::with_capacity(self.sub_task_ids.len() + 1);
        std::iter::once(&self.id)
            .chain(self.sub_task_ids.iter())
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect()
    }
}

impl From<&Task> for TaskRef {
    fn from(task: &Task) -> Self {
        Self::new(task.id().clone(), task.sub_task_ids().iter().cloned())
    }
}

/// Partial change-set applied to a task by the owning store.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskChanges {
    /// New completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
}

impl TaskChanges {
    /// Change-set that only sets the completion flag.
    #[must_use]
    pub const fn done(is_done: bool) -> Self {
        Self {
            is_done: Some(is_done),
        }
    }
}

/// Targeted partial update for a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    /// Task to update.
    pub id: TaskId,
    /// Fields to change.
    pub changes: TaskChanges,
}

impl TaskUpdate {
    /// Creates an update for `id`.
    #[must_use]
    pub const fn new(id: TaskId, changes: TaskChanges) -> Self {
        Self { id, changes }
    }
}
