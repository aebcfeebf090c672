//! Reminder values exchanged with the reminder subsystem.

use super::{ProjectId, ReminderId, TaskId};
use serde::{Deserialize, Serialize};

/// Reminder attached to a task.
///
/// Owned by the reminder subsystem; tasks reference it by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    id: ReminderId,
    related_task_id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_id: Option<ProjectId>,
}

impl Reminder {
    /// Creates a reminder for `related_task_id`.
    #[must_use]
    pub const fn new(
        id: ReminderId,
        related_task_id: TaskId,
        project_id: Option<ProjectId>,
    ) -> Self {
        Self {
            id,
            related_task_id,
            project_id,
        }
    }

    /// Returns the reminder identifier.
    #[must_use]
    pub const fn id(&self) -> &ReminderId {
        &self.id
    }

    /// Returns the task the reminder fires for.
    #[must_use]
    pub const fn related_task_id(&self) -> &TaskId {
        &self.related_task_id
    }

    /// Returns the associated project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Applies a partial change-set.
    pub fn apply(&mut self, changes: &ReminderChanges) {
        if let Some(project_id) = &changes.project_id {
            self.project_id = Some(project_id.clone());
        }
    }
}

/// Partial update for a reminder. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderChanges {
    /// New project association.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}

impl ReminderChanges {
    /// Change-set that moves the reminder to `project_id`.
    #[must_use]
    pub const fn project(project_id: ProjectId) -> Self {
        Self {
            project_id: Some(project_id),
        }
    }
}
