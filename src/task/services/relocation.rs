//! Relocation coordinator: moves tasks and their reminders between projects.

use super::support::{
    ReminderFailure, settle_reminder_call, touch_last_active, warn_on_unresolved_sub_tasks,
};
use crate::config::{LifecycleConfig, ReminderFailurePolicy};
use crate::task::{
    domain::{
        ProjectId, ReminderChanges, ReminderId, TaskAction, TaskActionKind, TaskWithSubTasks,
    },
    ports::{
        PersistenceGateway, PersistenceGatewayError, ReminderGateway, ReminderGatewayError,
        TaskActionHandler, TaskActionHandlerError, TaskActionHandlerResult,
    },
};
use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for relocation.
#[derive(Debug, Error)]
pub enum RelocationError {
    /// A reminder update failed under the propagate policy.
    #[error(transparent)]
    Reminder(#[from] ReminderGatewayError),
    /// The persistence write failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceGatewayError),
}

/// Result type for relocation operations.
pub type RelocationResult<T> = Result<T, RelocationError>;

/// Result of a completed relocation.
#[derive(Debug, Clone)]
pub struct RelocationOutcome {
    project_id: ProjectId,
    updated_reminders: Vec<ReminderId>,
    failed_reminders: Vec<ReminderFailure>,
}

impl RelocationOutcome {
    /// Returns the destination project.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns reminders whose project association was updated.
    #[must_use]
    pub fn updated_reminders(&self) -> &[ReminderId] {
        &self.updated_reminders
    }

    /// Returns reminder updates that failed while relocation continued.
    #[must_use]
    pub fn failed_reminders(&self) -> &[ReminderFailure] {
        &self.failed_reminders
    }
}

/// Coordinates moving tasks, their subtasks, and their reminders to
/// another project.
#[derive(Clone)]
pub struct RelocationCoordinator<R, P, C>
where
    R: ReminderGateway,
    P: PersistenceGateway,
    C: Clock + Send + Sync,
{
    reminders: Arc<R>,
    persistence: Arc<P>,
    clock: Arc<C>,
    reminder_failure_policy: ReminderFailurePolicy,
    touch_last_active: bool,
}

impl<R, P, C> RelocationCoordinator<R, P, C>
where
    R: ReminderGateway,
    P: PersistenceGateway,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator with the default configuration.
    #[must_use]
    pub fn new(reminders: Arc<R>, persistence: Arc<P>, clock: Arc<C>) -> Self {
        Self::with_config(reminders, persistence, clock, &LifecycleConfig::default())
    }

    /// Creates a coordinator with an explicit configuration.
    #[must_use]
    pub const fn with_config(
        reminders: Arc<R>,
        persistence: Arc<P>,
        clock: Arc<C>,
        config: &LifecycleConfig,
    ) -> Self {
        Self {
            reminders,
            persistence,
            clock,
            reminder_failure_policy: config.reminder_failure_policy,
            touch_last_active: config.touch_last_active_on_relocate,
        }
    }

    /// Moves tasks and their subtasks to `project_id`.
    ///
    /// Every reminder held by a task or subtask is re-associated with the
    /// destination before the single project reassignment write. Tasks
    /// without a reminder are still reassigned.
    ///
    /// # Errors
    ///
    /// Returns [`RelocationError::Persistence`] when a persistence write
    /// fails, and [`RelocationError::Reminder`] when a reminder update fails
    /// under [`ReminderFailurePolicy::Propagate`]. Nothing is rolled back.
    pub async fn relocate(
        &self,
        tasks: &[TaskWithSubTasks],
        project_id: &ProjectId,
    ) -> RelocationResult<RelocationOutcome> {
        let changes = ReminderChanges::project(project_id.clone());
        let mut seen = HashSet::new();
        let mut updated_reminders = Vec::new();
        let mut failed_reminders = Vec::new();

        for parent in tasks {
            warn_on_unresolved_sub_tasks(parent);
            for task in parent.iter_tasks() {
                let Some(reminder_id) = task.reminder_id() else {
                    continue;
                };
                if !seen.insert(reminder_id) {
                    continue;
                }
                let result = self.reminders.update_reminder(reminder_id, &changes).await;
                let succeeded = result.is_ok();
                settle_reminder_call(
                    self.reminder_failure_policy,
                    &mut failed_reminders,
                    task.id(),
                    reminder_id,
                    result,
                )?;
                if succeeded {
                    updated_reminders.push(reminder_id.clone());
                }
            }
        }

        self.persistence
            .save_tasks_to_project(project_id, tasks)
            .await?;
        if self.touch_last_active {
            touch_last_active(&*self.persistence, &*self.clock).await?;
        }
        info!(
            project_id = %project_id,
            tasks = tasks.len(),
            reminders = updated_reminders.len(),
            failed_reminders = failed_reminders.len(),
            "tasks moved to project"
        );

        Ok(RelocationOutcome {
            project_id: project_id.clone(),
            updated_reminders,
            failed_reminders,
        })
    }
}

const HANDLED_KINDS: &[TaskActionKind] = &[TaskActionKind::MoveToOtherProject];

#[async_trait]
impl<R, P, C> TaskActionHandler for RelocationCoordinator<R, P, C>
where
    R: ReminderGateway,
    P: PersistenceGateway,
    C: Clock + Send + Sync,
{
    fn name(&self) -> &'static str {
        "relocation"
    }

    fn handles(&self) -> &'static [TaskActionKind] {
        HANDLED_KINDS
    }

    async fn handle(&self, action: &TaskAction) -> TaskActionHandlerResult<Vec<TaskAction>> {
        let TaskAction::MoveToOtherProject(payload) = action else {
            return Err(TaskActionHandlerError::unsupported(
                self.name(),
                action.kind(),
            ));
        };
        self.relocate(&payload.tasks, &payload.project_id)
            .await
            .map_err(|err| TaskActionHandlerError::failed(self.name(), err))?;
        Ok(Vec::new())
    }
}
