//! Archival coordinator: moves finished tasks into the archive and back.

use super::support::{
    ReminderFailure, settle_reminder_call, touch_last_active, warn_on_unresolved_sub_tasks,
};
use crate::config::{LifecycleConfig, ReminderFailurePolicy};
use crate::task::{
    domain::{ArchiveBatch, TaskAction, TaskActionKind, TaskId, TaskRef, TaskWithSubTasks},
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
use tracing::{debug, info};

/// Service-level errors for archive and restore operations.
#[derive(Debug, Error)]
pub enum ArchivalError {
    /// A reminder removal failed under the propagate policy.
    #[error(transparent)]
    Reminder(#[from] ReminderGatewayError),
    /// The persistence write failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceGatewayError),
}

/// Result type for archival operations.
pub type ArchivalResult<T> = Result<T, ArchivalError>;

/// Result of a completed archive operation.
#[derive(Debug, Clone)]
pub struct ArchiveOutcome {
    batch: ArchiveBatch,
    failed_reminders: Vec<ReminderFailure>,
}

impl ArchiveOutcome {
    /// Returns the batch that was written to the archive.
    #[must_use]
    pub const fn batch(&self) -> &ArchiveBatch {
        &self.batch
    }

    /// Returns reminder removals that failed while archiving continued.
    #[must_use]
    pub fn failed_reminders(&self) -> &[ReminderFailure] {
        &self.failed_reminders
    }
}

/// Coordinates archive and restore of tasks with their subtasks.
#[derive(Clone)]
pub struct ArchivalCoordinator<R, P, C>
where
    R: ReminderGateway,
    P: PersistenceGateway,
    C: Clock + Send + Sync,
{
    reminders: Arc<R>,
    persistence: Arc<P>,
    clock: Arc<C>,
    reminder_failure_policy: ReminderFailurePolicy,
}

impl<R, P, C> ArchivalCoordinator<R, P, C>
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
        }
    }

    /// Archives tasks together with their resolved subtasks.
    ///
    /// Every record is forced done and loses its reminder reference; each
    /// distinct reminder held by any listed snapshot is removed once before
    /// the single archive write. A task listed more than once is archived
    /// from its first snapshot. The last-active timestamp is updated
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ArchivalError::Persistence`] when a persistence write
    /// fails, and [`ArchivalError::Reminder`] when a reminder removal fails
    /// under [`ReminderFailurePolicy::Propagate`]. Nothing is rolled back.
    pub async fn archive(&self, tasks: &[TaskWithSubTasks]) -> ArchivalResult<ArchiveOutcome> {
        let mut batch = ArchiveBatch::new();
        let mut removed = HashSet::new();
        let mut failed_reminders = Vec::new();

        for parent in tasks {
            warn_on_unresolved_sub_tasks(parent);
            for task in parent.iter_tasks() {
                if !batch.insert(task) {
                    debug!(task_id = %task.id(), "task listed twice, archiving once");
                }
                // Duplicates still release their reminder.
                let Some(reminder_id) = task.reminder_id() else {
                    continue;
                };
                if !removed.insert(reminder_id) {
                    continue;
                }
                let result = self.reminders.remove_reminder(reminder_id).await;
                settle_reminder_call(
                    self.reminder_failure_policy,
                    &mut failed_reminders,
                    task.id(),
                    reminder_id,
                    result,
                )?;
            }
        }

        self.persistence.add_tasks_to_archive(&batch).await?;
        touch_last_active(&*self.persistence, &*self.clock).await?;
        info!(
            archived = batch.len(),
            failed_reminders = failed_reminders.len(),
            "tasks moved to archive"
        );

        Ok(ArchiveOutcome {
            batch,
            failed_reminders,
        })
    }

    /// Removes a task and all of its subtasks from the archive.
    ///
    /// Reminders are not recreated. Returns the ids passed to persistence.
    ///
    /// # Errors
    ///
    /// Returns [`ArchivalError::Persistence`] when the removal fails.
    pub async fn restore(&self, task: &TaskRef) -> ArchivalResult<Vec<TaskId>> {
        let task_ids = task.archive_ids();
        self.persistence.remove_tasks_from_archive(&task_ids).await?;
        info!(task_id = %task.id(), restored = task_ids.len(), "task restored from archive");
        Ok(task_ids)
    }
}

const HANDLED_KINDS: &[TaskActionKind] = &[TaskActionKind::MoveToArchive, TaskActionKind::RestoreTask];

#[async_trait]
impl<R, P, C> TaskActionHandler for ArchivalCoordinator<R, P, C>
where
    R: ReminderGateway,
    P: PersistenceGateway,
    C: Clock + Send + Sync,
{
    fn name(&self) -> &'static str {
        "archival"
    }

    fn handles(&self) -> &'static [TaskActionKind] {
        HANDLED_KINDS
    }

    async fn handle(&self, action: &TaskAction) -> TaskActionHandlerResult<Vec<TaskAction>> {
        match action {
            TaskAction::MoveToArchive(payload) => {
                self.archive(&payload.tasks)
                    .await
                    .map_err(|err| TaskActionHandlerError::failed(self.name(), err))?;
            }
            TaskAction::RestoreTask(payload) => {
                self.restore(&payload.task)
                    .await
                    .map_err(|err| TaskActionHandlerError::failed(self.name(), err))?;
            }
            other => {
                return Err(TaskActionHandlerError::unsupported(
                    self.name(),
                    other.kind(),
                ));
            }
        }
        Ok(Vec::new())
    }
}
