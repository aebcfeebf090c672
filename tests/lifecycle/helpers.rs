//! Shared helpers for lifecycle integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklife::{
    config::LifecycleConfig,
    task::{
        adapters::memory::{InMemoryPersistenceGateway, InMemoryReminderGateway},
        domain::{ProjectId, Reminder, ReminderId, Task, TaskId, TaskWithSubTasks},
        services::{ActionDispatcher, ArchivalCoordinator, RelocationCoordinator},
    },
};

/// Archival coordinator over the in-memory gateways.
pub type MemoryArchival =
    ArchivalCoordinator<InMemoryReminderGateway, InMemoryPersistenceGateway, DefaultClock>;

/// Relocation coordinator over the in-memory gateways.
pub type MemoryRelocation =
    RelocationCoordinator<InMemoryReminderGateway, InMemoryPersistenceGateway, DefaultClock>;

/// Gateways shared between the coordinators of one test.
pub struct Stack {
    pub reminders: Arc<InMemoryReminderGateway>,
    pub persistence: Arc<InMemoryPersistenceGateway>,
    pub clock: Arc<DefaultClock>,
}

impl Stack {
    /// Builds an archival coordinator over this stack.
    #[must_use]
    pub fn archival(&self) -> MemoryArchival {
        ArchivalCoordinator::new(
            Arc::clone(&self.reminders),
            Arc::clone(&self.persistence),
            Arc::clone(&self.clock),
        )
    }

    /// Builds a relocation coordinator over this stack.
    #[must_use]
    pub fn relocation(&self) -> MemoryRelocation {
        RelocationCoordinator::new(
            Arc::clone(&self.reminders),
            Arc::clone(&self.persistence),
            Arc::clone(&self.clock),
        )
    }

    /// Builds a dispatcher with every lifecycle handler registered.
    #[must_use]
    pub fn dispatcher(&self, config: &LifecycleConfig) -> ActionDispatcher {
        ActionDispatcher::with_lifecycle_handlers(
            Arc::clone(&self.reminders),
            Arc::clone(&self.persistence),
            Arc::clone(&self.clock),
            config,
        )
    }

    /// Stores a reminder owned by `task_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifier is blank or the gateway lock fails.
    pub fn seed_reminder(
        &self,
        reminder_id: &str,
        task_id: &str,
        project_id: &str,
    ) -> Result<(), eyre::Report> {
        self.reminders.insert(Reminder::new(
            ReminderId::new(reminder_id)?,
            TaskId::new(task_id)?,
            Some(ProjectId::new(project_id)?),
        ))?;
        Ok(())
    }
}

/// Provides a fresh in-memory stack for each test.
#[fixture]
pub fn stack() -> Stack {
    Stack {
        reminders: Arc::new(InMemoryReminderGateway::new()),
        persistence: Arc::new(InMemoryPersistenceGateway::new()),
        clock: Arc::new(DefaultClock),
    }
}

/// Parses a task id, panicking on blank input.
pub fn task_id(value: &str) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

/// Parses a project id, panicking on blank input.
pub fn project_id(value: &str) -> ProjectId {
    ProjectId::new(value).expect("valid project id")
}

/// Parses a reminder id, panicking on blank input.
pub fn reminder_id(value: &str) -> ReminderId {
    ReminderId::new(value).expect("valid reminder id")
}

/// Builds `parent` with resolved subtasks named by `sub_ids`.
///
/// The parent carries `parent_reminder` when one is given.
pub fn parent_with_sub_tasks(
    parent: &str,
    parent_reminder: Option<&str>,
    sub_ids: &[&str],
) -> TaskWithSubTasks {
    let subs: Vec<Task> = sub_ids
        .iter()
        .map(|id| Task::new(task_id(id)).with_parent(task_id(parent)))
        .collect();
    let mut task = Task::new(task_id(parent))
        .with_title(format!("{parent} title"))
        .with_project(project_id("inbox"))
        .with_sub_task_ids(subs.iter().map(|t| t.id().clone()));
    if let Some(reminder) = parent_reminder {
        task = task.with_reminder(reminder_id(reminder));
    }
    TaskWithSubTasks::new(task).with_sub_tasks(subs)
}
