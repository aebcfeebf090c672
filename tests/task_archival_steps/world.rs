//! Shared world state for lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklife::{
    config::LifecycleConfig,
    task::{
        adapters::memory::{InMemoryPersistenceGateway, InMemoryReminderGateway},
        domain::{TaskAction, TaskWithSubTasks},
        services::{ActionDispatcher, ArchivalCoordinator, ArchiveOutcome, RelocationCoordinator},
    },
};

/// Archival coordinator type used by the BDD world.
pub type WorldArchival =
    ArchivalCoordinator<InMemoryReminderGateway, InMemoryPersistenceGateway, DefaultClock>;

/// Relocation coordinator type used by the BDD world.
pub type WorldRelocation =
    RelocationCoordinator<InMemoryReminderGateway, InMemoryPersistenceGateway, DefaultClock>;

/// Scenario world for lifecycle behaviour tests.
pub struct LifecycleWorld {
    pub reminders: Arc<InMemoryReminderGateway>,
    pub persistence: Arc<InMemoryPersistenceGateway>,
    pub archival: WorldArchival,
    pub relocation: WorldRelocation,
    pub dispatcher: ActionDispatcher,
    pub pending_task: Option<TaskWithSubTasks>,
    pub last_archive: Option<ArchiveOutcome>,
    pub last_emitted: Option<Vec<TaskAction>>,
}

impl LifecycleWorld {
    /// Creates a world over fresh in-memory gateways.
    #[must_use]
    pub fn new() -> Self {
        let reminders = Arc::new(InMemoryReminderGateway::new());
        let persistence = Arc::new(InMemoryPersistenceGateway::new());
        let clock = Arc::new(DefaultClock);
        let config = LifecycleConfig::default();

        Self {
            archival: ArchivalCoordinator::with_config(
                Arc::clone(&reminders),
                Arc::clone(&persistence),
                Arc::clone(&clock),
                &config,
            ),
            relocation: RelocationCoordinator::with_config(
                Arc::clone(&reminders),
                Arc::clone(&persistence),
                Arc::clone(&clock),
                &config,
            ),
            dispatcher: ActionDispatcher::with_lifecycle_handlers(
                Arc::clone(&reminders),
                Arc::clone(&persistence),
                clock,
                &config,
            ),
            reminders,
            persistence,
            pending_task: None,
            last_archive: None,
            last_emitted: None,
        }
    }

    /// Returns the task set up by a given step.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been set up.
    pub fn task(&self) -> Result<&TaskWithSubTasks, eyre::Report> {
        self.pending_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for LifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated list of ids, skipping blanks.
pub fn split_ids(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect()
}
