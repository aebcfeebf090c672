//! In-memory persistence gateway.

use crate::task::{
    domain::{ArchiveBatch, ProjectId, TaskId, TaskWithSubTasks},
    ports::{PersistenceGateway, PersistenceGatewayError, PersistenceGatewayResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

/// A call received by [`InMemoryPersistenceGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceCall {
    /// `add_tasks_to_archive` with the batch ids in order.
    AddToArchive(Vec<TaskId>),
    /// `remove_tasks_from_archive`.
    RemoveFromArchive(Vec<TaskId>),
    /// `save_tasks_to_project` with the parent ids in order.
    SaveToProject(ProjectId, Vec<TaskId>),
    /// `save_last_active`.
    SaveLastActive(DateTime<Utc>),
}

/// Thread-safe in-memory archive and project store that records every call.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersistenceGateway {
    state: Arc<RwLock<InMemoryPersistenceState>>,
}

#[derive(Debug, Default)]
struct InMemoryPersistenceState {
    archive: ArchiveBatch,
    projects: HashMap<TaskId, ProjectId>,
    last_active: Option<DateTime<Utc>>,
    calls: Vec<PersistenceCall>,
    fail_writes: bool,
}

fn lock_error(err: impl ToString) -> PersistenceGatewayError {
    PersistenceGatewayError::storage(std::io::Error::other(err.to_string()))
}

impl InMemoryPersistenceGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later write fail with a storage error when `fail` is set.
    ///
    /// Failed writes are still recorded as calls.
    ///
    /// # Errors
    ///
    /// Returns a storage error when lock acquisition fails.
    pub fn set_fail_writes(&self, fail: bool) -> PersistenceGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.fail_writes = fail;
        Ok(())
    }

    /// Returns a copy of the archive partition.
    ///
    /// # Errors
    ///
    /// Returns a storage error when lock acquisition fails.
    pub fn archive(&self) -> PersistenceGatewayResult<ArchiveBatch> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.archive.clone())
    }

    /// Returns the project a task was last assigned to.
    ///
    /// # Errors
    ///
    /// Returns a storage error when lock acquisition fails.
    pub fn project_of(&self, task_id: &TaskId) -> PersistenceGatewayResult<Option<ProjectId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.projects.get(task_id).cloned())
    }

    /// Returns the last-active timestamp, if one was saved.
    ///
    /// # Errors
    ///
    /// Returns a storage error when lock acquisition fails.
    pub fn last_active(&self) -> PersistenceGatewayResult<Option<DateTime<Utc>>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.last_active)
    }

    /// Returns every call received so far, in order.
    ///
    /// # Errors
    ///
    /// Returns a storage error when lock acquisition fails.
    pub fn calls(&self) -> PersistenceGatewayResult<Vec<PersistenceCall>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.calls.clone())
    }

    fn record(
        &self,
        call: PersistenceCall,
    ) -> PersistenceGatewayResult<RwLockWriteGuard<'_, InMemoryPersistenceState>> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.calls.push(call);
        if state.fail_writes {
            return Err(PersistenceGatewayError::storage(std::io::Error::other(
                "injected write failure",
            )));
        }
        Ok(state)
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryPersistenceGateway {
    async fn add_tasks_to_archive(&self, batch: &ArchiveBatch) -> PersistenceGatewayResult<()> {
        let mut state = self.record(PersistenceCall::AddToArchive(batch.ids().to_vec()))?;
        state.archive.extend(batch);
        Ok(())
    }

    async fn remove_tasks_from_archive(
        &self,
        task_ids: &[TaskId],
    ) -> PersistenceGatewayResult<()> {
        let mut state = self.record(PersistenceCall::RemoveFromArchive(task_ids.to_vec()))?;
        state.archive.remove(task_ids);
        Ok(())
    }

    async fn save_tasks_to_project(
        &self,
        project_id: &ProjectId,
        tasks: &[TaskWithSubTasks],
    ) -> PersistenceGatewayResult<()> {
        let parent_ids = tasks.iter().map(|t| t.task().id().clone()).collect();
        let mut state = self.record(PersistenceCall::SaveToProject(
            project_id.clone(),
            parent_ids,
        ))?;
        for task in tasks.iter().flat_map(TaskWithSubTasks::iter_tasks) {
            state.projects.insert(task.id().clone(), project_id.clone());
        }
        Ok(())
    }

    async fn save_last_active(&self, at: DateTime<Utc>) -> PersistenceGatewayResult<()> {
        let mut state = self.record(PersistenceCall::SaveLastActive(at))?;
        state.last_active = Some(at);
        Ok(())
    }
}
