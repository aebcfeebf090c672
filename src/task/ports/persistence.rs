//! Persistence gateway port for archive and project writes.

use crate::task::domain::{ArchiveBatch, ProjectId, TaskId, TaskWithSubTasks};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for persistence gateway operations.
pub type PersistenceGatewayResult<T> = Result<T, PersistenceGatewayError>;

/// Durable writes issued by the lifecycle coordinators.
///
/// All durable state goes through this contract; the coordinators own no
/// storage themselves.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Adds a batch to the archive partition in one write.
    ///
    /// Records already archived under the same id are replaced.
    async fn add_tasks_to_archive(&self, batch: &ArchiveBatch) -> PersistenceGatewayResult<()>;

    /// Removes ids from the archive partition.
    ///
    /// Ids that are not archived are ignored.
    async fn remove_tasks_from_archive(&self, task_ids: &[TaskId])
    -> PersistenceGatewayResult<()>;

    /// Reassigns tasks and their subtasks to `project_id`.
    async fn save_tasks_to_project(
        &self,
        project_id: &ProjectId,
        tasks: &[TaskWithSubTasks],
    ) -> PersistenceGatewayResult<()>;

    /// Records the last time the user changed data.
    async fn save_last_active(&self, at: DateTime<Utc>) -> PersistenceGatewayResult<()>;
}

/// Errors returned by persistence gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum PersistenceGatewayError {
    /// Stored data could not be encoded or decoded.
    #[error("persistence serialization error: {0}")]
    Serialization(String),

    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl PersistenceGatewayError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}

impl From<serde_json::Error> for PersistenceGatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
