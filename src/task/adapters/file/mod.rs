//! JSON-file persistence gateway rooted in a capability directory.
//!
//! State lives in three documents inside the directory:
//!
//! - `archive.json`: the archive partition as an [`ArchiveBatch`]
//! - `projects.json`: task id to project id assignments
//! - `last_active.json`: the last-active timestamp
//!
//! Each write replaces its document through a temporary file and a rename.
//! Gateway calls run on tokio's blocking pool.

use crate::task::{
    domain::{ArchiveBatch, ProjectId, TaskId, TaskWithSubTasks},
    ports::{PersistenceGateway, PersistenceGatewayError, PersistenceGatewayResult},
};
use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::sync::{Arc, Mutex};
use tracing::debug;

const ARCHIVE_FILE: &str = "archive.json";
const PROJECTS_FILE: &str = "projects.json";
const LAST_ACTIVE_FILE: &str = "last_active.json";

/// Persistence gateway storing JSON documents in one directory.
///
/// Filesystem work runs on the blocking thread pool; writes are serialised
/// so each read-modify-write cycle sees the previous one.
#[derive(Debug, Clone)]
pub struct FilePersistenceGateway {
    dir: Arc<Dir>,
    write_lock: Arc<Mutex<()>>,
}

impl FilePersistenceGateway {
    /// Opens the gateway over `path`, creating the directory when missing.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceGatewayError::Storage`] when the directory cannot
    /// be created or opened.
    pub fn open(path: &Utf8Path) -> PersistenceGatewayResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(PersistenceGatewayError::storage)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(PersistenceGatewayError::storage)?;
        Ok(Self::from_dir(dir))
    }

    /// Wraps an already opened directory.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self {
            dir: Arc::new(dir),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Reads the archive partition.
    ///
    /// # Errors
    ///
    /// Returns storage or serialization errors for unreadable documents.
    pub fn load_archive(&self) -> PersistenceGatewayResult<ArchiveBatch> {
        read_or_default(&self.dir, ARCHIVE_FILE)
    }

    /// Reads the project assigned to `task_id`.
    ///
    /// # Errors
    ///
    /// Returns storage or serialization errors for unreadable documents.
    pub fn load_project_of(&self, task_id: &TaskId) -> PersistenceGatewayResult<Option<ProjectId>> {
        let mut projects: BTreeMap<TaskId, ProjectId> = read_or_default(&self.dir, PROJECTS_FILE)?;
        Ok(projects.remove(task_id))
    }

    /// Reads the last-active timestamp.
    ///
    /// # Errors
    ///
    /// Returns storage or serialization errors for unreadable documents.
    pub fn load_last_active(&self) -> PersistenceGatewayResult<Option<DateTime<Utc>>> {
        read_or_default(&self.dir, LAST_ACTIVE_FILE)
    }

    /// Runs `f` against the directory on the blocking pool while holding the
    /// write lock.
    async fn run_blocking<F, T>(&self, f: F) -> PersistenceGatewayResult<T>
    where
        F: FnOnce(&Dir) -> PersistenceGatewayResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        let write_lock = Arc::clone(&self.write_lock);
        tokio::task::spawn_blocking(move || {
            let _guard = write_lock.lock().map_err(|err| {
                PersistenceGatewayError::storage(std::io::Error::other(err.to_string()))
            })?;
            f(&dir)
        })
        .await
        .map_err(PersistenceGatewayError::storage)?
    }
}

fn read_or_default<T>(dir: &Dir, name: &str) -> PersistenceGatewayResult<T>
where
    T: DeserializeOwned + Default,
{
    match dir.read_to_string(name) {
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(err) => Err(PersistenceGatewayError::storage(err)),
    }
}

fn write_document<T>(dir: &Dir, name: &str, value: &T) -> PersistenceGatewayResult<()>
where
    T: Serialize,
{
    let contents = serde_json::to_vec_pretty(value)?;
    let temp_name = format!("{name}.tmp");
    dir.write(&temp_name, contents)
        .map_err(PersistenceGatewayError::storage)?;
    dir.rename(&temp_name, dir, name)
        .map_err(PersistenceGatewayError::storage)?;
    debug!(document = name, "persisted document");
    Ok(())
}

#[async_trait]
impl PersistenceGateway for FilePersistenceGateway {
    async fn add_tasks_to_archive(&self, batch: &ArchiveBatch) -> PersistenceGatewayResult<()> {
        let batch = batch.clone();
        self.run_blocking(move |dir| {
            let mut archive: ArchiveBatch = read_or_default(dir, ARCHIVE_FILE)?;
            archive.extend(&batch);
            write_document(dir, ARCHIVE_FILE, &archive)
        })
        .await
    }

    async fn remove_tasks_from_archive(
        &self,
        task_ids: &[TaskId],
    ) -> PersistenceGatewayResult<()> {
        let task_ids = task_ids.to_vec();
        self.run_blocking(move |dir| {
            let mut archive: ArchiveBatch = read_or_default(dir, ARCHIVE_FILE)?;
            if archive.remove(&task_ids) == 0 {
                return Ok(());
            }
            write_document(dir, ARCHIVE_FILE, &archive)
        })
        .await
    }

    async fn save_tasks_to_project(
        &self,
        project_id: &ProjectId,
        tasks: &[TaskWithSubTasks],
    ) -> PersistenceGatewayResult<()> {
        let project_id = project_id.clone();
        let task_ids: Vec<TaskId> = tasks
            .iter()
            .flat_map(TaskWithSubTasks::iter_tasks)
            .map(|task| task.id().clone())
            .collect();
        self.run_blocking(move |dir| {
            let mut projects: BTreeMap<TaskId, ProjectId> = read_or_default(dir, PROJECTS_FILE)?;
            for task_id in task_ids {
                projects.insert(task_id, project_id.clone());
            }
            write_document(dir, PROJECTS_FILE, &projects)
        })
        .await
    }

    async fn save_last_active(&self, at: DateTime<Utc>) -> PersistenceGatewayResult<()> {
        self.run_blocking(move |dir| write_document(dir, LAST_ACTIVE_FILE, &at))
            .await
    }
}
