//! Archive records and batches.

use super::{Task, TaskId, TaskWithSubTasks};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A task as stored in the archive.
///
/// Always done and never referencing a reminder, however it was built or
/// deserialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Task", into = "Task")]
pub struct ArchivedTask(Task);

impl ArchivedTask {
    /// Builds the archived form of `task`.
    #[must_use]
    pub fn new(task: &Task) -> Self {
        Self(task.to_archived())
    }

    /// Returns the archived task record.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.0
    }

    /// Returns the archived task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        self.0.id()
    }

}

impl From<Task> for ArchivedTask {
    fn from(task: Task) -> Self {
        Self::new(&task)
    }
}

impl From<ArchivedTask> for Task {
    fn from(archived: ArchivedTask) -> Self {
        archived.0
    }
}

/// Normalised set of archived tasks keyed by id, plus insertion order.
///
/// The same shape is used for a single archive write and for the archive
/// partition held by persistence adapters. Deserialisation rebuilds the
/// order from the records, so `ids` always lists each record exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ArchiveBatchRecord")]
pub struct ArchiveBatch {
    entities: HashMap<TaskId, ArchivedTask>,
    ids: Vec<TaskId>,
}

/// Stored shape of an [`ArchiveBatch`], accepted as-is before repair.
#[derive(Deserialize)]
struct ArchiveBatchRecord {
    #[serde(default)]
    entities: HashMap<TaskId, ArchivedTask>,
    #[serde(default)]
    ids: Vec<TaskId>,
}

impl From<ArchiveBatchRecord> for ArchiveBatch {
    fn from(record: ArchiveBatchRecord) -> Self {
        // Records are re-keyed by their own id; listed ids without a record
        // are dropped and records missing from the order go last, sorted.
        let entities: HashMap<TaskId, ArchivedTask> = record
            .entities
            .into_values()
            .map(|archived| (archived.id().clone(), archived))
            .collect();
        let mut seen = HashSet::with_capacity(entities.len());
        let mut ids: Vec<TaskId> = record
            .ids
            .into_iter()
            .filter(|id| entities.contains_key(id) && seen.insert(id.clone()))
            .collect();
        let mut unlisted: Vec<TaskId> = entities
            .keys()
            .filter(|id| !seen.contains(*id))
            .cloned()
            .collect();
        unlisted.sort();
        ids.extend(unlisted);
        Self { entities, ids }
    }
}

impl ArchiveBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a batch from parent tasks and their resolved subtasks.
    ///
    /// Parents precede their subtasks. A task listed more than once is
    /// archived at its first occurrence only.
    #[must_use]
    pub fn from_tasks(tasks: &[TaskWithSubTasks]) -> Self {
        let mut batch = Self::new();
        for task in tasks.iter().flat_map(TaskWithSubTasks::iter_tasks) {
            batch.insert(task);
        }
        batch
    }

    /// Archives `task` into the batch.
    ///
    /// Returns `false` without changes when the id is already present.
    pub fn insert(&mut self, task: &Task) -> bool {
        if self.entities.contains_key(task.id()) {
            return false;
        }
        self.ids.push(task.id().clone());
        self.entities
            .insert(task.id().clone(), ArchivedTask::new(task));
        true
    }

    /// Merges `other` into this batch.
    ///
    /// Records already present are replaced in place; new ids are appended
    /// in `other`'s order.
    pub fn extend(&mut self, other: &Self) {
        for archived in other.iter() {
            if !self.entities.contains_key(archived.id()) {
                self.ids.push(archived.id().clone());
            }
            self.entities
                .insert(archived.id().clone(), archived.clone());
        }
    }

    /// Removes the given ids. Unknown ids are ignored.
    ///
    /// Returns how many records were removed.
    pub fn remove(&mut self, task_ids: &[TaskId]) -> usize {
        let removed = task_ids
            .iter()
            .filter(|id| self.entities.remove(*id).is_some())
            .count();
        if removed > 0 {
            self.ids.retain(|id| self.entities.contains_key(id));
        }
        removed
    }

    /// Returns the archived record for `id`.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&ArchivedTask> {
        self.entities.get(id)
    }

    /// Returns whether `id` is archived in this batch.
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.entities.contains_key(id)
    }

    /// Returns ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[TaskId] {
        &self.ids
    }

    /// Iterates over archived records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ArchivedTask> {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    /// Returns the number of archived records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
