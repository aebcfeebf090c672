//! Translates today-list reordering into completion updates.

use crate::task::{
    domain::{
        ListPositionChanged, TaskAction, TaskActionKind, TaskChanges, TaskUpdate,
        TodayListSection, UpdateTask,
    },
    ports::{TaskActionHandler, TaskActionHandlerError, TaskActionHandlerResult},
};
use async_trait::async_trait;
use tracing::debug;

/// Filters list moves between the done and undone sections and maps them
/// onto `isDone` updates. Every other move produces nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionSyncTranslator;

impl CompletionSyncTranslator {
    /// Creates a translator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the update implied by `event`, if any.
    #[must_use]
    pub fn translate(&self, event: &ListPositionChanged) -> Option<UpdateTask> {
        let is_done = match (&event.src, &event.target) {
            (TodayListSection::Done, TodayListSection::Undone) => false,
            (TodayListSection::Undone, TodayListSection::Done) => true,
            _ => return None,
        };
        Some(UpdateTask {
            task: TaskUpdate::new(event.task_id.clone(), TaskChanges::done(is_done)),
        })
    }
}

const HANDLED_KINDS: &[TaskActionKind] = &[TaskActionKind::ListPositionChanged];

#[async_trait]
impl TaskActionHandler for CompletionSyncTranslator {
    fn name(&self) -> &'static str {
        "completion_sync"
    }

    fn handles(&self) -> &'static [TaskActionKind] {
        HANDLED_KINDS
    }

    async fn handle(&self, action: &TaskAction) -> TaskActionHandlerResult<Vec<TaskAction>> {
        let TaskAction::ListPositionChanged(event) = action else {
            return Err(TaskActionHandlerError::unsupported(
                self.name(),
                action.kind(),
            ));
        };
        let Some(update) = self.translate(event) else {
            debug!(
                task_id = %event.task_id,
                src = %event.src,
                target = %event.target,
                "list move does not change completion"
            );
            return Ok(Vec::new());
        };
        Ok(vec![TaskAction::UpdateTask(update)])
    }
}
