//! Handler port for actions delivered by the action bus.

use crate::task::domain::{TaskAction, TaskActionKind};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for action handlers.
pub type TaskActionHandlerResult<T> = Result<T, TaskActionHandlerError>;

/// A component that reacts to lifecycle actions.
///
/// Handlers declare the kinds they accept up front; the dispatcher only
/// delivers matching actions. Returned actions are re-emitted on the bus.
#[async_trait]
pub trait TaskActionHandler: Send + Sync {
    /// Short stable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Action kinds this handler accepts.
    fn handles(&self) -> &'static [TaskActionKind];

    /// Handles one action and returns any actions to emit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskActionHandlerError::Unsupported`] for kinds outside
    /// [`Self::handles`] and [`TaskActionHandlerError::Failed`] when the
    /// underlying operation fails.
    async fn handle(&self, action: &TaskAction) -> TaskActionHandlerResult<Vec<TaskAction>>;
}

/// Errors returned by action handlers.
#[derive(Debug, Clone, Error)]
pub enum TaskActionHandlerError {
    /// The handler was given an action it does not accept.
    #[error("handler {handler} does not accept {kind} actions")]
    Unsupported {
        /// Handler name.
        handler: &'static str,
        /// Rejected action kind.
        kind: TaskActionKind,
    },

    /// The handler's operation failed.
    #[error("handler {handler} failed: {source}")]
    Failed {
        /// Handler name.
        handler: &'static str,
        /// Underlying failure.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl TaskActionHandlerError {
    /// Builds an [`Self::Unsupported`] error.
    #[must_use]
    pub const fn unsupported(handler: &'static str, kind: TaskActionKind) -> Self {
        Self::Unsupported { handler, kind }
    }

    /// Wraps an operation failure.
    pub fn failed(
        handler: &'static str,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Failed {
            handler,
            source: Arc::new(err),
        }
    }
}
