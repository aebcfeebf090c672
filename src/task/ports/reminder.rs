//! Reminder gateway port.

use crate::task::domain::{ReminderChanges, ReminderId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for reminder gateway operations.
pub type ReminderGatewayResult<T> = Result<T, ReminderGatewayError>;

/// Operations the lifecycle coordinators need from the reminder subsystem.
///
/// Scheduling and firing of reminders stays inside the subsystem.
#[async_trait]
pub trait ReminderGateway: Send + Sync {
    /// Removes a reminder.
    async fn remove_reminder(&self, reminder_id: &ReminderId) -> ReminderGatewayResult<()>;

    /// Applies a partial update to a reminder.
    async fn update_reminder(
        &self,
        reminder_id: &ReminderId,
        changes: &ReminderChanges,
    ) -> ReminderGatewayResult<()>;
}

/// Errors returned by reminder gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum ReminderGatewayError {
    /// The reminder does not exist.
    #[error("reminder not found: {0}")]
    NotFound(ReminderId),

    /// Backend failure.
    #[error("reminder backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReminderGatewayError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
