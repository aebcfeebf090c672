//! In-memory reminder gateway.

use crate::task::{
    domain::{Reminder, ReminderChanges, ReminderId},
    ports::{ReminderGateway, ReminderGatewayError, ReminderGatewayResult},
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// A call received by [`InMemoryReminderGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderCall {
    /// `remove_reminder`.
    Remove(ReminderId),
    /// `update_reminder`.
    Update(ReminderId, ReminderChanges),
}

/// Thread-safe in-memory reminder store that records every call.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReminderGateway {
    state: Arc<RwLock<InMemoryReminderState>>,
}

#[derive(Debug, Default)]
struct InMemoryReminderState {
    reminders: HashMap<ReminderId, Reminder>,
    calls: Vec<ReminderCall>,
    failing: HashSet<ReminderId>,
}

fn lock_error(err: impl ToString) -> ReminderGatewayError {
    ReminderGatewayError::backend(std::io::Error::other(err.to_string()))
}

impl InMemoryReminderGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a reminder, replacing any with the same id.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn insert(&self, reminder: Reminder) -> ReminderGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.reminders.insert(reminder.id().clone(), reminder);
        Ok(())
    }

    /// Makes every later call for `reminder_id` fail with a backend error.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn fail_for(&self, reminder_id: ReminderId) -> ReminderGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing.insert(reminder_id);
        Ok(())
    }

    /// Returns the stored reminder for `reminder_id`.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn get(&self, reminder_id: &ReminderId) -> ReminderGatewayResult<Option<Reminder>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.reminders.get(reminder_id).cloned())
    }

    /// Returns every call received so far, in order.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn calls(&self) -> ReminderGatewayResult<Vec<ReminderCall>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.calls.clone())
    }
}

fn check_failing(
    state: &InMemoryReminderState,
    reminder_id: &ReminderId,
) -> ReminderGatewayResult<()> {
    if state.failing.contains(reminder_id) {
        return Err(ReminderGatewayError::backend(std::io::Error::other(format!(
            "injected failure for reminder {reminder_id}"
        ))));
    }
    Ok(())
}

#[async_trait]
impl ReminderGateway for InMemoryReminderGateway {
    async fn remove_reminder(&self, reminder_id: &ReminderId) -> ReminderGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.calls.push(ReminderCall::Remove(reminder_id.clone()));
        check_failing(&state, reminder_id)?;
        state
            .reminders
            .remove(reminder_id)
            .map(|_| ())
            .ok_or_else(|| ReminderGatewayError::NotFound(reminder_id.clone()))
    }

    async fn update_reminder(
        &self,
        reminder_id: &ReminderId,
        changes: &ReminderChanges,
    ) -> ReminderGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .calls
            .push(ReminderCall::Update(reminder_id.clone(), changes.clone()));
        check_failing(&state, reminder_id)?;
        let reminder = state
            .reminders
            .get_mut(reminder_id)
            .ok_or_else(|| ReminderGatewayError::NotFound(reminder_id.clone()))?;
        reminder.apply(changes);
        Ok(())
    }
}
