//! Helpers shared by the archival and relocation coordinators.

use crate::config::ReminderFailurePolicy;
use crate::task::{
    domain::{ReminderId, TaskId, TaskWithSubTasks},
    ports::{PersistenceGateway, PersistenceGatewayResult, ReminderGatewayError},
};
use mockable::Clock;
use tracing::{debug, warn};

/// A reminder-gateway call that failed while the operation carried on.
#[derive(Debug, Clone)]
pub struct ReminderFailure {
    task_id: TaskId,
    reminder_id: ReminderId,
    error: ReminderGatewayError,
}

impl ReminderFailure {
    /// Returns the task owning the reminder.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the reminder the call targeted.
    #[must_use]
    pub const fn reminder_id(&self) -> &ReminderId {
        &self.reminder_id
    }

    /// Returns the gateway error.
    #[must_use]
    pub const fn error(&self) -> &ReminderGatewayError {
        &self.error
    }
}

/// Applies `policy` to the result of one reminder-gateway call.
///
/// Under [`ReminderFailurePolicy::Collect`] a failure is pushed onto
/// `failures`; under [`ReminderFailurePolicy::Propagate`] it is returned.
pub(super) fn settle_reminder_call(
    policy: ReminderFailurePolicy,
    failures: &mut Vec<ReminderFailure>,
    task_id: &TaskId,
    reminder_id: &ReminderId,
    result: Result<(), ReminderGatewayError>,
) -> Result<(), ReminderGatewayError> {
    let Err(error) = result else {
        return Ok(());
    };
    match policy {
        ReminderFailurePolicy::Propagate => Err(error),
        ReminderFailurePolicy::Collect => {
            warn!(
                task_id = %task_id,
                reminder_id = %reminder_id,
                error = %error,
                "reminder call failed, continuing"
            );
            failures.push(ReminderFailure {
                task_id: task_id.clone(),
                reminder_id: reminder_id.clone(),
                error,
            });
            Ok(())
        }
    }
}

/// Writes the current time as the last-active timestamp.
pub(super) async fn touch_last_active<P, C>(
    persistence: &P,
    clock: &C,
) -> PersistenceGatewayResult<()>
where
    P: PersistenceGateway + ?Sized,
    C: Clock + ?Sized,
{
    let at = clock.utc();
    persistence.save_last_active(at).await?;
    debug!(at = %at, "last-active timestamp updated");
    Ok(())
}

/// Logs subtasks referenced by a parent but missing from its snapshot.
pub(super) fn warn_on_unresolved_sub_tasks(task: &TaskWithSubTasks) {
    let missing = task.missing_sub_tasks();
    if !missing.is_empty() {
        warn!(
            task_id = %task.task().id(),
            missing = missing.len(),
            "snapshot is missing referenced subtasks"
        );
    }
}
