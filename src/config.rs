//! Runtime configuration for the lifecycle coordinators.

use serde::{Deserialize, Serialize};

/// Default capacity of the dispatcher's broadcast channel.
pub const DEFAULT_BUS_CAPACITY: usize = 1024;

/// What a coordinator does when a reminder-gateway call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderFailurePolicy {
    /// Record the failure in the operation outcome and carry on.
    #[default]
    Collect,
    /// Abort the operation before its persistence write.
    Propagate,
}

/// Configuration for archival, relocation, and action dispatch.
///
/// # Examples
///
/// ```
/// use tasklife::config::{LifecycleConfig, ReminderFailurePolicy};
///
/// let config = LifecycleConfig::default();
/// assert_eq!(config.reminder_failure_policy, ReminderFailurePolicy::Collect);
///
/// let strict = LifecycleConfig::strict();
/// assert_eq!(strict.reminder_failure_policy, ReminderFailurePolicy::Propagate);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Handling of reminder-gateway failures.
    pub reminder_failure_policy: ReminderFailurePolicy,
    /// Whether moving tasks between projects updates the last-active time.
    pub touch_last_active_on_relocate: bool,
    /// Capacity of the dispatcher's broadcast channel.
    pub bus_capacity: usize,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            reminder_failure_policy: ReminderFailurePolicy::Collect,
            touch_last_active_on_relocate: true,
            bus_capacity: DEFAULT_BUS_CAPACITY,
        }
    }
}

impl LifecycleConfig {
    /// Configuration that aborts on any reminder failure.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            reminder_failure_policy: ReminderFailurePolicy::Propagate,
            ..Self::default()
        }
    }

    /// Parses a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the document is not valid JSON for this
    /// shape.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(raw)?;
        Ok(config.normalized())
    }

    /// Replaces a zero bus capacity with the default.
    #[must_use]
    pub const fn normalized(mut self) -> Self {
        if self.bus_capacity == 0 {
            self.bus_capacity = DEFAULT_BUS_CAPACITY;
        }
        self
    }
}
