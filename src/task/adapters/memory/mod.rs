//! In-memory gateway adapters.
//!
//! These adapters keep all state in process and record the calls they
//! receive, which makes them suitable for tests and deterministic local
//! runs.

mod attachment;
mod persistence;
mod reminder;

pub use attachment::InMemoryAttachmentGateway;
pub use persistence::{InMemoryPersistenceGateway, PersistenceCall};
pub use reminder::{InMemoryReminderGateway, ReminderCall};
