//! Port contracts for task lifecycle coordination.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod attachment;
pub mod handler;
pub mod persistence;
pub mod reminder;

pub use attachment::{AttachmentGateway, AttachmentGatewayError, AttachmentGatewayResult};
pub use handler::{TaskActionHandler, TaskActionHandlerError, TaskActionHandlerResult};
pub use persistence::{PersistenceGateway, PersistenceGatewayError, PersistenceGatewayResult};
pub use reminder::{ReminderGateway, ReminderGatewayError, ReminderGatewayResult};
