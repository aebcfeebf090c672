//! Explicit cleanup of data related to tasks, such as attachments.
//!
//! Nothing here runs implicitly: callers resolve the related ids first and
//! then ask for their removal.

use crate::task::{
    domain::{AttachmentId, TaskWithSubTasks},
    ports::{AttachmentGateway, AttachmentGatewayError},
};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for related-data cleanup.
#[derive(Debug, Error)]
pub enum RelatedDataError {
    /// The attachment gateway failed.
    #[error(transparent)]
    Attachment(#[from] AttachmentGatewayError),
}

/// Resolves and removes data owned alongside tasks.
#[derive(Clone)]
pub struct RelatedDataService<A>
where
    A: AttachmentGateway,
{
    attachments: Arc<A>,
}

impl<A> RelatedDataService<A>
where
    A: AttachmentGateway,
{
    /// Creates a service over an attachment gateway.
    #[must_use]
    pub const fn new(attachments: Arc<A>) -> Self {
        Self { attachments }
    }

    /// Collects attachment ids of a task and its subtasks.
    ///
    /// Parent attachments come first; duplicates keep their first position.
    #[must_use]
    pub fn related_attachment_ids(task: &TaskWithSubTasks) -> Vec<AttachmentId> {
        let mut seen = HashSet::new();
        task.iter_tasks()
            .flat_map(|t| t.attachment_ids().iter())
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect()
    }

    /// Removes already-resolved attachments. An empty list is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RelatedDataError::Attachment`] when the gateway fails.
    pub async fn remove_related_data(
        &self,
        attachment_ids: &[AttachmentId],
    ) -> Result<(), RelatedDataError> {
        if attachment_ids.is_empty() {
            return Ok(());
        }
        self.attachments.remove_attachments(attachment_ids).await?;
        info!(attachments = attachment_ids.len(), "related attachments removed");
        Ok(())
    }
}
