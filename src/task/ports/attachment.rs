//! Attachment gateway port for related-data cleanup.

use crate::task::domain::AttachmentId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for attachment gateway operations.
pub type AttachmentGatewayResult<T> = Result<T, AttachmentGatewayError>;

/// Removal contract for attachments owned outside the task store.
#[async_trait]
pub trait AttachmentGateway: Send + Sync {
    /// Removes the given attachments. Unknown ids are ignored.
    async fn remove_attachments(
        &self,
        attachment_ids: &[AttachmentId],
    ) -> AttachmentGatewayResult<()>;
}

/// Errors returned by attachment gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum AttachmentGatewayError {
    /// Backend failure.
    #[error("attachment backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl AttachmentGatewayError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
