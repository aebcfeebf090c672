//! In-memory attachment gateway.

use crate::task::{
    domain::AttachmentId,
    ports::{AttachmentGateway, AttachmentGatewayError, AttachmentGatewayResult},
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory attachment set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttachmentGateway {
    state: Arc<RwLock<InMemoryAttachmentState>>,
}

#[derive(Debug, Default)]
struct InMemoryAttachmentState {
    attachments: HashSet<AttachmentId>,
    removal_calls: Vec<Vec<AttachmentId>>,
}

fn lock_error(err: impl ToString) -> AttachmentGatewayError {
    AttachmentGatewayError::backend(std::io::Error::other(err.to_string()))
}

impl InMemoryAttachmentGateway {
    /// Creates a gateway holding `attachments`.
    #[must_use]
    pub fn with_attachments(attachments: impl IntoIterator<Item = AttachmentId>) -> Self {
        let state = InMemoryAttachmentState {
            attachments: attachments.into_iter().collect(),
            removal_calls: Vec::new(),
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Returns whether `attachment_id` is still stored.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn contains(&self, attachment_id: &AttachmentId) -> AttachmentGatewayResult<bool> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.attachments.contains(attachment_id))
    }

    /// Returns the id lists of every removal call, in order.
    ///
    /// # Errors
    ///
    /// Returns a backend error when lock acquisition fails.
    pub fn removal_calls(&self) -> AttachmentGatewayResult<Vec<Vec<AttachmentId>>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.removal_calls.clone())
    }
}

#[async_trait]
impl AttachmentGateway for InMemoryAttachmentGateway {
    async fn remove_attachments(
        &self,
        attachment_ids: &[AttachmentId],
    ) -> AttachmentGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.removal_calls.push(attachment_ids.to_vec());
        for id in attachment_ids {
            state.attachments.remove(id);
        }
        Ok(())
    }
}
