//! Repository port for progress reply persistence.

use crate::task::domain::{ProgressReply, ReplyId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for reply repository operations.
pub type ReplyRepositoryResult<T> = Result<T, ReplyRepositoryError>;

/// Progress reply persistence contract.
#[async_trait]
pub trait ReplyRepository: Send + Sync {
    /// Stores a new reply.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyRepositoryError::DuplicateReply`] when the reply ID
    /// already exists.
    async fn store(&self, reply: &ProgressReply) -> ReplyRepositoryResult<()>;

    /// Persists changes to an existing reply.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyRepositoryError::NotFound`] when the reply does not
    /// exist.
    async fn update(&self, reply: &ProgressReply) -> ReplyRepositoryResult<()>;

    /// Removes an existing reply.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyRepositoryError::NotFound`] when the reply does not
    /// exist.
    async fn delete(&self, id: ReplyId) -> ReplyRepositoryResult<()>;

    /// Finds a reply by identifier.
    ///
    /// Returns `None` when the reply does not exist.
    async fn find_by_id(&self, id: ReplyId) -> ReplyRepositoryResult<Option<ProgressReply>>;

    /// Returns all replies on the given task, oldest first.
    async fn list_by_task(&self, task_id: TaskId) -> ReplyRepositoryResult<Vec<ProgressReply>>;
}

/// Errors returned by reply repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ReplyRepositoryError {
    /// A reply with the same identifier already exists.
    #[error("duplicate reply identifier: {0}")]
    DuplicateReply(ReplyId),

    /// The reply was not found.
    #[error("reply not found: {0}")]
    NotFound(ReplyId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReplyRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
