//! In-memory reply repository for tests and standalone use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{ProgressReply, ReplyId, TaskId},
    ports::{ReplyRepository, ReplyRepositoryError, ReplyRepositoryResult},
};

/// Thread-safe in-memory reply repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReplyRepository {
    state: Arc<RwLock<ReplyState>>,
}

#[derive(Debug, Default)]
struct ReplyState {
    replies: HashMap<ReplyId, ProgressReply>,
}

impl InMemoryReplyRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> ReplyRepositoryError {
    ReplyRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ReplyRepository for InMemoryReplyRepository {
    async fn store(&self, reply: &ProgressReply) -> ReplyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.replies.contains_key(&reply.id()) {
            return Err(ReplyRepositoryError::DuplicateReply(reply.id()));
        }
        state.replies.insert(reply.id(), reply.clone());
        Ok(())
    }

    async fn update(&self, reply: &ProgressReply) -> ReplyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.replies.contains_key(&reply.id()) {
            return Err(ReplyRepositoryError::NotFound(reply.id()));
        }
        state.replies.insert(reply.id(), reply.clone());
        Ok(())
    }

    async fn delete(&self, id: ReplyId) -> ReplyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .replies
            .remove(&id)
            .map(|_| ())
            .ok_or(ReplyRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: ReplyId) -> ReplyRepositoryResult<Option<ProgressReply>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.replies.get(&id).cloned())
    }

    async fn list_by_task(&self, task_id: TaskId) -> ReplyRepositoryResult<Vec<ProgressReply>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut replies: Vec<ProgressReply> = state
            .replies
            .values()
            .filter(|reply| reply.task_id() == task_id)
            .cloned()
            .collect();
        replies.sort_by_key(ProgressReply::created_at);
        Ok(replies)
    }
}
