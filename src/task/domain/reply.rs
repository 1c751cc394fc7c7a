//! Progress reply aggregate attached to a task.

use super::{ReplyId, TaskDomainError, TaskId, TaskStatus};
use crate::org::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A progress note on a task, optionally carrying a status change.
///
/// The carried status is applied to the task when the reply is created;
/// editing a reply revises the recorded note only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReply {
    id: ReplyId,
    task_id: TaskId,
    author: UserId,
    message: String,
    new_status: Option<TaskStatus>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReplyData {
    /// Persisted reply identifier.
    pub id: ReplyId,
    /// Persisted parent task.
    pub task_id: TaskId,
    /// Persisted author.
    pub author: UserId,
    /// Persisted message.
    pub message: String,
    /// Persisted carried status, if any.
    pub new_status: Option<TaskStatus>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest edit timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ProgressReply {
    /// Creates a new reply on the given task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyReplyMessage`] if the message is
    /// empty after trimming.
    pub fn new(
        task_id: TaskId,
        author: UserId,
        message: impl Into<String>,
        new_status: Option<TaskStatus>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let normalized = validated_message(message)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: ReplyId::new(),
            task_id,
            author,
            message: normalized,
            new_status,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a reply from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedReplyData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            author: data.author,
            message: data.message,
            new_status: data.new_status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the reply identifier.
    #[must_use]
    pub const fn id(&self) -> ReplyId {
        self.id
    }

    /// Returns the parent task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the reply author.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns the reply message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the status carried by the reply, if any.
    #[must_use]
    pub const fn new_status(&self) -> Option<TaskStatus> {
        self.new_status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest edit timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Revises the reply message and recorded status note.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyReplyMessage`] if the message is
    /// empty after trimming; the reply is left unchanged.
    pub fn edit(
        &mut self,
        message: impl Into<String>,
        new_status: Option<TaskStatus>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let normalized = validated_message(message)?;
        self.message = normalized;
        self.new_status = new_status;
        self.updated_at = clock.utc();
        Ok(())
    }
}

/// Trims a reply message, rejecting empty results.
fn validated_message(message: impl Into<String>) -> Result<String, TaskDomainError> {
    let raw = message.into();
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(TaskDomainError::EmptyReplyMessage);
    }
    Ok(normalized.to_owned())
}
