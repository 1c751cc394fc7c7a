//! Domain model for tasks and progress replies.
//!
//! The task domain models org-scoped tasks with optional assignment and
//! expected-finish instants, completion-timestamp bookkeeping, and
//! progress replies, while keeping all infrastructure concerns outside of
//! the domain boundary.

mod error;
mod ids;
mod reply;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{ProjectId, ReplyId, TaskId};
pub use reply::{PersistedReplyData, ProgressReply};
pub use task::{PersistedTaskData, Task, TaskStatus};
