//! Individual task-surface guard implementations.
//!
//! Each guard is a pure function over directory-held facts (the actor's
//! effective role, the task or reply being targeted). Guards return
//! `Ok(())` when the mutation may proceed or a specific
//! [`TaskPolicyError`] carrying the reason to report to the end user.

use crate::org::domain::{Role, UserId};
use crate::task::domain::{ProgressReply, Task};
use thiserror::Error;

/// Rejection reasons for task and reply mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskPolicyError {
    /// The actor holds no active membership in the task's organization.
    #[error("actor is not an active member of the organization")]
    NotAMember,

    /// The mutation is reserved for supervisors.
    #[error("requires the admin or manager role")]
    SupervisorRequired,

    /// The operation is open to supervisors and the assignee only.
    #[error("requires the admin or manager role or the task assignment")]
    NotAssigneeOrSupervisor,

    /// Replying is open to supervisors and the assignee only.
    #[error("replying requires the admin or manager role or the task assignment")]
    ReplyNotPermitted,

    /// Reply edits are open to supervisors and the author only.
    #[error("editing a reply requires the admin or manager role or reply authorship")]
    ReplyAuthorRequired,
}

/// Visibility scope applied to a task listing.
///
/// A scope is a restriction, not a rejection: members receive their own
/// assignments rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    /// Supervisors see the organization's full task set.
    All,
    /// Members see only tasks assigned to them.
    AssignedTo(UserId),
}

/// Resolves the listing scope for an actor with a confirmed role.
#[must_use]
pub const fn list_scope(actor_role: Role, actor: UserId) -> TaskScope {
    if actor_role.is_supervisor() {
        TaskScope::All
    } else {
        TaskScope::AssignedTo(actor)
    }
}

/// Validates creating a task.
///
/// # Errors
///
/// Returns [`TaskPolicyError::NotAMember`] or
/// [`TaskPolicyError::SupervisorRequired`] when the actor may not create
/// tasks.
pub fn validate_task_creation(actor_role: Option<Role>) -> Result<(), TaskPolicyError> {
    require_supervisor(actor_role)
}

/// Validates changing a task's status.
///
/// # Errors
///
/// Returns [`TaskPolicyError::NotAMember`] when the actor has no active
/// membership and [`TaskPolicyError::NotAssigneeOrSupervisor`] when the
/// actor neither supervises nor holds the assignment.
pub fn validate_status_change(
    actor_role: Option<Role>,
    actor: UserId,
    task: &Task,
) -> Result<(), TaskPolicyError> {
    let role = require_member(actor_role)?;
    if role.is_supervisor() || task.is_assigned_to(actor) {
        return Ok(());
    }
    Err(TaskPolicyError::NotAssigneeOrSupervisor)
}

/// Validates viewing a task's detail, including its replies.
///
/// Mirrors the listing scope: supervisors see everything, members only
/// what is assigned to them.
///
/// # Errors
///
/// Returns [`TaskPolicyError::NotAMember`] when the actor has no active
/// membership and [`TaskPolicyError::NotAssigneeOrSupervisor`] when the
/// task is outside the actor's visible scope.
pub fn validate_task_view(
    actor_role: Option<Role>,
    actor: UserId,
    task: &Task,
) -> Result<(), TaskPolicyError> {
    let role = require_member(actor_role)?;
    if role.is_supervisor() || task.is_assigned_to(actor) {
        return Ok(());
    }
    Err(TaskPolicyError::NotAssigneeOrSupervisor)
}

/// Validates reassigning a task or changing its expected finish.
///
/// Assignees may move their own task through statuses, but reshaping the
/// assignment or the schedule is reserved for supervisors.
///
/// # Errors
///
/// Returns [`TaskPolicyError::NotAMember`] or
/// [`TaskPolicyError::SupervisorRequired`] when the actor may not reshape
/// the task.
pub fn validate_task_reshape(actor_role: Option<Role>) -> Result<(), TaskPolicyError> {
    require_supervisor(actor_role)
}

/// Validates creating a progress reply on a task.
///
/// # Errors
///
/// Returns [`TaskPolicyError::NotAMember`] when the actor has no active
/// membership and [`TaskPolicyError::ReplyNotPermitted`] when the actor
/// neither supervises nor holds the assignment.
pub fn validate_reply_creation(
    actor_role: Option<Role>,
    actor: UserId,
    task: &Task,
) -> Result<(), TaskPolicyError> {
    let role = require_member(actor_role)?;
    if role.is_supervisor() || task.is_assigned_to(actor) {
        return Ok(());
    }
    Err(TaskPolicyError::ReplyNotPermitted)
}

/// Validates editing or deleting a progress reply.
///
/// Supervisors are authorized for any reply; other members only for
/// replies they authored.
///
/// # Errors
///
/// Returns [`TaskPolicyError::NotAMember`] when the actor has no active
/// membership and [`TaskPolicyError::ReplyAuthorRequired`] when the actor
/// neither supervises nor authored the reply.
pub fn validate_reply_edit(
    actor_role: Option<Role>,
    actor: UserId,
    reply: &ProgressReply,
) -> Result<(), TaskPolicyError> {
    let role = require_member(actor_role)?;
    if role.is_supervisor() || reply.author() == actor {
        return Ok(());
    }
    Err(TaskPolicyError::ReplyAuthorRequired)
}

fn require_member(actor_role: Option<Role>) -> Result<Role, TaskPolicyError> {
    actor_role.ok_or(TaskPolicyError::NotAMember)
}

fn require_supervisor(actor_role: Option<Role>) -> Result<(), TaskPolicyError> {
    let role = require_member(actor_role)?;
    if !role.is_supervisor() {
        return Err(TaskPolicyError::SupervisorRequired);
    }
    Ok(())
}
