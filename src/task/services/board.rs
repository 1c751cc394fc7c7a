//! Service layer for guarded task and reply mutations.
//!
//! Every mutation resolves the actor's effective role from the membership
//! directory (never from caller-supplied state), evaluates the relevant
//! guard, and only then persists. Rejections surface the guard's reason;
//! no partial mutation occurs.

use crate::org::{
    domain::{OrgId, Role, UserId, effective_role},
    ports::{DirectoryError, MembershipDirectory},
};
use crate::task::{
    domain::{ProgressReply, ProjectId, ReplyId, Task, TaskDomainError, TaskId, TaskStatus},
    policy::rules::{self, TaskPolicyError, TaskScope},
    ports::{ReplyRepository, ReplyRepositoryError, TaskRepository, TaskRepositoryError},
    schedule::{CompletionDay, ScheduleBoard, ScheduleConfig, completion_history},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    org_id: OrgId,
    project_id: ProjectId,
    description: String,
    assignee: Option<UserId>,
    expected_finish: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(org_id: OrgId, project_id: ProjectId, description: impl Into<String>) -> Self {
        Self {
            org_id,
            project_id,
            description: description.into(),
            assignee: None,
            expected_finish: None,
        }
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the expected-finish instant.
    #[must_use]
    pub const fn with_expected_finish(mut self, expected_finish: DateTime<Utc>) -> Self {
        self.expected_finish = Some(expected_finish);
        self
    }
}

/// Service-level errors for task board operations.
#[derive(Debug, Error)]
pub enum TaskBoardError {
    /// A guard rejected the mutation.
    #[error(transparent)]
    Policy(#[from] TaskPolicyError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Reply repository operation failed.
    #[error(transparent)]
    Replies(#[from] ReplyRepositoryError),
    /// Membership directory operation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// The targeted task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The targeted reply does not exist.
    #[error("reply not found: {0}")]
    ReplyNotFound(ReplyId),
}

/// Result type for task board service operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

/// Task board orchestration service.
#[derive(Clone)]
pub struct TaskBoardService<R, P, D, C>
where
    R: TaskRepository,
    P: ReplyRepository,
    D: MembershipDirectory,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    replies: Arc<P>,
    directory: Arc<D>,
    clock: Arc<C>,
    config: ScheduleConfig,
}

impl<R, P, D, C> TaskBoardService<R, P, D, C>
where
    R: TaskRepository,
    P: ReplyRepository,
    D: MembershipDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task board service with the default schedule
    /// configuration.
    #[must_use]
    pub fn new(tasks: Arc<R>, replies: Arc<P>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            replies,
            directory,
            clock,
            config: ScheduleConfig::default(),
        }
    }

    /// Replaces the schedule configuration.
    #[must_use]
    pub fn with_config(mut self, config: ScheduleConfig) -> Self {
        self.config = config;
        self
    }

    /// Creates a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Policy`] unless the actor supervises the
    /// organization, [`TaskBoardError::Domain`] when validation fails, or
    /// a repository error when persistence fails.
    pub async fn create_task(
        &self,
        actor: UserId,
        request: CreateTaskRequest,
    ) -> TaskBoardResult<Task> {
        let actor_role = self.actor_role(request.org_id, actor).await?;
        check("create_task", rules::validate_task_creation(actor_role))?;

        let mut task = Task::new(
            request.org_id,
            request.project_id,
            request.description,
            &*self.clock,
        )?;
        if request.assignee.is_some() {
            task.assign(request.assignee, &*self.clock);
        }
        if request.expected_finish.is_some() {
            task.set_expected_finish(request.expected_finish, &*self.clock);
        }

        self.tasks.store(&task).await?;
        tracing::debug!(task = %task.id(), org = %task.org_id(), "task created");
        Ok(task)
    }

    /// Lists the organization's tasks within the actor's visible scope.
    ///
    /// Supervisors receive the full set; members receive only tasks
    /// assigned to them.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Policy`] when the actor is not an active
    /// member, or a repository error when the listing fails.
    pub async fn list_tasks(&self, actor: UserId, org_id: OrgId) -> TaskBoardResult<Vec<Task>> {
        let actor_role = self.actor_role(org_id, actor).await?;
        let role = actor_role.ok_or(TaskPolicyError::NotAMember)?;
        let listed = match rules::list_scope(role, actor) {
            TaskScope::All => self.tasks.list_by_org(org_id).await?,
            TaskScope::AssignedTo(assignee) => {
                self.tasks.list_by_assignee(org_id, assignee).await?
            }
        };
        Ok(listed)
    }

    /// Builds the schedule board over the actor's visible tasks.
    ///
    /// "Now" is captured once from the clock, in the local timezone, so
    /// one board never mixes inconsistent comparison instants.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Policy`] when the actor is not an active
    /// member, or a repository error when the listing fails.
    pub async fn schedule_board(
        &self,
        actor: UserId,
        org_id: OrgId,
    ) -> TaskBoardResult<ScheduleBoard> {
        let listed = self.list_tasks(actor, org_id).await?;
        let now = self.clock.local();
        Ok(ScheduleBoard::build(listed, &now, &self.config))
    }

    /// Reports per-day completion counts over the actor's visible tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Policy`] when the actor is not an active
    /// member, or a repository error when the listing fails.
    pub async fn completion_report(
        &self,
        actor: UserId,
        org_id: OrgId,
    ) -> TaskBoardResult<Vec<CompletionDay>> {
        let listed = self.list_tasks(actor, org_id).await?;
        let zone = self.clock.local().timezone();
        Ok(completion_history(&listed, &zone))
    }

    /// Changes a task's lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] when the task does not
    /// exist, [`TaskBoardError::Policy`] unless the actor supervises or
    /// holds the assignment, or a repository error when persistence
    /// fails.
    pub async fn update_status(
        &self,
        actor: UserId,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskBoardResult<Task> {
        let task = self.find_task(task_id).await?;
        let actor_role = self.actor_role(task.org_id(), actor).await?;
        check(
            "update_status",
            rules::validate_status_change(actor_role, actor, &task),
        )?;

        let mut updated = task;
        updated.set_status(status, &*self.clock);
        self.tasks.update(&updated).await?;
        tracing::debug!(task = %updated.id(), status = %updated.status(), "task status changed");
        Ok(updated)
    }

    /// Reassigns a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] when the task does not
    /// exist, [`TaskBoardError::Policy`] unless the actor supervises the
    /// organization, or a repository error when persistence fails.
    pub async fn reassign(
        &self,
        actor: UserId,
        task_id: TaskId,
        assignee: Option<UserId>,
    ) -> TaskBoardResult<Task> {
        let task = self.find_task(task_id).await?;
        let actor_role = self.actor_role(task.org_id(), actor).await?;
        check("reassign", rules::validate_task_reshape(actor_role))?;

        let mut updated = task;
        updated.assign(assignee, &*self.clock);
        self.tasks.update(&updated).await?;
        tracing::debug!(task = %updated.id(), "task reassigned");
        Ok(updated)
    }

    /// Replaces a task's expected-finish instant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] when the task does not
    /// exist, [`TaskBoardError::Policy`] unless the actor supervises the
    /// organization, or a repository error when persistence fails.
    pub async fn set_expected_finish(
        &self,
        actor: UserId,
        task_id: TaskId,
        expected_finish: Option<DateTime<Utc>>,
    ) -> TaskBoardResult<Task> {
        let task = self.find_task(task_id).await?;
        let actor_role = self.actor_role(task.org_id(), actor).await?;
        check(
            "set_expected_finish",
            rules::validate_task_reshape(actor_role),
        )?;

        let mut updated = task;
        updated.set_expected_finish(expected_finish, &*self.clock);
        self.tasks.update(&updated).await?;
        tracing::debug!(task = %updated.id(), "expected finish changed");
        Ok(updated)
    }

    /// Creates a progress reply, applying any carried status change to
    /// the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] when the task does not
    /// exist, [`TaskBoardError::Policy`] unless the actor supervises or
    /// holds the assignment, [`TaskBoardError::Domain`] when the message
    /// is empty, or a repository error when persistence fails.
    pub async fn add_reply(
        &self,
        actor: UserId,
        task_id: TaskId,
        message: impl Into<String> + Send,
        new_status: Option<TaskStatus>,
    ) -> TaskBoardResult<ProgressReply> {
        let task = self.find_task(task_id).await?;
        let actor_role = self.actor_role(task.org_id(), actor).await?;
        check(
            "add_reply",
            rules::validate_reply_creation(actor_role, actor, &task),
        )?;

        let reply = ProgressReply::new(task_id, actor, message, new_status, &*self.clock)?;
        self.replies.store(&reply).await?;
        if let Some(status) = new_status {
            let mut updated = task;
            updated.set_status(status, &*self.clock);
            self.tasks.update(&updated).await?;
        }
        tracing::debug!(reply = %reply.id(), task = %task_id, "reply created");
        Ok(reply)
    }

    /// Lists a task's replies, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] when the task does not
    /// exist, [`TaskBoardError::Policy`] when the task is outside the
    /// actor's visible scope, or a repository error when the listing
    /// fails.
    pub async fn list_replies(
        &self,
        actor: UserId,
        task_id: TaskId,
    ) -> TaskBoardResult<Vec<ProgressReply>> {
        let task = self.find_task(task_id).await?;
        let actor_role = self.actor_role(task.org_id(), actor).await?;
        rules::validate_task_view(actor_role, actor, &task)?;
        Ok(self.replies.list_by_task(task_id).await?)
    }

    /// Revises a reply's message and recorded status note.
    ///
    /// The carried status is not replayed onto the task; it mutated the
    /// task when the reply was created.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::ReplyNotFound`] when the reply does not
    /// exist, [`TaskBoardError::Policy`] unless the actor supervises or
    /// authored the reply, [`TaskBoardError::Domain`] when the message is
    /// empty, or a repository error when persistence fails.
    pub async fn edit_reply(
        &self,
        actor: UserId,
        reply_id: ReplyId,
        message: impl Into<String> + Send,
        new_status: Option<TaskStatus>,
    ) -> TaskBoardResult<ProgressReply> {
        let (reply, task) = self.find_reply_with_task(reply_id).await?;
        let actor_role = self.actor_role(task.org_id(), actor).await?;
        check(
            "edit_reply",
            rules::validate_reply_edit(actor_role, actor, &reply),
        )?;

        let mut updated = reply;
        updated.edit(message, new_status, &*self.clock)?;
        self.replies.update(&updated).await?;
        tracing::debug!(reply = %updated.id(), "reply edited");
        Ok(updated)
    }

    /// Deletes a reply.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::ReplyNotFound`] when the reply does not
    /// exist, [`TaskBoardError::Policy`] unless the actor supervises or
    /// authored the reply, or a repository error when persistence fails.
    pub async fn delete_reply(&self, actor: UserId, reply_id: ReplyId) -> TaskBoardResult<()> {
        let (reply, task) = self.find_reply_with_task(reply_id).await?;
        let actor_role = self.actor_role(task.org_id(), actor).await?;
        check(
            "delete_reply",
            rules::validate_reply_edit(actor_role, actor, &reply),
        )?;

        self.replies.delete(reply_id).await?;
        tracing::debug!(reply = %reply_id, "reply deleted");
        Ok(())
    }

    async fn actor_role(&self, org_id: OrgId, user_id: UserId) -> TaskBoardResult<Option<Role>> {
        let memberships = self.directory.active_memberships(org_id, user_id).await?;
        Ok(effective_role(&memberships))
    }

    async fn find_task(&self, task_id: TaskId) -> TaskBoardResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskBoardError::TaskNotFound(task_id))
    }

    async fn find_reply_with_task(
        &self,
        reply_id: ReplyId,
    ) -> TaskBoardResult<(ProgressReply, Task)> {
        let reply = self
            .replies
            .find_by_id(reply_id)
            .await?
            .ok_or(TaskBoardError::ReplyNotFound(reply_id))?;
        let task = self.find_task(reply.task_id()).await?;
        Ok((reply, task))
    }
}

/// Logs and forwards a guard outcome.
fn check(
    operation: &'static str,
    outcome: Result<(), TaskPolicyError>,
) -> Result<(), TaskPolicyError> {
    if let Err(reason) = &outcome {
        tracing::warn!(operation, %reason, "task mutation rejected");
    }
    outcome
}
