//! Task aggregate root and lifecycle status.

use super::{ParseTaskStatusError, ProjectId, TaskDomainError, TaskId};
use crate::org::domain::{OrgId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Todo,
    /// Task is being worked on.
    InProgress,
    /// Task has been completed.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Returns whether the status is the completed state.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task aggregate root.
///
/// Tasks carry their organization directly so org-scoped listing and
/// authorization need no project join. The completion timestamp tracks
/// status changes: it is set when the status enters [`TaskStatus::Done`]
/// and cleared when the task is reopened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    org_id: OrgId,
    project_id: ProjectId,
    description: String,
    assignee: Option<UserId>,
    status: TaskStatus,
    expected_finish: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted organization scope.
    pub org_id: OrgId,
    /// Persisted project grouping.
    pub project_id: ProjectId,
    /// Persisted description.
    pub description: String,
    /// Persisted assignee, if any.
    pub assignee: Option<UserId>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted expected-finish instant, if any.
    pub expected_finish: Option<DateTime<Utc>>,
    /// Persisted completion instant, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new unassigned task in the todo status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] if the description is
    /// empty after trimming.
    pub fn new(
        org_id: OrgId,
        project_id: ProjectId,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw = description.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            org_id,
            project_id,
            description: normalized.to_owned(),
            assignee: None,
            status: TaskStatus::Todo,
            expected_finish: None,
            completed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            org_id: data.org_id,
            project_id: data.project_id,
            description: data.description,
            assignee: data.assignee,
            status: data.status,
            expected_finish: data.expected_finish,
            completed_at: data.completed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the organization the task is scoped to.
    #[must_use]
    pub const fn org_id(&self) -> OrgId {
        self.org_id
    }

    /// Returns the project the task belongs to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns whether the task is assigned to the given user.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assignee == Some(user_id)
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the expected-finish instant, if any.
    #[must_use]
    pub const fn expected_finish(&self) -> Option<DateTime<Utc>> {
        self.expected_finish
    }

    /// Returns the completion instant, if the task is completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the assignee.
    pub fn assign(&mut self, assignee: Option<UserId>, clock: &impl Clock) {
        self.assignee = assignee;
        self.touch(clock);
    }

    /// Replaces the expected-finish instant.
    pub fn set_expected_finish(
        &mut self,
        expected_finish: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) {
        self.expected_finish = expected_finish;
        self.touch(clock);
    }

    /// Replaces the lifecycle status and maintains the completion instant.
    ///
    /// Entering [`TaskStatus::Done`] stamps the completion instant with
    /// the clock's current time; leaving it clears the instant again so a
    /// reopened task never reports a stale completion.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        let timestamp = clock.utc();
        match (self.status.is_done(), status.is_done()) {
            (false, true) => self.completed_at = Some(timestamp),
            (true, false) => self.completed_at = None,
            _ => {}
        }
        self.status = status;
        self.updated_at = timestamp;
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
