//! Directory port for membership persistence and lookup.

use crate::org::domain::{Membership, OrgId, Role, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for membership directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Membership persistence contract.
///
/// The directory is the source of truth guards are evaluated against;
/// services never trust caller-supplied role or membership state.
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    /// Returns the user's active memberships in the organization.
    ///
    /// At most one entry exists per (organization, user) pair; the list
    /// form keeps the effective-role fold defensive.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the lookup fails.
    async fn active_memberships(
        &self,
        org_id: OrgId,
        user_id: UserId,
    ) -> DirectoryResult<Vec<Membership>>;

    /// Finds the user's membership in the organization, active or not.
    ///
    /// Returns `None` when no membership exists.
    async fn find(&self, org_id: OrgId, user_id: UserId) -> DirectoryResult<Option<Membership>>;

    /// Stores a new membership.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateMembership`] when the user
    /// already has a membership in the organization.
    async fn insert(&self, membership: &Membership) -> DirectoryResult<()>;

    /// Replaces the role on an existing membership.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] when no membership exists.
    async fn set_role(&self, org_id: OrgId, user_id: UserId, role: Role) -> DirectoryResult<()>;

    /// Activates or deactivates an existing membership.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] when no membership exists.
    async fn set_active(&self, org_id: OrgId, user_id: UserId, active: bool)
    -> DirectoryResult<()>;

    /// Counts the organization's active admin seats.
    async fn active_admin_count(&self, org_id: OrgId) -> DirectoryResult<usize>;

    /// Counts all memberships in the organization, active or not.
    async fn member_count(&self, org_id: OrgId) -> DirectoryResult<usize>;
}

/// Errors returned by membership directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// No membership exists for the user in the organization.
    #[error("no membership for user {user_id} in organization {org_id}")]
    NotFound {
        /// Organization that was searched.
        org_id: OrgId,
        /// User that was searched for.
        user_id: UserId,
    },

    /// The user already has a membership in the organization.
    #[error("user {user_id} already has a membership in organization {org_id}")]
    DuplicateMembership {
        /// Organization the duplicate targets.
        org_id: OrgId,
        /// User the duplicate targets.
        user_id: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
