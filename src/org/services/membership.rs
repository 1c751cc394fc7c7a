//! Service layer for guarded membership mutations.

use crate::org::{
    domain::{Membership, OrgId, Role, UserId, effective_role},
    policy::rules::{self, MemberPolicyError},
    ports::{DirectoryError, MembershipDirectory},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for membership operations.
#[derive(Debug, Error)]
pub enum MembershipServiceError {
    /// A guard rejected the mutation.
    #[error(transparent)]
    Policy(#[from] MemberPolicyError),
    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// The targeted membership does not exist.
    #[error("no membership for user {user_id} in organization {org_id}")]
    MembershipNotFound {
        /// Organization that was searched.
        org_id: OrgId,
        /// User the mutation targeted.
        user_id: UserId,
    },
}

/// Result type for membership service operations.
pub type MembershipServiceResult<T> = Result<T, MembershipServiceError>;

/// Membership management service.
///
/// Gathers directory-held facts, evaluates the member-management guards,
/// and only then persists; no partial mutation occurs on rejection.
#[derive(Clone)]
pub struct MembershipService<D>
where
    D: MembershipDirectory,
{
    directory: Arc<D>,
}

impl<D> MembershipService<D>
where
    D: MembershipDirectory,
{
    /// Creates a new membership service.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Resolves the user's effective role in the organization.
    ///
    /// Returns `None` when the user holds no active membership; callers
    /// must treat that as "not authorized", not as [`Role::Member`].
    ///
    /// # Errors
    ///
    /// Returns [`MembershipServiceError::Directory`] when the lookup
    /// fails.
    pub async fn effective_role(
        &self,
        org_id: OrgId,
        user_id: UserId,
    ) -> MembershipServiceResult<Option<Role>> {
        let memberships = self.directory.active_memberships(org_id, user_id).await?;
        Ok(effective_role(&memberships))
    }

    /// Creates the organization's first admin membership.
    ///
    /// This is the privileged path admin elevation is reserved for; it is
    /// only open while the organization has no memberships at all.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipServiceError::Policy`] once any membership
    /// exists, or [`MembershipServiceError::Directory`] when persistence
    /// fails.
    pub async fn bootstrap_admin(
        &self,
        org_id: OrgId,
        user_id: UserId,
    ) -> MembershipServiceResult<Membership> {
        let member_count = self.directory.member_count(org_id).await?;
        check("bootstrap_admin", rules::validate_bootstrap(member_count))?;

        let membership = Membership::new(org_id, user_id, Role::Admin);
        self.directory.insert(&membership).await?;
        tracing::debug!(org = %org_id, user = %user_id, "organization bootstrapped with first admin");
        Ok(membership)
    }

    /// Enrolls a new member at the given role.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipServiceError::Policy`] when the actor may not
    /// manage members or the role is admin, or
    /// [`MembershipServiceError::Directory`] when the user is already
    /// enrolled or persistence fails.
    pub async fn enroll_member(
        &self,
        actor: UserId,
        org_id: OrgId,
        user_id: UserId,
        role: Role,
    ) -> MembershipServiceResult<Membership> {
        let actor_role = self.effective_role(org_id, actor).await?;
        check("enroll_member", rules::validate_enrollment(actor_role, role))?;

        let membership = Membership::new(org_id, user_id, role);
        self.directory.insert(&membership).await?;
        tracing::debug!(org = %org_id, user = %user_id, role = %role, "member enrolled");
        Ok(membership)
    }

    /// Changes an existing member's role.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipServiceError::Policy`] on guard rejection,
    /// [`MembershipServiceError::MembershipNotFound`] when the target has
    /// no membership, or [`MembershipServiceError::Directory`] when
    /// persistence fails.
    pub async fn change_member_role(
        &self,
        actor: UserId,
        org_id: OrgId,
        target: UserId,
        new_role: Role,
    ) -> MembershipServiceResult<Membership> {
        let actor_role = self.effective_role(org_id, actor).await?;
        let target_membership = self.find_membership(org_id, target).await?;
        let active_admins = self.directory.active_admin_count(org_id).await?;
        check(
            "change_member_role",
            rules::validate_role_change(actor_role, &target_membership, new_role, active_admins),
        )?;

        self.directory.set_role(org_id, target, new_role).await?;
        tracing::debug!(org = %org_id, user = %target, role = %new_role, "member role changed");

        let mut updated = target_membership;
        updated.set_role(new_role);
        Ok(updated)
    }

    /// Activates or deactivates an existing membership.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipServiceError::Policy`] on guard rejection,
    /// [`MembershipServiceError::MembershipNotFound`] when the target has
    /// no membership, or [`MembershipServiceError::Directory`] when
    /// persistence fails.
    pub async fn set_member_active(
        &self,
        actor: UserId,
        org_id: OrgId,
        target: UserId,
        active: bool,
    ) -> MembershipServiceResult<Membership> {
        let actor_role = self.effective_role(org_id, actor).await?;
        let target_membership = self.find_membership(org_id, target).await?;
        let active_admins = self.directory.active_admin_count(org_id).await?;
        check(
            "set_member_active",
            rules::validate_activation_change(
                actor_role,
                actor,
                &target_membership,
                active,
                active_admins,
            ),
        )?;

        self.directory.set_active(org_id, target, active).await?;
        tracing::debug!(org = %org_id, user = %target, active, "member activation changed");

        let mut updated = target_membership;
        updated.set_active(active);
        Ok(updated)
    }

    async fn find_membership(
        &self,
        org_id: OrgId,
        user_id: UserId,
    ) -> MembershipServiceResult<Membership> {
        self.directory
            .find(org_id, user_id)
            .await?
            .ok_or(MembershipServiceError::MembershipNotFound { org_id, user_id })
    }
}

/// Logs and forwards a guard outcome.
fn check(
    operation: &'static str,
    outcome: Result<(), MemberPolicyError>,
) -> Result<(), MemberPolicyError> {
    if let Err(reason) = &outcome {
        tracing::warn!(operation, %reason, "member mutation rejected");
    }
    outcome
}
