//! Membership aggregate linking a user to an organization.

use super::{OrgId, Role, UserId};
use serde::{Deserialize, Serialize};

/// A user's membership in one organization.
///
/// There is at most one membership per (organization, user) pair; adapters
/// enforce the uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    org_id: OrgId,
    user_id: UserId,
    role: Role,
    is_active: bool,
}

impl Membership {
    /// Creates an active membership with the given role.
    #[must_use]
    pub const fn new(org_id: OrgId, user_id: UserId, role: Role) -> Self {
        Self {
            org_id,
            user_id,
            role,
            is_active: true,
        }
    }

    /// Reconstructs a membership from persisted storage.
    #[must_use]
    pub const fn from_persisted(org_id: OrgId, user_id: UserId, role: Role, is_active: bool) -> Self {
        Self {
            org_id,
            user_id,
            role,
            is_active,
        }
    }

    /// Returns the organization this membership belongs to.
    #[must_use]
    pub const fn org_id(&self) -> OrgId {
        self.org_id
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the membership role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns whether the membership is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns whether this membership is an active admin seat.
    #[must_use]
    pub const fn is_active_admin(&self) -> bool {
        self.is_active && matches!(self.role, Role::Admin)
    }

    /// Replaces the membership role.
    pub const fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Activates or deactivates the membership.
    pub const fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}
