//! Role privilege order and effective-role resolution.

use super::{Membership, ParseRoleError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission level of a membership within one organization.
///
/// Variants are declared in ascending privilege order so the derived
/// [`Ord`] gives `Member < Manager < Admin`; precedence decisions compare
/// roles rather than enumerate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular member; sees and works only their own assignments.
    Member,
    /// Manager; may administer members and tasks.
    Manager,
    /// Admin; highest privilege level.
    Admin,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Returns whether this role administers members and tasks.
    #[must_use]
    pub const fn is_supervisor(self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "member" => Ok(Self::Member),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolves a user's effective role from their memberships in one
/// organization.
///
/// Inactive memberships are ignored. Returns the highest-privilege role
/// among the remaining entries, or `None` when no active membership
/// exists. Callers must treat `None` as "not authorized", a distinct
/// condition from [`Role::Member`].
#[must_use]
pub fn effective_role(memberships: &[Membership]) -> Option<Role> {
    memberships
        .iter()
        .filter(|membership| membership.is_active())
        .map(Membership::role)
        .max()
}
