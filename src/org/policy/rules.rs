//! Individual member-management guard implementations.
//!
//! Each guard is a pure function over directory-held facts (the actor's
//! effective role, the target membership, the active-admin count). Guards
//! return `Ok(())` when the mutation may proceed or a specific
//! [`MemberPolicyError`] carrying the reason to report to the end user.

use crate::org::domain::{Membership, Role, UserId};
use thiserror::Error;

/// Rejection reasons for member-management mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MemberPolicyError {
    /// The actor holds no active membership in the organization.
    #[error("actor is not an active member of the organization")]
    NotAMember,

    /// The actor's role does not permit member management.
    #[error("managing members requires the admin or manager role")]
    SupervisorRequired,

    /// Admin elevation is excluded from the member-management surface.
    #[error("members cannot be promoted to admin from member management")]
    AdminElevationBlocked,

    /// The target is the only active admin and would lose the role.
    #[error("cannot demote the only active admin")]
    SoleAdminDemotion,

    /// The target is the only active admin and would be deactivated.
    #[error("cannot deactivate the only active admin")]
    SoleAdminDeactivation,

    /// The actor attempted to deactivate their own membership.
    #[error("cannot deactivate your own membership")]
    SelfDeactivation,

    /// The organization already has members, so bootstrap is closed.
    #[error("organization already has members")]
    OrganizationNotEmpty,
}

/// Validates that the first-admin bootstrap path is still open.
///
/// # Errors
///
/// Returns [`MemberPolicyError::OrganizationNotEmpty`] once any membership
/// exists.
pub const fn validate_bootstrap(member_count: usize) -> Result<(), MemberPolicyError> {
    if member_count > 0 {
        return Err(MemberPolicyError::OrganizationNotEmpty);
    }
    Ok(())
}

/// Validates enrolling a new member at the given role.
///
/// # Errors
///
/// Returns [`MemberPolicyError::NotAMember`] or
/// [`MemberPolicyError::SupervisorRequired`] when the actor may not manage
/// members, and [`MemberPolicyError::AdminElevationBlocked`] when the new
/// member would be enrolled as admin.
pub fn validate_enrollment(
    actor_role: Option<Role>,
    new_role: Role,
) -> Result<(), MemberPolicyError> {
    require_supervisor(actor_role)?;
    reject_admin_elevation(new_role)
}

/// Validates changing an existing member's role.
///
/// Elevation to admin is rejected outright, so the sole-admin guard only
/// ever sees demotions.
///
/// # Errors
///
/// Returns [`MemberPolicyError::NotAMember`] or
/// [`MemberPolicyError::SupervisorRequired`] when the actor may not manage
/// members, [`MemberPolicyError::AdminElevationBlocked`] when the new role
/// is admin, and [`MemberPolicyError::SoleAdminDemotion`] when the target
/// is the organization's only active admin.
pub fn validate_role_change(
    actor_role: Option<Role>,
    target: &Membership,
    new_role: Role,
    active_admin_count: usize,
) -> Result<(), MemberPolicyError> {
    require_supervisor(actor_role)?;
    reject_admin_elevation(new_role)?;
    if is_sole_active_admin(target, active_admin_count) {
        return Err(MemberPolicyError::SoleAdminDemotion);
    }
    Ok(())
}

/// Validates toggling a membership's active flag.
///
/// Reactivation carries no guard beyond the actor check.
///
/// # Errors
///
/// Returns [`MemberPolicyError::NotAMember`] or
/// [`MemberPolicyError::SupervisorRequired`] when the actor may not manage
/// members, [`MemberPolicyError::SelfDeactivation`] when the actor targets
/// their own membership, and [`MemberPolicyError::SoleAdminDeactivation`]
/// when the target is the organization's only active admin.
pub fn validate_activation_change(
    actor_role: Option<Role>,
    actor: UserId,
    target: &Membership,
    make_active: bool,
    active_admin_count: usize,
) -> Result<(), MemberPolicyError> {
    require_supervisor(actor_role)?;
    if make_active {
        return Ok(());
    }
    if target.user_id() == actor {
        return Err(MemberPolicyError::SelfDeactivation);
    }
    if is_sole_active_admin(target, active_admin_count) {
        return Err(MemberPolicyError::SoleAdminDeactivation);
    }
    Ok(())
}

fn require_supervisor(actor_role: Option<Role>) -> Result<Role, MemberPolicyError> {
    let role = actor_role.ok_or(MemberPolicyError::NotAMember)?;
    if !role.is_supervisor() {
        return Err(MemberPolicyError::SupervisorRequired);
    }
    Ok(role)
}

const fn reject_admin_elevation(new_role: Role) -> Result<(), MemberPolicyError> {
    if matches!(new_role, Role::Admin) {
        return Err(MemberPolicyError::AdminElevationBlocked);
    }
    Ok(())
}

fn is_sole_active_admin(target: &Membership, active_admin_count: usize) -> bool {
    target.is_active_admin() && active_admin_count <= 1
}
