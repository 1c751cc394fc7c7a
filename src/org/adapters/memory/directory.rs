//! In-memory membership directory for tests and standalone use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::org::{
    domain::{Membership, OrgId, Role, UserId},
    ports::{DirectoryError, DirectoryResult, MembershipDirectory},
};

/// Thread-safe in-memory membership directory.
///
/// Enforces the one-membership-per-(organization, user) invariant via its
/// key structure.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    memberships: HashMap<(OrgId, UserId), Membership>,
}

impl InMemoryMembershipDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> DirectoryError {
    DirectoryError::persistence(std::io::Error::other(err.to_string()))
}

fn update_membership(
    state: &mut DirectoryState,
    org_id: OrgId,
    user_id: UserId,
    apply: impl FnOnce(&mut Membership),
) -> DirectoryResult<()> {
    let membership = state
        .memberships
        .get_mut(&(org_id, user_id))
        .ok_or(DirectoryError::NotFound { org_id, user_id })?;
    apply(membership);
    Ok(())
}

#[async_trait]
impl MembershipDirectory for InMemoryMembershipDirectory {
    async fn active_memberships(
        &self,
        org_id: OrgId,
        user_id: UserId,
    ) -> DirectoryResult<Vec<Membership>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .memberships
            .get(&(org_id, user_id))
            .filter(|membership| membership.is_active())
            .cloned()
            .into_iter()
            .collect())
    }

    async fn find(&self, org_id: OrgId, user_id: UserId) -> DirectoryResult<Option<Membership>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.memberships.get(&(org_id, user_id)).cloned())
    }

    async fn insert(&self, membership: &Membership) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let key = (membership.org_id(), membership.user_id());
        if state.memberships.contains_key(&key) {
            return Err(DirectoryError::DuplicateMembership {
                org_id: membership.org_id(),
                user_id: membership.user_id(),
            });
        }
        state.memberships.insert(key, membership.clone());
        Ok(())
    }

    async fn set_role(&self, org_id: OrgId, user_id: UserId, role: Role) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        update_membership(&mut state, org_id, user_id, |membership| {
            membership.set_role(role);
        })
    }

    async fn set_active(
        &self,
        org_id: OrgId,
        user_id: UserId,
        active: bool,
    ) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        update_membership(&mut state, org_id, user_id, |membership| {
            membership.set_active(active);
        })
    }

    async fn active_admin_count(&self, org_id: OrgId) -> DirectoryResult<usize> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .memberships
            .values()
            .filter(|membership| membership.org_id() == org_id && membership.is_active_admin())
            .count())
    }

    async fn member_count(&self, org_id: OrgId) -> DirectoryResult<usize> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .memberships
            .values()
            .filter(|membership| membership.org_id() == org_id)
            .count())
    }
}
