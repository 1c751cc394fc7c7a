//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workboard::org::{
    adapters::memory::InMemoryMembershipDirectory,
    domain::{OrgId, Role, UserId},
    services::MembershipService,
};
use workboard::task::{
    adapters::memory::{InMemoryReplyRepository, InMemoryTaskRepository},
    services::TaskBoardService,
};

/// Membership service over the in-memory directory.
pub type Members = MembershipService<InMemoryMembershipDirectory>;

/// Task board service over the in-memory adapters.
pub type Board = TaskBoardService<
    InMemoryTaskRepository,
    InMemoryReplyRepository,
    InMemoryMembershipDirectory,
    DefaultClock,
>;

/// Both services wired over one shared membership directory.
pub struct World {
    /// Membership management service.
    pub members: Members,
    /// Task board service.
    pub board: Board,
}

/// Provides a fresh world for each test.
#[fixture]
pub fn world() -> World {
    let directory = Arc::new(InMemoryMembershipDirectory::new());
    let members = MembershipService::new(Arc::clone(&directory));
    let board = TaskBoardService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(InMemoryReplyRepository::new()),
        directory,
        Arc::new(DefaultClock),
    );
    World { members, board }
}

/// Bootstraps an organization with an admin and one enrolled member.
///
/// # Errors
///
/// Returns an error if bootstrap or enrollment fails.
pub async fn bootstrap_org(world: &World) -> eyre::Result<(OrgId, UserId, UserId)> {
    let org_id = OrgId::new();
    let admin = UserId::new();
    let member = UserId::new();
    world.members.bootstrap_admin(org_id, admin).await?;
    world
        .members
        .enroll_member(admin, org_id, member, Role::Member)
        .await?;
    Ok((org_id, admin, member))
}
