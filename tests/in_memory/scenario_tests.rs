//! End-to-end walkthrough of a small organization.

use super::helpers::{World, world};
use chrono::{TimeDelta, Utc};
use rstest::rstest;
use workboard::org::{
    domain::{OrgId, Role, UserId},
    policy::MemberPolicyError,
    services::MembershipServiceError,
};
use workboard::task::{
    domain::ProjectId,
    schedule::{DueStatus, ScheduleConfig, classify},
    services::CreateTaskRequest,
};

/// A sole admin runs an org with one member holding an overdue task: the
/// overdue classification shows up, the member can be deactivated, and
/// the admin can neither deactivate nor demote themselves.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sole_admin_walkthrough(world: World) -> eyre::Result<()> {
    let org_id = OrgId::new();
    let admin = UserId::new();
    let member = UserId::new();
    world.members.bootstrap_admin(org_id, admin).await?;
    world
        .members
        .enroll_member(admin, org_id, member, Role::Member)
        .await?;

    let task = world
        .board
        .create_task(
            admin,
            CreateTaskRequest::new(org_id, ProjectId::new(), "Overdue deliverable")
                .with_assignee(member)
                .with_expected_finish(Utc::now() - TimeDelta::days(1)),
        )
        .await?;

    let now = Utc::now();
    eyre::ensure!(classify(&task, &now, &ScheduleConfig::default()) == DueStatus::Overdue);

    world
        .members
        .set_member_active(admin, org_id, member, false)
        .await?;

    let self_deactivation = world
        .members
        .set_member_active(admin, org_id, admin, false)
        .await;
    eyre::ensure!(matches!(
        self_deactivation,
        Err(MembershipServiceError::Policy(
            MemberPolicyError::SelfDeactivation
        ))
    ));

    let self_demotion = world
        .members
        .change_member_role(admin, org_id, admin, Role::Member)
        .await;
    eyre::ensure!(matches!(
        self_demotion,
        Err(MembershipServiceError::Policy(
            MemberPolicyError::SoleAdminDemotion
        ))
    ));
    Ok(())
}
