//! In-memory integration tests for membership management flows.

use super::helpers::{World, bootstrap_org, world};
use rstest::rstest;
use workboard::org::{
    domain::{Role, UserId},
    policy::MemberPolicyError,
    services::MembershipServiceError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn enrolled_members_can_be_promoted_and_manage_in_turn(world: World) -> eyre::Result<()> {
    let (org_id, admin, member) = bootstrap_org(&world).await?;

    world
        .members
        .change_member_role(admin, org_id, member, Role::Manager)
        .await?;

    // The freshly promoted manager can now enroll members themselves.
    let newcomer = UserId::new();
    world
        .members
        .enroll_member(member, org_id, newcomer, Role::Member)
        .await?;

    let resolved = world.members.effective_role(org_id, newcomer).await?;
    eyre::ensure!(resolved == Some(Role::Member));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivated_members_lose_access_until_reactivated(world: World) -> eyre::Result<()> {
    let (org_id, admin, member) = bootstrap_org(&world).await?;

    world
        .members
        .set_member_active(admin, org_id, member, false)
        .await?;
    eyre::ensure!(
        world
            .members
            .effective_role(org_id, member)
            .await?
            .is_none()
    );

    world
        .members
        .set_member_active(admin, org_id, member, true)
        .await?;
    eyre::ensure!(
        world.members.effective_role(org_id, member).await? == Some(Role::Member)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_admin_surface_never_mints_new_admins(world: World) -> eyre::Result<()> {
    let (org_id, admin, member) = bootstrap_org(&world).await?;

    let enroll = world
        .members
        .enroll_member(admin, org_id, UserId::new(), Role::Admin)
        .await;
    let promote = world
        .members
        .change_member_role(admin, org_id, member, Role::Admin)
        .await;

    for result in [enroll, promote] {
        eyre::ensure!(matches!(
            result,
            Err(MembershipServiceError::Policy(
                MemberPolicyError::AdminElevationBlocked
            ))
        ));
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn organizations_never_lose_their_last_admin(world: World) -> eyre::Result<()> {
    let (org_id, admin, member) = bootstrap_org(&world).await?;
    world
        .members
        .change_member_role(admin, org_id, member, Role::Manager)
        .await?;

    let demotion = world
        .members
        .change_member_role(member, org_id, admin, Role::Member)
        .await;
    let deactivation = world
        .members
        .set_member_active(member, org_id, admin, false)
        .await;

    eyre::ensure!(matches!(
        demotion,
        Err(MembershipServiceError::Policy(
            MemberPolicyError::SoleAdminDemotion
        ))
    ));
    eyre::ensure!(matches!(
        deactivation,
        Err(MembershipServiceError::Policy(
            MemberPolicyError::SoleAdminDeactivation
        ))
    ));

    // The admin keeps working after both rejected mutations.
    let resolved = world.members.effective_role(org_id, admin).await?;
    eyre::ensure!(resolved == Some(Role::Admin));
    Ok(())
}
