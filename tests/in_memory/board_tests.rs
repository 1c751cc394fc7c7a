//! In-memory integration tests for the task board workflow.

use super::helpers::{World, bootstrap_org, world};
use chrono::{TimeDelta, Utc};
use rstest::rstest;
use workboard::task::{
    domain::{ProjectId, TaskStatus},
    policy::TaskPolicyError,
    services::{CreateTaskRequest, TaskBoardError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_scoping_spans_both_services(world: World) -> eyre::Result<()> {
    let (org_id, admin, member) = bootstrap_org(&world).await?;
    let project_id = ProjectId::new();

    world
        .board
        .create_task(
            admin,
            CreateTaskRequest::new(org_id, project_id, "Member's task").with_assignee(member),
        )
        .await?;
    world
        .board
        .create_task(
            admin,
            CreateTaskRequest::new(org_id, project_id, "Backlog item nobody owns yet"),
        )
        .await?;

    let member_view = world.board.list_tasks(member, org_id).await?;
    eyre::ensure!(member_view.len() == 1);

    // Deactivation revokes task visibility through the shared directory.
    world
        .members
        .set_member_active(admin, org_id, member, false)
        .await?;
    let revoked = world.board.list_tasks(member, org_id).await;
    eyre::ensure!(matches!(
        revoked,
        Err(TaskBoardError::Policy(TaskPolicyError::NotAMember))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reply_workflow_moves_a_task_through_its_lifecycle(world: World) -> eyre::Result<()> {
    let (org_id, admin, member) = bootstrap_org(&world).await?;
    let task = world
        .board
        .create_task(
            admin,
            CreateTaskRequest::new(org_id, ProjectId::new(), "Deliver the audit summary")
                .with_assignee(member)
                .with_expected_finish(Utc::now() + TimeDelta::days(2)),
        )
        .await?;

    world
        .board
        .add_reply(
            member,
            task.id(),
            "started collecting figures",
            Some(TaskStatus::InProgress),
        )
        .await?;
    world
        .board
        .add_reply(member, task.id(), "summary sent for review", Some(TaskStatus::Done))
        .await?;

    let replies = world.board.list_replies(admin, task.id()).await?;
    eyre::ensure!(replies.len() == 2);
    eyre::ensure!(replies.iter().all(|reply| reply.author() == member));

    let report = world.board.completion_report(admin, org_id).await?;
    eyre::ensure!(report.iter().map(|entry| entry.completed).sum::<usize>() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_lanes_follow_supervisor_schedule_changes(world: World) -> eyre::Result<()> {
    let (org_id, admin, member) = bootstrap_org(&world).await?;
    let task = world
        .board
        .create_task(
            admin,
            CreateTaskRequest::new(org_id, ProjectId::new(), "Slipping deliverable")
                .with_assignee(member),
        )
        .await?;

    // Unscheduled tasks sit outside every due lane.
    let board = world.board.schedule_board(admin, org_id).await?;
    eyre::ensure!(board.overdue().is_empty() && board.due_today().is_empty());

    world
        .board
        .set_expected_finish(admin, task.id(), Some(Utc::now() - TimeDelta::days(2)))
        .await?;
    let slipped = world.board.schedule_board(admin, org_id).await?;
    eyre::ensure!(slipped.overdue().len() == 1);

    // Completion clears every due-date alarm.
    world
        .board
        .update_status(member, task.id(), TaskStatus::Done)
        .await?;
    let finished = world.board.schedule_board(admin, org_id).await?;
    eyre::ensure!(finished.overdue().is_empty());
    eyre::ensure!(finished.completed().len() == 1);
    Ok(())
}
