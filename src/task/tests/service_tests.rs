//! Service orchestration tests for guarded task board operations.

use std::sync::Arc;

use crate::org::{
    adapters::memory::InMemoryMembershipDirectory,
    domain::{Membership, OrgId, Role, UserId},
    ports::MembershipDirectory,
};
use crate::task::{
    adapters::memory::{InMemoryProjectCatalog, InMemoryReplyRepository, InMemoryTaskRepository},
    domain::{ProjectId, TaskId, TaskStatus},
    policy::TaskPolicyError,
    ports::{CatalogError, CatalogResult, ProjectCatalog},
    services::{CreateTaskRequest, ProjectNameResolver, TaskBoardError, TaskBoardService},
};
use chrono::{TimeDelta, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = TaskBoardService<
    InMemoryTaskRepository,
    InMemoryReplyRepository,
    InMemoryMembershipDirectory,
    DefaultClock,
>;

struct Harness {
    directory: Arc<InMemoryMembershipDirectory>,
    service: TestService,
}

struct Seed {
    org_id: OrgId,
    manager: UserId,
    member: UserId,
}

#[fixture]
fn harness() -> Harness {
    let directory = Arc::new(InMemoryMembershipDirectory::new());
    let service = TaskBoardService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(InMemoryReplyRepository::new()),
        Arc::clone(&directory),
        Arc::new(DefaultClock),
    );
    Harness { directory, service }
}

async fn seeded_org(harness: &Harness) -> eyre::Result<Seed> {
    let org_id = OrgId::new();
    let manager = UserId::new();
    let member = UserId::new();
    harness
        .directory
        .insert(&Membership::new(org_id, manager, Role::Manager))
        .await?;
    harness
        .directory
        .insert(&Membership::new(org_id, member, Role::Member))
        .await?;
    Ok(Seed {
        org_id,
        manager,
        member,
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn supervisor_creates_an_assigned_task(harness: Harness) -> eyre::Result<()> {
    let seed = seeded_org(&harness).await?;
    let expected_finish = Utc::now() + TimeDelta::days(3);

    let task = harness
        .service
        .create_task(
            seed.manager,
            CreateTaskRequest::new(seed.org_id, ProjectId::new(), "Prepare onboarding deck")
                .with_assignee(seed.member)
                .with_expected_finish(expected_finish),
        )
        .await?;

    eyre::ensure!(task.status() == TaskStatus::Todo);
    eyre::ensure!(task.is_assigned_to(seed.member));
    eyre::ensure!(task.expected_finish() == Some(expected_finish));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_cannot_create_tasks(harness: Harness) -> eyre::Result<()> {
    let seed = seeded_org(&harness).await?;

    let result = harness
        .service
        .create_task(
            seed.member,
            CreateTaskRequest::new(seed.org_id, ProjectId::new(), "Unauthorized task"),
        )
        .await;

    eyre::ensure!(matches!(
        result,
        Err(TaskBoardError::Policy(TaskPolicyError::SupervisorRequired))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_is_scoped_by_role(harness: Harness) -> eyre::Result<()> {
    let seed = seeded_org(&harness).await?;
    harness
        .service
        .create_task(
            seed.manager,
            CreateTaskRequest::new(seed.org_id, ProjectId::new(), "Assigned to the member")
                .with_assignee(seed.member),
        )
        .await?;
    harness
        .service
        .create_task(
            seed.manager,
            CreateTaskRequest::new(seed.org_id, ProjectId::new(), "Unassigned backlog item"),
        )
        .await?;

    let member_view = harness.service.list_tasks(seed.member, seed.org_id).await?;
    let manager_view = harness
        .service
        .list_tasks(seed.manager, seed.org_id)
        .await?;

    eyre::ensure!(member_view.len() == 1);
    eyre::ensure!(
        member_view
            .iter()
            .all(|task| task.is_assigned_to(seed.member))
    );
    eyre::ensure!(manager_view.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_member_cannot_list_tasks(harness: Harness) -> eyre::Result<()> {
    let seed = seeded_org(&harness).await?;

    let result = harness.service.list_tasks(UserId::new(), seed.org_id).await;

    eyre::ensure!(matches!(
        result,
        Err(TaskBoardError::Policy(TaskPolicyError::NotAMember))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_moves_their_task_to_done(harness: Harness) -> eyre::Result<()> {
    let seed = seeded_org(&harness).await?;
    let task = harness
        .service
        .create_task(
            seed.manager,
            CreateTaskRequest::new(seed.org_id, ProjectId::new(), "Close out sprint items")
                .with_assignee(seed.member),
        )
        .await?;

    harness
        .service
        .update_status(seed.member, task.id(), TaskStatus::InProgress)
        .await?;
    let finished = harness
        .service
        .update_status(seed.member, task.id(), TaskStatus::Done)
        .await?;

    eyre::ensure!(finished.status() == TaskStatus::Done);
    eyre::ensure!(finished.completed_at().is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unrelated_member_cannot_change_status(harness: Harness) -> eyre::Result<()> {
    let seed = seeded_org(&harness).await?;
    let outsider = UserId::new();
    harness
        .directory
        .insert(&Membership::new(seed.org_id, outsider, Role::Member))
        .await?;
    let task = harness
        .service
        .create_task(
            seed.manager,
            CreateTaskRequest::new(seed.org_id, ProjectId::new(), "Guarded status change")
                .with_assignee(seed.member),
        )
        .await?;

    let result = harness
        .service
        .update_status(outsider, task.id(), TaskStatus::Done)
        .await;

    eyre::ensure!(matches!(
        result,
        Err(TaskBoardError::Policy(
            TaskPolicyError::NotAssigneeOrSupervisor
        ))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_cannot_reassign_their_own_task(harness: Harness) -> eyre::Result<()> {
    let seed = seeded_org(&harness).await?;
    let task = harness
        .service
        .create_task(
            seed.manager,
            CreateTaskRequest::new(seed.org_id, ProjectId::new(), "Reassignment guard")
                .with_assignee(seed.member),
        )
        .await?;

    let result = harness
        .service
        .reassign(seed.member, task.id(), Some(seed.manager))
        .await;

    eyre::ensure!(matches!(
        result,
        Err(TaskBoardError::Policy(TaskPolicyError::SupervisorRequired))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reply_with_carried_status_advances_the_task(harness: Harness) -> eyre::Result<()> {
    let seed = seeded_org(&harness).await?;
    let task = harness
        .service
        .create_task(
            seed.manager,
            CreateTaskRequest::new(seed.org_id, ProjectId::new(), "Reply-driven progress")
                .with_assignee(seed.member),
        )
        .await?;

    let reply = harness
        .service
        .add_reply(
            seed.member,
            task.id(),
            "picked this up this morning",
            Some(TaskStatus::InProgress),
        )
        .await?;

    eyre::ensure!(reply.new_status() == Some(TaskStatus::InProgress));
    let replies = harness.service.list_replies(seed.member, task.id()).await?;
    eyre::ensure!(replies.len() == 1);
    let reloaded = harness
        .service
        .list_tasks(seed.member, seed.org_id)
        .await?;
    eyre::ensure!(
        reloaded
            .iter()
            .all(|current| current.status() == TaskStatus::InProgress)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unrelated_member_cannot_reply(harness: Harness) -> eyre::Result<()> {
    let seed = seeded_org(&harness).await?;
    let outsider = UserId::new();
    harness
        .directory
        .insert(&Membership::new(seed.org_id, outsider, Role::Member))
        .await?;
    let task = harness
        .service
        .create_task(
            seed.manager,
            CreateTaskRequest::new(seed.org_id, ProjectId::new(), "Reply guard")
                .with_assignee(seed.member),
        )
        .await?;

    let result = harness
        .service
        .add_reply(outsider, task.id(), "drive-by comment", None)
        .await;

    eyre::ensure!(matches!(
        result,
        Err(TaskBoardError::Policy(TaskPolicyError::ReplyNotPermitted))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reply_edits_are_limited_to_author_and_supervisors(harness: Harness) -> eyre::Result<()> {
    let seed = seeded_org(&harness).await?;
    let outsider = UserId::new();
    harness
        .directory
        .insert(&Membership::new(seed.org_id, outsider, Role::Member))
        .await?;
    let task = harness
        .service
        .create_task(
            seed.manager,
            CreateTaskRequest::new(seed.org_id, ProjectId::new(), "Reply editing")
                .with_assignee(seed.member),
        )
        .await?;
    let reply = harness
        .service
        .add_reply(seed.member, task.id(), "initial note", None)
        .await?;

    let edited = harness
        .service
        .edit_reply(seed.member, reply.id(), "clarified note", None)
        .await?;
    eyre::ensure!(edited.message() == "clarified note");

    let foreign_edit = harness
        .service
        .edit_reply(outsider, reply.id(), "hijacked note", None)
        .await;
    eyre::ensure!(matches!(
        foreign_edit,
        Err(TaskBoardError::Policy(TaskPolicyError::ReplyAuthorRequired))
    ));

    harness
        .service
        .delete_reply(seed.manager, reply.id())
        .await?;
    let replies = harness.service.list_replies(seed.member, task.id()).await?;
    eyre::ensure!(replies.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_change_on_unknown_task_reports_not_found(harness: Harness) -> eyre::Result<()> {
    let seed = seeded_org(&harness).await?;

    let result = harness
        .service
        .update_status(seed.manager, TaskId::new(), TaskStatus::Done)
        .await;

    eyre::ensure!(matches!(result, Err(TaskBoardError::TaskNotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn schedule_board_reflects_visible_tasks(harness: Harness) -> eyre::Result<()> {
    let seed = seeded_org(&harness).await?;
    let task = harness
        .service
        .create_task(
            seed.manager,
            CreateTaskRequest::new(seed.org_id, ProjectId::new(), "Late deliverable")
                .with_assignee(seed.member)
                .with_expected_finish(Utc::now() - TimeDelta::days(1)),
        )
        .await?;

    let board = harness
        .service
        .schedule_board(seed.member, seed.org_id)
        .await?;

    eyre::ensure!(board.overdue().len() == 1);
    eyre::ensure!(
        board
            .overdue()
            .first()
            .is_some_and(|entry| entry.id() == task.id())
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_report_counts_finished_work(harness: Harness) -> eyre::Result<()> {
    let seed = seeded_org(&harness).await?;
    let task = harness
        .service
        .create_task(
            seed.manager,
            CreateTaskRequest::new(seed.org_id, ProjectId::new(), "Finish and report")
                .with_assignee(seed.member),
        )
        .await?;
    harness
        .service
        .update_status(seed.member, task.id(), TaskStatus::Done)
        .await?;

    let report = harness
        .service
        .completion_report(seed.manager, seed.org_id)
        .await?;

    eyre::ensure!(report.len() == 1);
    eyre::ensure!(report.iter().all(|entry| entry.completed == 1));
    Ok(())
}

// ── Project display-name resolution ─────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolver_prefers_the_catalog_name() -> eyre::Result<()> {
    let catalog = Arc::new(InMemoryProjectCatalog::new());
    let project_id = ProjectId::new();
    catalog.register(project_id, "Website Relaunch")?;
    let mut resolver = ProjectNameResolver::new(catalog);

    let name = resolver.display_name(project_id).await;

    eyre::ensure!(name == "Website Relaunch");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolver_falls_back_to_the_identifier_and_memoizes() -> eyre::Result<()> {
    let catalog = Arc::new(InMemoryProjectCatalog::new());
    let project_id = ProjectId::new();
    let mut resolver = ProjectNameResolver::new(Arc::clone(&catalog));

    let fallback = resolver.display_name(project_id).await;
    eyre::ensure!(fallback == project_id.to_string());

    // A name registered after the first lookup does not replace the
    // memoized resolution.
    catalog.register(project_id, "Late Arrival")?;
    let memoized = resolver.display_name(project_id).await;
    eyre::ensure!(memoized == project_id.to_string());
    Ok(())
}

mockall::mock! {
    Catalog {}

    #[async_trait::async_trait]
    impl ProjectCatalog for Catalog {
        async fn project_name(&self, project_id: ProjectId) -> CatalogResult<Option<String>>;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolver_swallows_catalog_failures() {
    let mut catalog = MockCatalog::new();
    catalog.expect_project_name().returning(|_| {
        Err(CatalogError::persistence(std::io::Error::other(
            "catalog offline",
        )))
    });
    let project_id = ProjectId::new();
    let mut resolver = ProjectNameResolver::new(Arc::new(catalog));

    let name = resolver.display_name(project_id).await;

    assert_eq!(name, project_id.to_string());
}
