//! Task and evidence persistence against `PostgreSQL`.
//!
//! `PostgreSQL` keeps microsecond timestamps, so assertions compare
//! identifiers and fields rather than whole aggregates.

use super::helpers::{BoxError, Seeded, with_seeded};
use compliance_tracker::task::{
    domain::{
        Evidence, EvidenceId, EvidenceType, NewEvidence, NewTask, Pagination, Task, TaskCategory,
        TaskChanges, TaskId, TaskListQuery, TaskName, TaskPatch, TaskStatus,
    },
    ports::{EvidenceRepository, TaskRepository, TaskRepositoryError},
};
use compliance_tracker::tenancy::domain::{ControlId, OrganizationId};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

fn new_task(ctx: &Seeded, name: &str, description: Option<&str>) -> Result<Task, BoxError> {
    Ok(Task::new(
        NewTask {
            organization_id: ctx.organization_id,
            control_id: ctx.control_id,
            name: TaskName::new(name)?,
            description: description.map(str::to_owned),
            category: TaskCategory::Technical,
            status: None,
        },
        &DefaultClock,
    ))
}

fn new_evidence(task_id: TaskId, evidence_type: EvidenceType) -> Evidence {
    Evidence::new(
        NewEvidence {
            task_id,
            evidence_type,
            note: Some("exported from console".to_owned()),
        },
        &DefaultClock,
    )
}

fn changes(patch: TaskPatch) -> Result<TaskChanges, BoxError> {
    Ok(patch.into_changes(&DefaultClock)?)
}

#[rstest]
fn stored_task_is_visible_only_to_its_organization(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    with_seeded(shared_test_cluster, |ctx| async move {
        let task = new_task(&ctx, "Harden SSH", Some("Disable password logins"))?;
        ctx.tasks.store(&task).await?;

        let found = ctx
            .tasks
            .find_in_organization(ctx.organization_id, task.id())
            .await?
            .ok_or("task should be found")?;
        assert_eq!(found.id(), task.id());
        assert_eq!(found.name(), task.name());
        assert_eq!(found.description(), Some("Disable password logins"));
        assert_eq!(found.status(), TaskStatus::Open);
        assert_eq!(found.category(), TaskCategory::Technical);

        let foreign = ctx
            .tasks
            .find_in_organization(OrganizationId::new(), task.id())
            .await?;
        assert!(foreign.is_none());
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn duplicate_task_identifier_is_rejected(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    with_seeded(shared_test_cluster, |ctx| async move {
        let task = new_task(&ctx, "Harden SSH", None)?;
        ctx.tasks.store(&task).await?;

        let result = ctx.tasks.store(&task).await;

        assert!(matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn task_for_unknown_control_is_control_not_found(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    with_seeded(shared_test_cluster, |ctx| async move {
        let missing = ControlId::new();
        let task = Task::new(
            NewTask {
                organization_id: ctx.organization_id,
                control_id: missing,
                name: TaskName::new("Harden SSH")?,
                description: None,
                category: TaskCategory::Technical,
                status: None,
            },
            &DefaultClock,
        );

        let result = ctx.tasks.store(&task).await;

        assert!(matches!(result, Err(TaskRepositoryError::ControlNotFound(id)) if id == missing));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn update_writes_patched_fields_within_scope(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    with_seeded(shared_test_cluster, |ctx| async move {
        let task = new_task(&ctx, "Harden SSH", Some("draft"))?;
        ctx.tasks.store(&task).await?;

        let updated = ctx
            .tasks
            .update(
                ctx.organization_id,
                task.id(),
                &changes(TaskPatch {
                    description: Some(None),
                    status: Some(TaskStatus::InProgress),
                    ..TaskPatch::default()
                })?,
            )
            .await?;
        assert_eq!(updated.status(), TaskStatus::InProgress);
        assert_eq!(updated.description(), None);
        assert_eq!(updated.name().as_str(), "Harden SSH");

        let foreign = ctx
            .tasks
            .update(
                OrganizationId::new(),
                task.id(),
                &changes(TaskPatch {
                    status: Some(TaskStatus::Done),
                    ..TaskPatch::default()
                })?,
            )
            .await;
        assert!(matches!(foreign, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));

        let stored = ctx
            .tasks
            .find_in_organization(ctx.organization_id, task.id())
            .await?
            .ok_or("task should be found")?;
        assert_eq!(stored.status(), TaskStatus::InProgress);
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn updates_computed_from_the_same_read_keep_each_other(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    with_seeded(shared_test_cluster, |ctx| async move {
        let task = new_task(&ctx, "Original", Some("Keep me"))?;
        ctx.tasks.store(&task).await?;
        let close = changes(TaskPatch {
            status: Some(TaskStatus::Done),
            ..TaskPatch::default()
        })?;
        let rename = changes(TaskPatch {
            name: Some("Renamed".to_owned()),
            ..TaskPatch::default()
        })?;

        ctx.tasks
            .update(ctx.organization_id, task.id(), &close)
            .await?;
        let last = ctx
            .tasks
            .update(ctx.organization_id, task.id(), &rename)
            .await?;

        assert_eq!(last.name().as_str(), "Renamed");
        assert_eq!(last.status(), TaskStatus::Done);
        assert_eq!(last.description(), Some("Keep me"));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn update_to_unknown_control_is_control_not_found(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    with_seeded(shared_test_cluster, |ctx| async move {
        let task = new_task(&ctx, "Harden SSH", None)?;
        ctx.tasks.store(&task).await?;
        let missing = ControlId::new();

        let result = ctx
            .tasks
            .update(
                ctx.organization_id,
                task.id(),
                &changes(TaskPatch {
                    control_id: Some(missing),
                    ..TaskPatch::default()
                })?,
            )
            .await;

        assert!(matches!(result, Err(TaskRepositoryError::ControlNotFound(id)) if id == missing));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn list_filters_counts_and_orders_newest_first(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    with_seeded(shared_test_cluster, |ctx| async move {
        for (name, description) in [
            ("Rotate keys", None),
            ("Review 100% of accounts", Some("quarterly")),
            ("Patch servers", Some("Apply CRITICAL fixes")),
        ] {
            ctx.tasks.store(&new_task(&ctx, name, description)?).await?;
        }

        let everything = ctx
            .tasks
            .list(ctx.organization_id, &TaskListQuery::default())
            .await?;
        let names: Vec<&str> = everything
            .items
            .iter()
            .map(|task| task.name().as_str())
            .collect();
        assert_eq!(everything.total, 3);
        assert_eq!(
            names,
            ["Patch servers", "Review 100% of accounts", "Rotate keys"]
        );

        let page = ctx
            .tasks
            .list(
                ctx.organization_id,
                &TaskListQuery::new(Pagination::clamped(Some(1), Some(1))),
            )
            .await?;
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);

        let by_description = ctx
            .tasks
            .list(
                ctx.organization_id,
                &TaskListQuery::default().with_search("critical"),
            )
            .await?;
        assert_eq!(by_description.total, 1);

        let literal_percent = ctx
            .tasks
            .list(ctx.organization_id, &TaskListQuery::default().with_search("0%"))
            .await?;
        assert_eq!(literal_percent.total, 1);

        let wildcard_only = ctx
            .tasks
            .list(ctx.organization_id, &TaskListQuery::default().with_search("_"))
            .await?;
        assert_eq!(wildcard_only.total, 0);

        let by_status = ctx
            .tasks
            .list(
                ctx.organization_id,
                &TaskListQuery::default()
                    .with_status(TaskStatus::Done)
                    .with_category(TaskCategory::Technical),
            )
            .await?;
        assert_eq!(by_status.total, 0);
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn evidence_is_scoped_through_its_task_and_cascades(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    with_seeded(shared_test_cluster, |ctx| async move {
        let task = new_task(&ctx, "Harden SSH", None)?;
        ctx.tasks.store(&task).await?;
        let first = new_evidence(task.id(), EvidenceType::Screenshot);
        let second = new_evidence(task.id(), EvidenceType::Log);
        ctx.tasks.store_evidence(&first).await?;
        ctx.tasks.store_evidence(&second).await?;

        let listed: Vec<EvidenceId> = ctx
            .tasks
            .list_for_task(task.id())
            .await?
            .iter()
            .map(Evidence::id)
            .collect();
        assert_eq!(listed, vec![first.id(), second.id()]);

        let scoped = ctx
            .tasks
            .find_in_scope(ctx.organization_id, task.id(), first.id())
            .await?;
        assert_eq!(
            scoped.map(|item| item.evidence_type()),
            Some(EvidenceType::Screenshot)
        );
        let foreign = ctx
            .tasks
            .find_in_scope(OrganizationId::new(), task.id(), first.id())
            .await?;
        assert!(foreign.is_none());
        let wrong_task = ctx
            .tasks
            .find_in_scope(ctx.organization_id, TaskId::new(), first.id())
            .await?;
        assert!(wrong_task.is_none());

        assert!(ctx.tasks.delete_evidence(first.id()).await?);
        assert!(!ctx.tasks.delete_evidence(first.id()).await?);

        assert!(
            ctx.tasks
                .delete_in_organization(ctx.organization_id, task.id())
                .await?
        );
        assert!(ctx.tasks.list_for_task(task.id()).await?.is_empty());
        assert!(
            !ctx.tasks
                .delete_in_organization(ctx.organization_id, task.id())
                .await?
        );
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn evidence_for_missing_task_is_not_found(
    shared_test_cluster: &'static TestCluster,
) -> Result<(), BoxError> {
    with_seeded(shared_test_cluster, |ctx| async move {
        let orphan = new_evidence(TaskId::new(), EvidenceType::Document);

        let result = ctx.tasks.store_evidence(&orphan).await;

        assert!(matches!(result, Err(TaskRepositoryError::NotFound(_))));
        Ok::<(), BoxError>(())
    })
}
