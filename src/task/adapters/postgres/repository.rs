//! `PostgreSQL` repository implementation for task and evidence storage.

use super::{
    models::{EvidenceRow, TaskChangeset, TaskRow},
    schema::{evidence, tasks},
};
use crate::task::{
    domain::{
        Evidence, EvidenceId, EvidenceType, NewEvidence, PersistedTaskData, Task, TaskCategory,
        TaskChanges, TaskId, TaskListQuery, TaskName, TaskStatus,
    },
    ports::{
        EvidenceRepository, TaskPage, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
    },
};
use crate::tenancy::domain::{ControlId, OrganizationId};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task and evidence repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let control_id = task.control_id();
        let row = to_row(task);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::ControlNotFound(control_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        organization_id: OrganizationId,
        id: TaskId,
        changes: &TaskChanges,
    ) -> TaskRepositoryResult<Task> {
        let new_control = changes.control_id;
        let changeset = TaskChangeset {
            control_id: new_control.map(ControlId::into_inner),
            name: changes.name.as_ref().map(|name| name.as_str().to_owned()),
            description: changes.description.clone(),
            category: changes.category.map(|category| category.as_str().to_owned()),
            status: changes.status.map(|status| status.as_str().to_owned()),
            updated_at: changes.updated_at,
        };
        self.run_blocking(move |connection| {
            let row = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::organization_id.eq(organization_id.into_inner())),
            )
            .set(&changeset)
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(|err| match (err, new_control) {
                (
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _),
                    Some(control_id),
                ) => TaskRepositoryError::ControlNotFound(control_id),
                (other, _) => TaskRepositoryError::persistence(other),
            })?;
            row.map(row_to_task)
                .transpose()?
                .ok_or(TaskRepositoryError::NotFound(id))
        })
        .await
    }

    async fn find_in_organization(
        &self,
        organization_id: OrganizationId,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::organization_id.eq(organization_id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(
        &self,
        organization_id: OrganizationId,
        query: &TaskListQuery,
    ) -> TaskRepositoryResult<TaskPage> {
        let owner = organization_id.into_inner();
        let pagination = query.pagination();
        let limit = i64::from(pagination.limit());
        let offset = i64::try_from(pagination.offset()).map_err(TaskRepositoryError::persistence)?;
        let count_query = query.clone();
        let page_query = query.clone();

        let count = self.run_blocking(move |connection| {
            filtered_tasks(owner, &count_query)
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)
        });
        let page = self.run_blocking(move |connection| {
            filtered_tasks(owner, &page_query)
                .select(TaskRow::as_select())
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .limit(limit)
                .offset(offset)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)
        });
        let (total, rows) = tokio::try_join!(count, page)?;

        let items = rows
            .into_iter()
            .map(row_to_task)
            .collect::<TaskRepositoryResult<Vec<_>>>()?;
        Ok(TaskPage {
            total: u64::try_from(total).map_err(TaskRepositoryError::persistence)?,
            items,
        })
    }

    async fn delete_in_organization(
        &self,
        organization_id: OrganizationId,
        id: TaskId,
    ) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::organization_id.eq(organization_id.into_inner())),
            )
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

#[async_trait]
impl EvidenceRepository for PostgresTaskRepository {
    async fn store_evidence(&self, item: &Evidence) -> TaskRepositoryResult<()> {
        let task_id = item.task_id();
        let evidence_id = item.id();
        let row = EvidenceRow {
            id: evidence_id.into_inner(),
            task_id: task_id.into_inner(),
            evidence_type: item.evidence_type().as_str().to_owned(),
            note: item.note().map(str::to_owned),
            created_at: item.created_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(evidence::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::NotFound(task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateEvidence(evidence_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Evidence>> {
        self.run_blocking(move |connection| {
            let rows = evidence::table
                .filter(evidence::task_id.eq(task_id.into_inner()))
                .order((evidence::created_at.asc(), evidence::id.asc()))
                .select(EvidenceRow::as_select())
                .load::<EvidenceRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_evidence).collect()
        })
        .await
    }

    async fn find_in_scope(
        &self,
        organization_id: OrganizationId,
        task_id: TaskId,
        evidence_id: EvidenceId,
    ) -> TaskRepositoryResult<Option<Evidence>> {
        self.run_blocking(move |connection| {
            let row = evidence::table
                .inner_join(tasks::table)
                .filter(evidence::id.eq(evidence_id.into_inner()))
                .filter(evidence::task_id.eq(task_id.into_inner()))
                .filter(tasks::organization_id.eq(organization_id.into_inner()))
                .select(EvidenceRow::as_select())
                .first::<EvidenceRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_evidence).transpose()
        })
        .await
    }

    async fn delete_evidence(&self, evidence_id: EvidenceId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(evidence::table.find(evidence_id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

/// Builds the organization-scoped, filtered task query shared by the count
/// and page statements.
fn filtered_tasks(
    organization_id: Uuid,
    query: &TaskListQuery,
) -> tasks::BoxedQuery<'static, Pg> {
    let mut statement = tasks::table
        .filter(tasks::organization_id.eq(organization_id))
        .into_boxed();
    if let Some(status) = query.status() {
        statement = statement.filter(tasks::status.eq(status.as_str()));
    }
    if let Some(category) = query.category() {
        statement = statement.filter(tasks::category.eq(category.as_str()));
    }
    if let Some(control_id) = query.control_id() {
        statement = statement.filter(tasks::control_id.eq(control_id.into_inner()));
    }
    if let Some(term) = query.search() {
        let pattern = format!("%{}%", escape_like(term));
        statement = statement.filter(
            tasks::name
                .ilike(pattern.clone())
                .or(tasks::description.ilike(pattern)),
        );
    }
    statement
}

/// Escapes `LIKE` metacharacters so the search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn to_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id().into_inner(),
        organization_id: task.organization_id().into_inner(),
        control_id: task.control_id().into_inner(),
        name: task.name().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        category: task.category().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        organization_id,
        control_id,
        name,
        description,
        category,
        status,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        organization_id: OrganizationId::from_uuid(organization_id),
        control_id: ControlId::from_uuid(control_id),
        name: TaskName::new(name).map_err(TaskRepositoryError::persistence)?,
        description,
        category: TaskCategory::try_from(category.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn row_to_evidence(row: EvidenceRow) -> TaskRepositoryResult<Evidence> {
    let evidence_type = EvidenceType::try_from(row.evidence_type.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    Ok(Evidence::from_persisted(
        EvidenceId::from_uuid(row.id),
        NewEvidence {
            task_id: TaskId::from_uuid(row.task_id),
            evidence_type,
            note: row.note,
        },
        row.created_at,
    ))
}
