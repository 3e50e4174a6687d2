//! Tenant-scoped task CRUD and listing.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{
        Evidence, NewTask, Task, TaskCategory, TaskId, TaskListQuery, TaskName, TaskPatch,
        TaskStatus,
    },
    ports::{EvidenceRepository, TaskRepository},
};
use crate::tenancy::{
    domain::{ControlId, OrganizationId},
    ports::TenancyRepository,
    services::TenantScopeGuard,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    control_id: ControlId,
    name: String,
    description: Option<String>,
    category: TaskCategory,
    status: Option<TaskStatus>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(control_id: ControlId, name: impl Into<String>, category: TaskCategory) -> Self {
        Self {
            control_id,
            name: name.into(),
            description: None,
            category,
            status: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status instead of the default.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// One page of tasks with the window that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListing {
    /// Filtered count ignoring pagination.
    pub total: u64,
    /// Effective page size after clamping.
    pub limit: u32,
    /// Effective offset after clamping.
    pub offset: u64,
    /// Tasks in the window, newest first.
    pub items: Vec<Task>,
}

/// A task together with all of its evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    /// The task.
    pub task: Task,
    /// Evidence ordered by creation time ascending.
    pub evidence: Vec<Evidence>,
}

/// Task orchestration service.
///
/// Every operation takes the calling organization and only ever touches
/// tasks owned by it.
pub struct TaskService<R, T, C>
where
    R: TaskRepository + EvidenceRepository,
    T: TenancyRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    scope: TenantScopeGuard<T>,
    clock: Arc<C>,
}

impl<R, T, C> Clone for TaskService<R, T, C>
where
    R: TaskRepository + EvidenceRepository,
    T: TenancyRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            scope: self.scope.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, T, C> TaskService<R, T, C>
where
    R: TaskRepository + EvidenceRepository,
    T: TenancyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, scope: TenantScopeGuard<T>, clock: Arc<C>) -> Self {
        Self {
            repository,
            scope,
            clock,
        }
    }

    /// Creates a task addressing a control owned by `organization_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ControlNotFound`] when the control is not
    /// reachable from the organization, [`TaskServiceError::Domain`] when the
    /// name is invalid, and [`TaskServiceError::Repository`] when storage
    /// fails.
    pub async fn create(
        &self,
        organization_id: OrganizationId,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            control_id,
            name,
            description,
            category,
            status,
        } = request;

        self.scope
            .assert_control_belongs_to_org(organization_id, control_id)
            .await?;
        let task = Task::new(
            NewTask {
                organization_id,
                control_id,
                name: TaskName::new(name)?,
                description,
                category,
                status,
            },
            &*self.clock,
        );
        self.repository.store(&task).await?;
        info!(
            organization_id = %organization_id,
            task_id = %task.id(),
            "created task"
        );
        Ok(task)
    }

    /// Lists the organization's tasks matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list(
        &self,
        organization_id: OrganizationId,
        query: &TaskListQuery,
    ) -> TaskServiceResult<TaskListing> {
        let page = self.repository.list(organization_id, query).await?;
        let pagination = query.pagination();
        Ok(TaskListing {
            total: page.total,
            limit: pagination.limit(),
            offset: pagination.offset(),
            items: page.items,
        })
    }

    /// Returns a task and its evidence.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing or
    /// owned by another organization.
    pub async fn get(
        &self,
        organization_id: OrganizationId,
        task_id: TaskId,
    ) -> TaskServiceResult<TaskDetails> {
        let task = self.find_scoped(organization_id, task_id).await?;
        let evidence = self.repository.list_for_task(task.id()).await?;
        Ok(TaskDetails { task, evidence })
    }

    /// Applies a partial update.
    ///
    /// An empty patch is rejected before any lookup. A new control is checked
    /// against the organization before the task itself is resolved. Only the
    /// fields present in the patch are written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::EmptyPatch`],
    /// [`TaskServiceError::ControlNotFound`],
    /// [`TaskServiceError::TaskNotFound`] or [`TaskServiceError::Domain`] in
    /// that order of precedence.
    pub async fn patch(
        &self,
        organization_id: OrganizationId,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> TaskServiceResult<Task> {
        if patch.is_empty() {
            return Err(TaskServiceError::EmptyPatch);
        }
        if let Some(control_id) = patch.control_id {
            self.scope
                .assert_control_belongs_to_org(organization_id, control_id)
                .await?;
        }

        self.find_scoped(organization_id, task_id).await?;
        let changes = patch.into_changes(&*self.clock)?;
        let task = self
            .repository
            .update(organization_id, task_id, &changes)
            .await?;
        info!(
            organization_id = %organization_id,
            task_id = %task_id,
            "updated task"
        );
        Ok(task)
    }

    /// Deletes a task and its evidence.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when nothing in the
    /// organization matched.
    pub async fn delete(
        &self,
        organization_id: OrganizationId,
        task_id: TaskId,
    ) -> TaskServiceResult<()> {
        let deleted = self
            .repository
            .delete_in_organization(organization_id, task_id)
            .await?;
        if !deleted {
            return Err(TaskServiceError::TaskNotFound(task_id));
        }
        info!(
            organization_id = %organization_id,
            task_id = %task_id,
            "deleted task"
        );
        Ok(())
    }

    async fn find_scoped(
        &self,
        organization_id: OrganizationId,
        task_id: TaskId,
    ) -> TaskServiceResult<Task> {
        self.repository
            .find_in_organization(organization_id, task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }
}
