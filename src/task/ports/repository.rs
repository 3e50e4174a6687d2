//! Repository ports for tenant-scoped task and evidence persistence.
//!
//! Every lookup, update and delete takes the calling organization and must
//! only match rows reachable from it. Implementations never fall back to an
//! unscoped lookup by identifier.

use crate::task::domain::{Evidence, EvidenceId, Task, TaskChanges, TaskId, TaskListQuery};
use crate::tenancy::domain::{ControlId, OrganizationId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// One page of tasks plus the filtered total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    /// Number of tasks matching the filters, ignoring pagination.
    pub total: u64,
    /// Tasks in the requested window, newest first.
    pub items: Vec<Task>,
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists, or [`TaskRepositoryError::ControlNotFound`] when the referenced
    /// control no longer exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Writes the fields set in `changes` to a task owned by
    /// `organization_id` and returns the stored result.
    ///
    /// Fields absent from `changes` keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task with that ID
    /// exists in the organization, or
    /// [`TaskRepositoryError::ControlNotFound`] when a new control reference
    /// no longer exists.
    async fn update(
        &self,
        organization_id: OrganizationId,
        id: TaskId,
        changes: &TaskChanges,
    ) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier within an organization.
    ///
    /// Returns `None` when the task does not exist or belongs to another
    /// organization.
    async fn find_in_organization(
        &self,
        organization_id: OrganizationId,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Lists an organization's tasks matching `query`, ordered by creation
    /// time descending.
    async fn list(
        &self,
        organization_id: OrganizationId,
        query: &TaskListQuery,
    ) -> TaskRepositoryResult<TaskPage>;

    /// Deletes a task and its evidence when it exists within the
    /// organization.
    ///
    /// Returns `false` when nothing matched.
    async fn delete_in_organization(
        &self,
        organization_id: OrganizationId,
        id: TaskId,
    ) -> TaskRepositoryResult<bool>;
}

/// Evidence persistence contract.
#[async_trait]
pub trait EvidenceRepository: Send + Sync {
    /// Stores a new evidence item.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the owning task no
    /// longer exists, or [`TaskRepositoryError::DuplicateEvidence`] when the
    /// evidence ID already exists.
    async fn store_evidence(&self, evidence: &Evidence) -> TaskRepositoryResult<()>;

    /// Returns all evidence for a task ordered by creation time ascending.
    ///
    /// Callers must have scoped the task to an organization first.
    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Evidence>>;

    /// Finds an evidence item matching `evidence_id` and `task_id` whose task
    /// belongs to `organization_id`, in a single lookup.
    async fn find_in_scope(
        &self,
        organization_id: OrganizationId,
        task_id: TaskId,
        evidence_id: EvidenceId,
    ) -> TaskRepositoryResult<Option<Evidence>>;

    /// Deletes an evidence item by identifier.
    ///
    /// Callers must have confirmed scope through
    /// [`EvidenceRepository::find_in_scope`] first. Returns `false` when
    /// nothing matched.
    async fn delete_evidence(&self, evidence_id: EvidenceId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task and evidence repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// An evidence item with the same identifier already exists.
    #[error("duplicate evidence identifier: {0}")]
    DuplicateEvidence(EvidenceId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A referenced control does not exist.
    #[error("control not found: {0}")]
    ControlNotFound(ControlId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
