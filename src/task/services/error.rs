//! Service-level error type shared by task and evidence operations.

use crate::task::{
    domain::{EvidenceId, TaskDomainError, TaskId},
    ports::TaskRepositoryError,
};
use crate::tenancy::{
    domain::ControlId, ports::TenancyRepositoryError, services::TenantScopeError,
};
use thiserror::Error;

/// Errors returned by [`super::TaskService`] and [`super::EvidenceService`].
///
/// Resources owned by another organization are reported with the same
/// not-found variants as missing ones.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// A patch request carried no fields.
    #[error("no fields provided to update")]
    EmptyPatch,
    /// The task is missing or outside the caller's organization.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The control is missing or outside the caller's organization.
    #[error("control not found: {0}")]
    ControlNotFound(ControlId),
    /// The evidence item is missing or not reachable through the task.
    #[error("evidence not found: {0}")]
    EvidenceNotFound(EvidenceId),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
    /// Reference-data lookup failed.
    #[error(transparent)]
    Tenancy(#[from] TenancyRepositoryError),
}

/// Result type for task and evidence service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

impl From<TenantScopeError> for TaskServiceError {
    fn from(err: TenantScopeError) -> Self {
        match err {
            TenantScopeError::ControlNotFound(control_id) => Self::ControlNotFound(control_id),
            TenantScopeError::Repository(source) => Self::Tenancy(source),
        }
    }
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(task_id) => Self::TaskNotFound(task_id),
            TaskRepositoryError::ControlNotFound(control_id) => Self::ControlNotFound(control_id),
            other => Self::Repository(other),
        }
    }
}
