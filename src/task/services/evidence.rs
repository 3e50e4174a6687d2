//! Evidence attachment and removal, scoped through the owning task.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::{
    domain::{Evidence, EvidenceId, EvidenceType, NewEvidence, TaskId},
    ports::{EvidenceRepository, TaskRepository},
};
use crate::tenancy::domain::OrganizationId;
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

/// Request payload for attaching evidence to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEvidenceRequest {
    evidence_type: EvidenceType,
    note: Option<String>,
}

impl CreateEvidenceRequest {
    /// Creates a request for the given evidence type.
    #[must_use]
    pub const fn new(evidence_type: EvidenceType) -> Self {
        Self {
            evidence_type,
            note: None,
        }
    }

    /// Sets the free-form note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Evidence orchestration service.
pub struct EvidenceService<R, C>
where
    R: TaskRepository + EvidenceRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for EvidenceService<R, C>
where
    R: TaskRepository + EvidenceRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> EvidenceService<R, C>
where
    R: TaskRepository + EvidenceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new evidence service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Attaches evidence to a task owned by `organization_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is missing or
    /// owned by another organization, including when it is deleted between
    /// the lookup and the insert.
    pub async fn add(
        &self,
        organization_id: OrganizationId,
        task_id: TaskId,
        request: CreateEvidenceRequest,
    ) -> TaskServiceResult<Evidence> {
        let task = self
            .repository
            .find_in_organization(organization_id, task_id)
            .await?;
        if task.is_none() {
            warn!(
                organization_id = %organization_id,
                task_id = %task_id,
                "evidence target task is not reachable from organization"
            );
            return Err(TaskServiceError::TaskNotFound(task_id));
        }

        let CreateEvidenceRequest {
            evidence_type,
            note,
        } = request;
        let item = Evidence::new(
            NewEvidence {
                task_id,
                evidence_type,
                note,
            },
            &*self.clock,
        );
        self.repository.store_evidence(&item).await?;
        info!(
            organization_id = %organization_id,
            task_id = %task_id,
            evidence_id = %item.id(),
            "attached evidence"
        );
        Ok(item)
    }

    /// Removes an evidence item reachable through `task_id` from
    /// `organization_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::EvidenceNotFound`] when the evidence does
    /// not exist, belongs to another task, or the task belongs to another
    /// organization.
    pub async fn delete(
        &self,
        organization_id: OrganizationId,
        task_id: TaskId,
        evidence_id: EvidenceId,
    ) -> TaskServiceResult<()> {
        let scoped = self
            .repository
            .find_in_scope(organization_id, task_id, evidence_id)
            .await?;
        if scoped.is_none() {
            return Err(TaskServiceError::EvidenceNotFound(evidence_id));
        }
        if !self.repository.delete_evidence(evidence_id).await? {
            return Err(TaskServiceError::EvidenceNotFound(evidence_id));
        }
        info!(
            organization_id = %organization_id,
            task_id = %task_id,
            evidence_id = %evidence_id,
            "deleted evidence"
        );
        Ok(())
    }
}
