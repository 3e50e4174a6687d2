//! Tenant-scoping guard for control references.

use crate::tenancy::{
    domain::{ControlId, OrganizationId},
    ports::{TenancyRepository, TenancyRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Errors raised while checking that a control is reachable from a tenant.
#[derive(Debug, Error)]
pub enum TenantScopeError {
    /// The control does not exist or belongs to another organization.
    ///
    /// Both cases share this variant so callers cannot probe for controls
    /// owned by other tenants.
    #[error("control not found: {0}")]
    ControlNotFound(ControlId),
    /// Repository lookup failed.
    #[error(transparent)]
    Repository(#[from] TenancyRepositoryError),
}

/// Confirms that controls referenced by tasks belong to the caller's
/// organization.
pub struct TenantScopeGuard<R>
where
    R: TenancyRepository,
{
    repository: Arc<R>,
}

impl<R> Clone for TenantScopeGuard<R>
where
    R: TenancyRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> TenantScopeGuard<R>
where
    R: TenancyRepository,
{
    /// Creates a guard over the given reference-data repository.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fails unless `control_id` names a control whose framework is owned by
    /// `organization_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TenantScopeError::ControlNotFound`] when the control is
    /// missing or owned by another organization, and
    /// [`TenantScopeError::Repository`] when the lookup fails.
    pub async fn assert_control_belongs_to_org(
        &self,
        organization_id: OrganizationId,
        control_id: ControlId,
    ) -> Result<(), TenantScopeError> {
        let owned = self
            .repository
            .control_belongs_to_organization(organization_id, control_id)
            .await?;
        if !owned {
            warn!(
                organization_id = %organization_id,
                control_id = %control_id,
                "control is not reachable from organization"
            );
            return Err(TenantScopeError::ControlNotFound(control_id));
        }
        Ok(())
    }
}
