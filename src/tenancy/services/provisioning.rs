//! Service layer for provisioning organizations, frameworks and controls.

use crate::tenancy::{
    domain::{Control, Framework, FrameworkId, Organization, OrganizationId, TenancyDomainError},
    ports::{TenancyRepository, TenancyRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering a control within a framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterControlRequest {
    framework_id: FrameworkId,
    code: String,
    title: String,
}

impl RegisterControlRequest {
    /// Creates a request with all control fields.
    #[must_use]
    pub fn new(
        framework_id: FrameworkId,
        code: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            framework_id,
            code: code.into(),
            title: title.into(),
        }
    }
}

/// Service-level errors for tenancy provisioning.
#[derive(Debug, Error)]
pub enum TenancyServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TenancyDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TenancyRepositoryError),
}

/// Result type for tenancy service operations.
pub type TenancyServiceResult<T> = Result<T, TenancyServiceError>;

/// Provisioning service for tenant reference data.
#[derive(Clone)]
pub struct TenancyService<R, C>
where
    R: TenancyRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TenancyService<R, C>
where
    R: TenancyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new tenancy service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new organization.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyServiceError`] when the name is blank or storage
    /// fails.
    pub async fn register_organization(
        &self,
        name: impl Into<String> + Send,
    ) -> TenancyServiceResult<Organization> {
        let organization = Organization::new(name, &*self.clock)?;
        self.repository.store_organization(&organization).await?;
        info!(organization_id = %organization.id(), "registered organization");
        Ok(organization)
    }

    /// Registers a framework owned by `organization_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyServiceError`] when the name is blank, the
    /// organization is missing, or the name is already taken.
    pub async fn register_framework(
        &self,
        organization_id: OrganizationId,
        name: impl Into<String> + Send,
    ) -> TenancyServiceResult<Framework> {
        let framework = Framework::new(organization_id, name, &*self.clock)?;
        self.repository.store_framework(&framework).await?;
        info!(
            organization_id = %organization_id,
            framework_id = %framework.id(),
            "registered framework"
        );
        Ok(framework)
    }

    /// Registers a control within a framework.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyServiceError`] when the code or title is invalid,
    /// the framework is missing, or the code is already taken.
    pub async fn register_control(
        &self,
        request: RegisterControlRequest,
    ) -> TenancyServiceResult<Control> {
        let RegisterControlRequest {
            framework_id,
            code,
            title,
        } = request;
        let control = Control::new(framework_id, &code, title, &*self.clock)?;
        self.repository.store_control(&control).await?;
        info!(
            framework_id = %framework_id,
            control_id = %control.id(),
            code = %control.code(),
            "registered control"
        );
        Ok(control)
    }

}
