//! Repository port for organizations, frameworks and controls.

use crate::tenancy::domain::{
    Control, ControlCode, ControlId, Framework, FrameworkId, Organization, OrganizationId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tenancy repository operations.
pub type TenancyRepositoryResult<T> = Result<T, TenancyRepositoryError>;

/// Reference-data persistence contract.
#[async_trait]
pub trait TenancyRepository: Send + Sync {
    /// Stores a new organization.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyRepositoryError::Persistence`] when storage fails.
    async fn store_organization(&self, organization: &Organization)
    -> TenancyRepositoryResult<()>;

    /// Stores a new framework.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyRepositoryError::OrganizationNotFound`] when the
    /// owning organization does not exist, or
    /// [`TenancyRepositoryError::DuplicateFrameworkName`] when the
    /// organization already has a framework with the same name.
    async fn store_framework(&self, framework: &Framework) -> TenancyRepositoryResult<()>;

    /// Stores a new control.
    ///
    /// # Errors
    ///
    /// Returns [`TenancyRepositoryError::FrameworkNotFound`] when the owning
    /// framework does not exist, or
    /// [`TenancyRepositoryError::DuplicateControlCode`] when the framework
    /// already has a control with the same code.
    async fn store_control(&self, control: &Control) -> TenancyRepositoryResult<()>;

    /// Returns `true` when a control with `control_id` exists in a framework
    /// owned by `organization_id`.
    ///
    /// A control owned by another organization and a missing control both
    /// yield `false`.
    async fn control_belongs_to_organization(
        &self,
        organization_id: OrganizationId,
        control_id: ControlId,
    ) -> TenancyRepositoryResult<bool>;
}

/// Errors returned by tenancy repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TenancyRepositoryError {
    /// The referenced organization does not exist.
    #[error("organization not found: {0}")]
    OrganizationNotFound(OrganizationId),

    /// The referenced framework does not exist.
    #[error("framework not found: {0}")]
    FrameworkNotFound(FrameworkId),

    /// The organization already owns a framework with this name.
    #[error("framework '{name}' already exists in organization {organization_id}")]
    DuplicateFrameworkName {
        /// Owning organization.
        organization_id: OrganizationId,
        /// Conflicting framework name.
        name: String,
    },

    /// The framework already defines a control with this code.
    #[error("control '{code}' already exists in framework {framework_id}")]
    DuplicateControlCode {
        /// Owning framework.
        framework_id: FrameworkId,
        /// Conflicting control code.
        code: ControlCode,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TenancyRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
