//! In-memory repository for organizations, frameworks and controls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::tenancy::{
    domain::{Control, ControlId, Framework, FrameworkId, Organization, OrganizationId},
    ports::{TenancyRepository, TenancyRepositoryError, TenancyRepositoryResult},
};

/// Thread-safe in-memory tenancy repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTenancyRepository {
    state: Arc<RwLock<InMemoryTenancyState>>,
}

#[derive(Debug, Default)]
struct InMemoryTenancyState {
    organizations: HashMap<OrganizationId, Organization>,
    frameworks: HashMap<FrameworkId, Framework>,
    controls: HashMap<ControlId, Control>,
}

impl InMemoryTenancyRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl ToString) -> TenancyRepositoryError {
    TenancyRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TenancyRepository for InMemoryTenancyRepository {
    async fn store_organization(
        &self,
        organization: &Organization,
    ) -> TenancyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .organizations
            .insert(organization.id(), organization.clone());
        Ok(())
    }

    async fn store_framework(&self, framework: &Framework) -> TenancyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state
            .organizations
            .contains_key(&framework.organization_id())
        {
            return Err(TenancyRepositoryError::OrganizationNotFound(
                framework.organization_id(),
            ));
        }
        let duplicate = state.frameworks.values().any(|existing| {
            existing.organization_id() == framework.organization_id()
                && existing.name() == framework.name()
        });
        if duplicate {
            return Err(TenancyRepositoryError::DuplicateFrameworkName {
                organization_id: framework.organization_id(),
                name: framework.name().to_owned(),
            });
        }
        state.frameworks.insert(framework.id(), framework.clone());
        Ok(())
    }

    async fn store_control(&self, control: &Control) -> TenancyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.frameworks.contains_key(&control.framework_id()) {
            return Err(TenancyRepositoryError::FrameworkNotFound(
                control.framework_id(),
            ));
        }
        let duplicate = state.controls.values().any(|existing| {
            existing.framework_id() == control.framework_id() && existing.code() == control.code()
        });
        if duplicate {
            return Err(TenancyRepositoryError::DuplicateControlCode {
                framework_id: control.framework_id(),
                code: control.code().clone(),
            });
        }
        state.controls.insert(control.id(), control.clone());
        Ok(())
    }

    async fn control_belongs_to_organization(
        &self,
        organization_id: OrganizationId,
        control_id: ControlId,
    ) -> TenancyRepositoryResult<bool> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let owned = state
            .controls
            .get(&control_id)
            .and_then(|control| state.frameworks.get(&control.framework_id()))
            .is_some_and(|framework| framework.organization_id() == organization_id);
        Ok(owned)
    }
}
