//! Shared fixtures: two organizations, each owning one control.

use std::sync::Arc;

use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    services::{EvidenceService, TaskService},
};
use crate::tenancy::{
    adapters::memory::InMemoryTenancyRepository,
    domain::{ControlId, OrganizationId},
    services::{RegisterControlRequest, TenancyService, TenantScopeGuard},
};
use mockable::DefaultClock;
use rstest::fixture;

pub(super) type TestTaskService =
    TaskService<InMemoryTaskRepository, InMemoryTenancyRepository, DefaultClock>;
pub(super) type TestEvidenceService = EvidenceService<InMemoryTaskRepository, DefaultClock>;

pub(super) struct Tenant {
    pub(super) organization: OrganizationId,
    pub(super) control: ControlId,
}

pub(super) struct Context {
    pub(super) tasks: TestTaskService,
    pub(super) evidence: TestEvidenceService,
    pub(super) acme: Tenant,
    pub(super) globex: Tenant,
}

async fn provision(
    service: &TenancyService<InMemoryTenancyRepository, DefaultClock>,
    name: &str,
    code: &str,
) -> Tenant {
    let organization = service
        .register_organization(name)
        .await
        .expect("organization registration should succeed");
    let framework = service
        .register_framework(organization.id(), "SOC 2")
        .await
        .expect("framework registration should succeed");
    let control = service
        .register_control(RegisterControlRequest::new(
            framework.id(),
            code,
            "Access Control Policy",
        ))
        .await
        .expect("control registration should succeed");
    Tenant {
        organization: organization.id(),
        control: control.id(),
    }
}

#[fixture]
pub(super) async fn context() -> Context {
    let tenancy = Arc::new(InMemoryTenancyRepository::new());
    let store = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(DefaultClock);
    let provisioning = TenancyService::new(Arc::clone(&tenancy), Arc::clone(&clock));

    let acme = provision(&provisioning, "Acme Corp", "AC-01").await;
    let globex = provision(&provisioning, "Globex", "AC-01").await;

    Context {
        tasks: TaskService::new(
            Arc::clone(&store),
            TenantScopeGuard::new(tenancy),
            Arc::clone(&clock),
        ),
        evidence: EvidenceService::new(store, clock),
        acme,
        globex,
    }
}
