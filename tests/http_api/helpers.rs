//! Shared helpers for HTTP integration tests.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use compliance_tracker::{
    http::{AppState, MemoryBackend, router},
    task::adapters::memory::InMemoryTaskRepository,
    tenancy::{
        adapters::memory::InMemoryTenancyRepository,
        services::{RegisterControlRequest, TenancyService},
    },
};
use eyre::{Result, WrapErr};
use http_body_util::BodyExt;
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Organization with one framework and one control.
pub struct Tenant {
    /// Organization identifier.
    pub organization_id: Uuid,
    /// Control owned by the organization.
    pub control_id: Uuid,
}

/// Router plus two provisioned tenants.
pub struct Api {
    /// Router under test.
    pub app: Router,
    /// First tenant.
    pub acme: Tenant,
    /// Second tenant, used as the intruder in isolation tests.
    pub globex: Tenant,
}

impl Api {
    /// Sends a request and returns the status and the decoded JSON body
    /// (`Value::Null` for empty bodies).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.app.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).wrap_err("response body is not JSON")?
        };
        Ok((status, value))
    }

    /// Creates a task for `tenant` and returns its identifier.
    pub async fn create_task(&self, tenant: &Tenant, name: &str) -> Result<String> {
        let (status, body) = self
            .send(
                Method::POST,
                &tasks_uri(tenant.organization_id),
                Some(serde_json::json!({
                    "controlId": tenant.control_id,
                    "name": name,
                    "category": "POLICY",
                })),
            )
            .await?;
        eyre::ensure!(status == StatusCode::CREATED, "unexpected status {status}: {body}");
        body["id"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| eyre::eyre!("task id missing from {body}"))
    }
}

/// Returns `/v1/organizations/{org}/tasks`.
pub fn tasks_uri(organization_id: Uuid) -> String {
    format!("/v1/organizations/{organization_id}/tasks")
}

/// Returns `/v1/organizations/{org}/tasks/{task}`.
pub fn task_uri(organization_id: Uuid, task_id: &str) -> String {
    format!("/v1/organizations/{organization_id}/tasks/{task_id}")
}

async fn provision(
    service: &TenancyService<InMemoryTenancyRepository, DefaultClock>,
    name: &str,
) -> Result<Tenant> {
    let organization = service.register_organization(name).await?;
    let framework = service
        .register_framework(organization.id(), "DSALTA")
        .await?;
    let control = service
        .register_control(RegisterControlRequest::new(
            framework.id(),
            "AC-01",
            "Access Control Policy",
        ))
        .await?;
    Ok(Tenant {
        organization_id: organization.id().into_inner(),
        control_id: control.id().into_inner(),
    })
}

/// Builds a router over fresh in-memory adapters with two tenants.
#[fixture]
pub async fn api() -> Api {
    let tenancy = Arc::new(InMemoryTenancyRepository::new());
    let clock = Arc::new(DefaultClock);
    let provisioning = TenancyService::new(Arc::clone(&tenancy), Arc::clone(&clock));
    let acme = provision(&provisioning, "Acme Corp")
        .await
        .expect("acme provisioning should succeed");
    let globex = provision(&provisioning, "Globex")
        .await
        .expect("globex provisioning should succeed");

    let state = AppState::<MemoryBackend>::new(
        Arc::new(InMemoryTaskRepository::new()),
        tenancy,
        clock,
    );
    Api {
        app: router(state),
        acme,
        globex,
    }
}
