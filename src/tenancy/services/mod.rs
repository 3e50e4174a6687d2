//! Application services for tenant reference data and scoping.

mod provisioning;
mod scope;

pub use provisioning::{
    RegisterControlRequest, TenancyService, TenancyServiceError, TenancyServiceResult,
};
pub use scope::{TenantScopeError, TenantScopeGuard};
