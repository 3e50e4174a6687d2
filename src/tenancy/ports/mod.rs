//! Port contracts for tenant reference data.

pub mod repository;

pub use repository::{TenancyRepository, TenancyRepositoryError, TenancyRepositoryResult};
