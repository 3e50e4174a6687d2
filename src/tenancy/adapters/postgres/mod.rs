//! `PostgreSQL` adapters for tenant reference data.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTenancyRepository, TenancyPgPool};
