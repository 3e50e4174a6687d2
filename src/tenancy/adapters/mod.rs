//! Persistence adapters for tenant reference data.
//!
//! - [`memory::InMemoryTenancyRepository`]: thread-safe in-memory storage
//!   for tests
//! - [`postgres::PostgresTenancyRepository`]: `PostgreSQL` persistence using
//!   Diesel ORM

pub mod memory;
pub mod postgres;
