//! In-memory adapters for tenant reference data.

mod repository;

pub use repository::InMemoryTenancyRepository;
