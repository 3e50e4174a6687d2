//! Port contracts for task and evidence persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

pub use repository::{
    EvidenceRepository, TaskPage, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
};
