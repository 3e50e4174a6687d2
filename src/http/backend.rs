//! Wiring of repository adapters into shared handler state.

use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::{EvidenceRepository, TaskRepository},
    services::{EvidenceService, TaskService},
};
use crate::tenancy::{
    adapters::{memory::InMemoryTenancyRepository, postgres::PostgresTenancyRepository},
    ports::TenancyRepository,
    services::TenantScopeGuard,
};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// Selects the adapters and clock a router runs against.
pub trait Backend: Send + Sync + 'static {
    /// Task and evidence storage.
    type Store: TaskRepository + EvidenceRepository + 'static;
    /// Reference-data storage used for control scoping.
    type Tenancy: TenancyRepository + 'static;
    /// Source of server-assigned timestamps.
    type Clock: Clock + Send + Sync + 'static;
}

/// In-process adapters, used by tests and local experiments.
#[derive(Debug, Clone, Copy)]
pub struct MemoryBackend;

impl Backend for MemoryBackend {
    type Store = InMemoryTaskRepository;
    type Tenancy = InMemoryTenancyRepository;
    type Clock = DefaultClock;
}

/// `PostgreSQL` adapters sharing one connection pool.
#[derive(Debug, Clone, Copy)]
pub struct PostgresBackend;

impl Backend for PostgresBackend {
    type Store = PostgresTaskRepository;
    type Tenancy = PostgresTenancyRepository;
    type Clock = DefaultClock;
}

/// Services shared by every request handler.
pub struct AppState<B: Backend> {
    pub(super) tasks: TaskService<B::Store, B::Tenancy, B::Clock>,
    pub(super) evidence: EvidenceService<B::Store, B::Clock>,
}

impl<B: Backend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            tasks: self.tasks.clone(),
            evidence: self.evidence.clone(),
        }
    }
}

impl<B: Backend> AppState<B> {
    /// Builds handler state over the given adapters.
    #[must_use]
    pub fn new(store: Arc<B::Store>, tenancy: Arc<B::Tenancy>, clock: Arc<B::Clock>) -> Self {
        Self {
            tasks: TaskService::new(
                Arc::clone(&store),
                TenantScopeGuard::new(tenancy),
                Arc::clone(&clock),
            ),
            evidence: EvidenceService::new(store, clock),
        }
    }
}
