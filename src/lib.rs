//! Compliance tracker: multi-tenant compliance task tracking.
//!
//! Organizations manage controls drawn from compliance frameworks, create
//! tasks against those controls, and attach evidence documenting task
//! completion. Every read and write is scoped to the calling organization.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//! - **Services**: Orchestration of domain rules over ports
//!
//! # Modules
//!
//! - [`tenancy`]: Organizations, frameworks, controls and the tenant-scoping
//!   guard
//! - [`task`]: Compliance tasks and their evidence
//! - [`http`]: Versioned REST surface over the task and evidence services
//! - [`persistence`]: Connection pooling and embedded migrations
//! - [`config`]: Environment-driven server configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod http;
pub mod persistence;
pub mod task;
pub mod telemetry;
pub mod tenancy;
