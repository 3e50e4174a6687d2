//! Compliance tasks and the evidence attached to them.
//!
//! A task is a unit of compliance work addressing one control. Evidence
//! items document task completion. Tasks carry their organization directly;
//! evidence inherits its tenant through the owning task, so every evidence
//! lookup joins through the task before it is allowed to match. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
