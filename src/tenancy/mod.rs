//! Tenant reference data and scoping for the compliance tracker.
//!
//! Organizations are the isolation boundary. Frameworks belong to one
//! organization and controls belong to one framework, so every control is
//! transitively owned by exactly one organization. This module owns those
//! reference records and the guard that confirms a control is reachable
//! from a calling organization before a task may reference it.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Scoping guard and provisioning services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
