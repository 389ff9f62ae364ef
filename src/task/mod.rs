//! Task tracking for tasktrack.
//!
//! Users create, retrieve, list, and complete tasks; every mutation records
//! domain events that are published once the task has been persisted. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
