//! Tasktrack: a task-tracking backend.
//!
//! Users create tasks, look them up, list their own tasks, edit them, and
//! mark them completed. Every state change is recorded as a domain event on
//! the task aggregate and published once the task has been persisted.
//!
//! # Architecture
//!
//! Tasktrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and event publication
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, in-memory,
//!   notification topic)
//!
//! # Modules
//!
//! - [`task`]: Task aggregate, events, ports, adapters, and services
//! - [`config`]: Environment-driven runtime configuration
//! - [`container`]: Production wiring of adapters into the task service

pub mod config;
pub mod container;
pub mod task;
