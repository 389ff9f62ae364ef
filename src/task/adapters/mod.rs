//! Adapter implementations for task tracking ports.

pub mod memory;
pub mod postgres;
pub mod topic;

pub use topic::{EventEnvelope, TopicEventPublisher, TopicMessage};
