//! In-memory adapters for task tracking.

mod publisher;
mod task;

pub use publisher::InMemoryEventPublisher;
pub use task::InMemoryTaskRepository;
