//! Domain model for task tracking.
//!
//! The task aggregate owns its title invariant and the events describing its
//! own changes. Infrastructure concerns stay outside this boundary.

mod error;
mod events;
mod ids;
mod status;
mod task;

pub use error::{MAX_TITLE_LENGTH, ParseTaskStatusError, ValidationError};
pub use events::{DomainEvent, EventParams, TaskEvent};
pub use ids::{EventId, TaskId, UserId};
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, Task};
