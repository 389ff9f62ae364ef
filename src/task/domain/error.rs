//! Error types for task validation and parsing.

use super::TaskStatus;
use thiserror::Error;

/// Maximum number of characters accepted in a task title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validation failures raised by the task domain and its services.
///
/// The `Display` text of each variant is the human-readable message exposed
/// to callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required user identifier was blank.
    #[error("User ID is required")]
    MissingUserId,

    /// A required task identifier was blank.
    #[error("Task ID is required")]
    MissingTaskId,

    /// A required task title was blank.
    #[error("Task title is required")]
    MissingTitle,

    /// The task title is empty after trimming.
    #[error("Task title cannot be empty")]
    EmptyTitle,

    /// The task title exceeds [`MAX_TITLE_LENGTH`] characters.
    #[error("Task title cannot be longer than {MAX_TITLE_LENGTH} characters")]
    TitleTooLong {
        /// Character count of the rejected title.
        length: usize,
    },

    /// A task identifier value was empty.
    #[error("TaskId cannot be empty")]
    EmptyTaskId,

    /// A user identifier value was empty.
    #[error("UserId must be a non-empty string")]
    EmptyUserId,

    /// The task is in a status from which it cannot be completed.
    #[error("Task with status '{0}' cannot be completed")]
    CannotComplete(TaskStatus),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
