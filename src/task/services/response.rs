//! Response shapes returned by task services.

use crate::task::domain::{Task, TaskStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Formats a timestamp as ISO-8601 with a `+00:00` offset.
///
/// The fraction is written as six digits, and omitted when the microsecond
/// part is zero.
#[must_use]
pub fn iso8601(timestamp: DateTime<Utc>) -> String {
    let precision = if timestamp.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    timestamp.to_rfc3339_opts(precision, false)
}

/// Response returned after creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTaskResponse {
    /// Identifier of the new task.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Task status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: String,
    /// Owner of the task.
    pub user_id: String,
}

impl From<&Task> for CreateTaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id().as_str().to_owned(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            status: task.status(),
            created_at: iso8601(task.created_at()),
            user_id: task.user_id().as_str().to_owned(),
        }
    }
}

/// Full view of a task, returned by lookups and listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskResponse {
    /// Task identifier.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Task status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: String,
    /// Latest mutation timestamp, `null` when never mutated.
    pub updated_at: Option<String>,
    /// Completion timestamp, `null` when not completed.
    pub completed_at: Option<String>,
    /// Owner of the task.
    pub user_id: String,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id().as_str().to_owned(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            status: task.status(),
            created_at: iso8601(task.created_at()),
            updated_at: task.updated_at().map(iso8601),
            completed_at: task.completed_at().map(iso8601),
            user_id: task.user_id().as_str().to_owned(),
        }
    }
}

/// Response returned after completing a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompleteTaskResponse {
    /// Task identifier.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// Task status.
    pub status: TaskStatus,
    /// Completion timestamp.
    pub completed_at: Option<String>,
}

impl From<&Task> for CompleteTaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id().as_str().to_owned(),
            title: task.title().to_owned(),
            status: task.status(),
            completed_at: task.completed_at().map(iso8601),
        }
    }
}
