//! Domain events recorded by the task aggregate.
//!
//! Every event shares an identifier, a timestamp, and the identifier of the
//! aggregate it describes. The variant-specific payload is a closed enum, so
//! serialization is a total match over the variants.

use super::{EventId, TaskStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Variant-specific payload of a task domain event.
///
/// Serializes with an `event_type` discriminant equal to the variant name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum TaskEvent {
    /// A task was created in the pending status.
    TaskCreated {
        /// Title at creation time.
        task_title: String,
        /// Owner of the task.
        user_id: String,
    },
    /// A task moved from one status to another.
    TaskStatusChanged {
        /// Status before the change.
        old_status: TaskStatus,
        /// Status after the change.
        new_status: TaskStatus,
        /// Owner of the task.
        user_id: String,
    },
    /// A task reached the completed status.
    TaskCompleted {
        /// Title at completion time.
        task_title: String,
        /// Owner of the task.
        user_id: String,
    },
}

impl TaskEvent {
    /// Returns the discriminant name of the variant.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::TaskCreated { .. } => "TaskCreated",
            Self::TaskStatusChanged { .. } => "TaskStatusChanged",
            Self::TaskCompleted { .. } => "TaskCompleted",
        }
    }

    /// Returns the owner of the task the event refers to.
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            Self::TaskCreated { user_id, .. }
            | Self::TaskStatusChanged { user_id, .. }
            | Self::TaskCompleted { user_id, .. } => user_id,
        }
    }
}

/// Parameter object for building an event whose identifier or timestamp may
/// be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventParams {
    /// Supplied event identifier; `None` or empty generates one.
    pub event_id: Option<String>,
    /// Supplied timestamp; `None` uses the clock.
    pub timestamp: Option<DateTime<Utc>>,
    /// Identifier of the aggregate the event describes.
    pub aggregate_id: String,
    /// Variant-specific payload.
    pub payload: TaskEvent,
}

/// Immutable record of a change to a task aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEvent {
    event_id: EventId,
    timestamp: DateTime<Utc>,
    aggregate_id: String,
    #[serde(flatten)]
    payload: TaskEvent,
}

impl DomainEvent {
    /// Creates an event with a fresh identifier at the given time.
    #[must_use]
    pub fn new(
        aggregate_id: impl Into<String>,
        payload: TaskEvent,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            timestamp,
            aggregate_id: aggregate_id.into(),
            payload,
        }
    }

    /// Creates an event from optional parts, filling the identifier and
    /// timestamp when they are not supplied.
    #[must_use]
    pub fn from_params(params: EventParams, clock: &impl Clock) -> Self {
        let EventParams {
            event_id,
            timestamp,
            aggregate_id,
            payload,
        } = params;
        Self {
            event_id: event_id.map_or_else(EventId::new, EventId::from_supplied),
            timestamp: timestamp.unwrap_or_else(|| clock.utc()),
            aggregate_id,
            payload,
        }
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Returns when the event occurred.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the identifier of the aggregate the event describes.
    #[must_use]
    pub fn aggregate_id(&self) -> &str {
        &self.aggregate_id
    }

    /// Returns the variant-specific payload.
    #[must_use]
    pub const fn payload(&self) -> &TaskEvent {
        &self.payload
    }

    /// Returns the discriminant name of the event.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }

    /// Flattens the event into a key-value map including `event_type`.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("event_id".to_owned(), Value::from(self.event_id.as_str()));
        map.insert(
            "timestamp".to_owned(),
            Value::from(self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        );
        map.insert("aggregate_id".to_owned(), Value::from(self.aggregate_id.as_str()));
        map.insert("event_type".to_owned(), Value::from(self.event_type()));
        match &self.payload {
            TaskEvent::TaskCreated {
                task_title,
                user_id,
            }
            | TaskEvent::TaskCompleted {
                task_title,
                user_id,
            } => {
                map.insert("task_title".to_owned(), Value::from(task_title.as_str()));
                map.insert("user_id".to_owned(), Value::from(user_id.as_str()));
            }
            TaskEvent::TaskStatusChanged {
                old_status,
                new_status,
                user_id,
            } => {
                map.insert("old_status".to_owned(), Value::from(old_status.as_str()));
                map.insert("new_status".to_owned(), Value::from(new_status.as_str()));
                map.insert("user_id".to_owned(), Value::from(user_id.as_str()));
            }
        }
        map
    }
}
