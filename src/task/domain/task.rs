//! Task aggregate root.

use super::{DomainEvent, MAX_TITLE_LENGTH, TaskEvent, TaskId, TaskStatus, UserId, ValidationError};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Parameter object for constructing a task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task identifier.
    pub id: TaskId,
    /// Owner of the task.
    pub user_id: UserId,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Initial status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub user_id: UserId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp, if any.
    pub updated_at: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Task aggregate root.
///
/// Mutations record [`DomainEvent`]s in an owned buffer which the caller
/// drains after persisting the task. A task instance is meant to live for a
/// single service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    user_id: UserId,
    title: String,
    description: String,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    pending_events: Vec<DomainEvent>,
}

impl Task {
    /// Creates a task.
    ///
    /// A `TaskCreated` event is recorded only when the initial status is
    /// [`TaskStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] or
    /// [`ValidationError::TitleTooLong`] when the title is invalid.
    pub fn new(params: NewTask) -> Result<Self, ValidationError> {
        let NewTask {
            id,
            user_id,
            title,
            description,
            status,
            created_at,
        } = params;
        validate_title(&title)?;

        let mut task = Self {
            id,
            user_id,
            title,
            description,
            status,
            created_at,
            updated_at: None,
            completed_at: None,
            pending_events: Vec::new(),
        };
        if status == TaskStatus::Pending {
            let created = TaskEvent::TaskCreated {
                task_title: task.title.clone(),
                user_id: task.user_id.as_str().to_owned(),
            };
            task.record(created, created_at);
        }
        Ok(task)
    }

    /// Reconstructs a task from persisted storage without recording events.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the stored title is invalid.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, ValidationError> {
        validate_title(&data.title)?;
        Ok(Self {
            id: data.id,
            user_id: data.user_id,
            title: data.title,
            description: data.description,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
            pending_events: Vec::new(),
        })
    }

    /// Returns the persistable snapshot of this task.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedTaskData {
        PersistedTaskData {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            completed_at: self.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the owner of the task.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp, if the task was ever mutated.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the completion timestamp, if the task was completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the events recorded since the last drain.
    #[must_use]
    pub fn pending_events(&self) -> &[DomainEvent] {
        &self.pending_events
    }

    /// Moves the task to `new_status`.
    ///
    /// Does nothing when the status is unchanged. Otherwise records
    /// `TaskStatusChanged`, followed by `TaskCompleted` when the new status is
    /// [`TaskStatus::Completed`]. No transition rules are enforced here.
    pub fn update_status(&mut self, new_status: TaskStatus, clock: &impl Clock) {
        if self.status == new_status {
            return;
        }

        let old_status = self.status;
        let now = clock.utc();
        self.status = new_status;
        self.updated_at = Some(now);
        if new_status == TaskStatus::Completed {
            self.completed_at = Some(now);
        }

        let changed = TaskEvent::TaskStatusChanged {
            old_status,
            new_status,
            user_id: self.user_id.as_str().to_owned(),
        };
        self.record(changed, now);

        if new_status == TaskStatus::Completed {
            let completed = TaskEvent::TaskCompleted {
                task_title: self.title.clone(),
                user_id: self.user_id.as_str().to_owned(),
            };
            self.record(completed, now);
        }
    }

    /// Replaces the title and/or description.
    ///
    /// `updated_at` is refreshed even when both arguments are `None`. The
    /// description is stored as given.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the new title is invalid; the task
    /// is left untouched in that case.
    pub fn update_details(
        &mut self,
        title: Option<String>,
        description: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), ValidationError> {
        if let Some(new_title) = title {
            validate_title(&new_title)?;
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        self.updated_at = Some(clock.utc());
        Ok(())
    }

    /// Returns the recorded events in order and clears the buffer.
    pub fn drain_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Returns `true` when the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, TaskStatus::Completed)
    }

    /// Returns `true` when the task may be moved to completed.
    #[must_use]
    pub const fn can_be_completed(&self) -> bool {
        matches!(self.status, TaskStatus::Pending | TaskStatus::InProgress)
    }

    fn record(&mut self, payload: TaskEvent, timestamp: DateTime<Utc>) {
        self.pending_events
            .push(DomainEvent::new(self.id.as_str(), payload, timestamp));
    }
}

/// Checks the title rules shared by construction and detail updates.
fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let length = title.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong { length });
    }
    Ok(())
}
