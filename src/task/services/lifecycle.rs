//! Service layer for task creation, lookup, listing, and completion.
//!
//! Every mutating operation follows the same order: validate input, mutate
//! the aggregate, persist it, drain its events, publish them, and shape the
//! response. Persistence always precedes publication; a publication failure
//! leaves the stored task in place.

use crate::task::{
    domain::{NewTask, Task, TaskId, TaskStatus, UserId, ValidationError},
    ports::{EventPublisher, EventPublisherError, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

use super::response::{CompleteTaskResponse, CreateTaskResponse, TaskResponse};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    user_id: String,
    title: String,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            description: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for editing a task's title and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskDetailsRequest {
    task_id: String,
    title: Option<String>,
    description: Option<String>,
}

impl UpdateTaskDetailsRequest {
    /// Creates a request that changes nothing but the update timestamp.
    #[must_use]
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            title: None,
            description: None,
        }
    }

    /// Sets the new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Broad class of a service failure, for mapping onto response codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller supplied invalid input or broke a business rule.
    Client,
    /// A collaborator failed.
    Server,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input or business-rule validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Event publication failed.
    #[error(transparent)]
    Publisher(#[from] EventPublisherError),
}

impl TaskServiceError {
    /// Returns whether the failure is the caller's or a collaborator's.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::Client,
            Self::Repository(_) | Self::Publisher(_) => ErrorClass::Server,
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
pub struct TaskService<R, P, C>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    publisher: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> Clone for TaskService<R, P, C>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            publisher: Arc::clone(&self.publisher),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, P, C> TaskService<R, P, C>
where
    R: TaskRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, publisher: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            repository,
            publisher,
            clock,
        }
    }

    /// Creates a pending task and publishes its creation event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the user ID or title is
    /// blank or the title is too long, and the collaborator variants when
    /// persistence or publication fails.
    pub async fn create_task(
        &self,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<CreateTaskResponse> {
        let CreateTaskRequest {
            user_id,
            title,
            description,
        } = request;
        let owner = required(&user_id, ValidationError::MissingUserId)?;
        let trimmed_title = required(&title, ValidationError::MissingTitle)?;

        let mut task = Task::new(NewTask {
            id: TaskId::generate(),
            user_id: UserId::new(owner)?,
            title: trimmed_title.to_owned(),
            description: description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_owned(),
            status: TaskStatus::Pending,
            created_at: self.clock.utc(),
        })?;

        self.repository.save(&task).await?;
        self.publish_pending(&mut task, false).await?;

        tracing::info!(task_id = %task.id(), user_id = %task.user_id(), "task created");
        Ok(CreateTaskResponse::from(&task))
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the task ID is blank and
    /// [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn get_task(&self, task_id: &str) -> TaskServiceResult<Option<TaskResponse>> {
        let task = self.find(task_id).await?;
        Ok(task.as_ref().map(TaskResponse::from))
    }

    /// Lists every task owned by a user, in repository order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the user ID is blank and
    /// [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list_tasks(&self, user_id: &str) -> TaskServiceResult<Vec<TaskResponse>> {
        let owner = UserId::new(required(user_id, ValidationError::MissingUserId)?)?;
        let tasks = self.repository.find_by_user_id(&owner).await?;
        tracing::debug!(user_id = %owner, count = tasks.len(), "listed tasks");
        Ok(tasks.iter().map(TaskResponse::from).collect())
    }

    /// Completes a pending or in-progress task.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the task ID is blank or
    /// the task is already completed or cancelled, and the collaborator
    /// variants when persistence or publication fails.
    pub async fn complete_task(
        &self,
        task_id: &str,
    ) -> TaskServiceResult<Option<CompleteTaskResponse>> {
        let Some(mut task) = self.find(task_id).await? else {
            return Ok(None);
        };
        if !task.can_be_completed() {
            return Err(ValidationError::CannotComplete(task.status()).into());
        }

        task.update_status(TaskStatus::Completed, &*self.clock);
        self.repository.save(&task).await?;
        self.publish_pending(&mut task, true).await?;

        tracing::info!(task_id = %task.id(), user_id = %task.user_id(), "task completed");
        Ok(Some(CompleteTaskResponse::from(&task)))
    }

    /// Replaces a task's title and/or description.
    ///
    /// A supplied title is trimmed before validation. Returns `Ok(None)` when
    /// the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the task ID is blank or
    /// the new title is invalid, and the collaborator variants when
    /// persistence or publication fails.
    pub async fn update_task_details(
        &self,
        request: UpdateTaskDetailsRequest,
    ) -> TaskServiceResult<Option<TaskResponse>> {
        let UpdateTaskDetailsRequest {
            task_id,
            title,
            description,
        } = request;
        let Some(mut task) = self.find(&task_id).await? else {
            return Ok(None);
        };

        let new_title = title.map(|value| value.trim().to_owned());
        task.update_details(new_title, description, &*self.clock)?;
        self.repository.save(&task).await?;
        self.publish_pending(&mut task, false).await?;

        tracing::info!(task_id = %task.id(), "task details updated");
        Ok(Some(TaskResponse::from(&task)))
    }

    /// Deletes a task, returning `true` when a task was removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the task ID is blank and
    /// [`TaskServiceError::Repository`] when deletion fails.
    pub async fn delete_task(&self, task_id: &str) -> TaskServiceResult<bool> {
        let id = TaskId::new(required(task_id, ValidationError::MissingTaskId)?)?;
        let removed = self.repository.delete(&id).await?;
        tracing::info!(task_id = %id, removed, "task deletion requested");
        Ok(removed)
    }

    /// Validates the identifier and looks the task up.
    async fn find(&self, task_id: &str) -> TaskServiceResult<Option<Task>> {
        let id = TaskId::new(required(task_id, ValidationError::MissingTaskId)?)?;
        let task = self.repository.find_by_id(&id).await?;
        tracing::debug!(task_id = %id, found = task.is_some(), "looked up task");
        Ok(task)
    }

    /// Drains the task's events and publishes them.
    ///
    /// An empty batch is only sent when `publish_empty` is set.
    async fn publish_pending(&self, task: &mut Task, publish_empty: bool) -> TaskServiceResult<()> {
        let events = task.drain_events();
        if events.is_empty() && !publish_empty {
            return Ok(());
        }

        let count = events.len();
        if let Err(err) = self.publisher.publish(events).await {
            tracing::warn!(
                task_id = %task.id(),
                count,
                error = %err,
                "event publication failed after the task was saved"
            );
            return Err(err.into());
        }
        tracing::debug!(task_id = %task.id(), count, "published task events");
        Ok(())
    }
}

/// Returns the trimmed value, or `missing` when it is blank.
fn required(value: &str, missing: ValidationError) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(missing);
    }
    Ok(trimmed)
}
