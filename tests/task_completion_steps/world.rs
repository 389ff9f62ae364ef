//! Shared world state for task completion BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasktrack::task::{
    adapters::memory::{InMemoryEventPublisher, InMemoryTaskRepository},
    services::{CompleteTaskResponse, CreateTaskResponse, TaskService, TaskServiceResult},
};

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskService<InMemoryTaskRepository, InMemoryEventPublisher, DefaultClock>;

/// Scenario world for task completion behaviour tests.
pub struct TaskCompletionWorld {
    pub service: TestTaskService,
    pub publisher: InMemoryEventPublisher,
    pub current_task_id: Option<String>,
    pub last_creation: Option<TaskServiceResult<CreateTaskResponse>>,
    pub last_completion: Option<TaskServiceResult<Option<CompleteTaskResponse>>>,
}

impl TaskCompletionWorld {
    /// Creates a world with an empty repository and publisher.
    #[must_use]
    pub fn new() -> Self {
        let publisher = InMemoryEventPublisher::new();
        let service = TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(publisher.clone()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            publisher,
            current_task_id: None,
            last_creation: None,
            last_completion: None,
        }
    }

    /// Returns the identifier of the task the scenario is working on.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task_id(&self) -> Result<String, eyre::Report> {
        self.current_task_id
            .clone()
            .ok_or_else(|| eyre::eyre!("missing task id in scenario world"))
    }
}

impl Default for TaskCompletionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskCompletionWorld {
    TaskCompletionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
