//! Application services for task orchestration.

mod lifecycle;
mod response;

pub use lifecycle::{
    CreateTaskRequest, ErrorClass, TaskService, TaskServiceError, TaskServiceResult,
    UpdateTaskDetailsRequest,
};
pub use response::{CompleteTaskResponse, CreateTaskResponse, TaskResponse, iso8601};
