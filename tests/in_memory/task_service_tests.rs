//! In-memory integration tests for task service flows.

use chrono::{TimeZone, Utc};
use rstest::rstest;
use tasktrack::task::{
    domain::{DomainEvent, NewTask, Task, TaskId, TaskStatus, UserId, ValidationError},
    ports::TaskRepository,
    services::{ErrorClass, TaskServiceError, UpdateTaskDetailsRequest},
};

use super::helpers::{Harness, create, harness};

fn task_created_at(id: &str, user: &str, hour: u32) -> eyre::Result<Task> {
    let created_at = Utc
        .with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid timestamp"))?;
    Ok(Task::new(NewTask {
        id: TaskId::new(id)?,
        user_id: UserId::new(user)?,
        title: format!("Task {id}"),
        description: String::new(),
        status: TaskStatus::Pending,
        created_at,
    })?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_retrievable_and_announced(harness: Harness) -> eyre::Result<()> {
    let Harness {
        service,
        repository,
        publisher,
    } = harness;

    let created = create(&service, "user-1", "Plan sprint").await?;
    let fetched = service
        .get_task(&created.task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;

    eyre::ensure!(fetched.title == "Plan sprint", "title mismatch");
    eyre::ensure!(fetched.status == TaskStatus::Pending, "status mismatch");
    eyre::ensure!(fetched.created_at == created.created_at, "created_at mismatch");
    eyre::ensure!(repository.len()? == 1, "expected one stored task");

    let events = publisher.events()?;
    let kinds: Vec<&str> = events.iter().map(DomainEvent::event_type).collect();
    eyre::ensure!(kinds == ["TaskCreated"], "unexpected events {kinds:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_only_the_users_tasks_newest_first(harness: Harness) -> eyre::Result<()> {
    let Harness {
        service, repository, ..
    } = harness;
    for task in [
        task_created_at("task-old", "user-1", 8)?,
        task_created_at("task-new", "user-1", 12)?,
        task_created_at("task-other", "user-2", 10)?,
    ] {
        repository.save(&task).await?;
    }

    let listed = service.list_tasks("user-1").await?;
    let ids: Vec<&str> = listed.iter().map(|task| task.task_id.as_str()).collect();

    assert_eq!(ids, vec!["task-new", "task-old"]);
    assert!(service.list_tasks("nobody").await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_is_stored_and_second_attempt_is_rejected(
    harness: Harness,
) -> eyre::Result<()> {
    let Harness {
        service, publisher, ..
    } = harness;
    let created = create(&service, "user-1", "Close books").await?;

    let completed = service
        .complete_task(&created.task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    assert_eq!(completed.status, TaskStatus::Completed);
    assert!(completed.completed_at.is_some());

    let fetched = service
        .get_task(&created.task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    assert_eq!(fetched.completed_at, completed.completed_at);
    assert_eq!(fetched.updated_at, completed.completed_at);

    let err = service
        .complete_task(&created.task_id)
        .await
        .expect_err("second completion should fail");
    assert_eq!(err.class(), ErrorClass::Client);
    assert!(matches!(
        err,
        TaskServiceError::Validation(ValidationError::CannotComplete(TaskStatus::Completed))
    ));
    assert_eq!(publisher.batches()?.len(), 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_yields_none_everywhere(harness: Harness) -> eyre::Result<()> {
    let Harness {
        service, publisher, ..
    } = harness;

    assert!(service.get_task("task-missing").await?.is_none());
    assert!(service.complete_task("task-missing").await?.is_none());
    assert!(
        service
            .update_task_details(UpdateTaskDetailsRequest::new("task-missing").with_title("X"))
            .await?
            .is_none()
    );
    assert!(!service.delete_task("task-missing").await?);
    assert!(publisher.batches()?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edited_details_survive_a_reload(harness: Harness) -> eyre::Result<()> {
    let Harness { service, .. } = harness;
    let created = create(&service, "user-1", "Draft agenda").await?;

    service
        .update_task_details(
            UpdateTaskDetailsRequest::new(created.task_id.clone())
                .with_title("Final agenda")
                .with_description("Room 4"),
        )
        .await?;
    let fetched = service
        .get_task(&created.task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;

    assert_eq!(fetched.title, "Final agenda");
    assert_eq!(fetched.description, "Room 4");
    assert!(fetched.updated_at.is_some());
    assert_eq!(fetched.completed_at, None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_is_gone(harness: Harness) -> eyre::Result<()> {
    let Harness {
        service, repository, ..
    } = harness;
    let created = create(&service, "user-1", "Temporary").await?;

    assert!(service.delete_task(&created.task_id).await?);
    assert!(service.get_task(&created.task_id).await?.is_none());
    assert!(repository.is_empty()?);
    Ok(())
}

#[rstest]
#[case("", "Plan", "User ID is required")]
#[case("user-1", "  ", "Task title is required")]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_creation_stores_nothing(
    harness: Harness,
    #[case] user_id: &str,
    #[case] title: &str,
    #[case] message: &str,
) -> eyre::Result<()> {
    let Harness {
        service,
        repository,
        publisher,
    } = harness;

    let err = create(&service, user_id, title)
        .await
        .expect_err("creation should fail");
    assert_eq!(err.to_string(), message);
    assert!(repository.is_empty()?);
    assert!(publisher.batches()?.is_empty());
    Ok(())
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test(flavor = "multi_thread")]
async fn exists_reports_stored_tasks(
    harness: Harness,
    #[case] stored: bool,
) -> eyre::Result<()> {
    let Harness { repository, .. } = harness;
    let task = task_created_at("task-exists", "user-1", 9)?;
    if stored {
        repository.save(&task).await?;
    }

    assert_eq!(repository.exists(task.id()).await?, stored);
    repository.delete(task.id()).await?;
    assert!(!repository.exists(task.id()).await?);
    Ok(())
}
