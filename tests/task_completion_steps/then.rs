//! Then steps for task completion BDD scenarios.

use super::world::{TaskCompletionWorld, run_async};
use rstest_bdd_macros::then;
use tasktrack::task::domain::{DomainEvent, TaskStatus};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskCompletionWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.task_id()?;

    let task = run_async(world.service.get_task(&task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} not found"))?;

    if task.status != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status.as_str()
        ));
    }
    if expected == TaskStatus::Completed && task.completed_at.is_none() {
        return Err(eyre::eyre!("completed task has no completion timestamp"));
    }
    Ok(())
}

#[then(r#"the published events are "{events}""#)]
fn published_events_are(world: &TaskCompletionWorld, events: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = events
        .split(',')
        .map(str::trim)
        .filter(|kind| !kind.is_empty())
        .collect();
    let published = world.publisher.events()?;
    let actual: Vec<&str> = published.iter().map(DomainEvent::event_type).collect();

    if actual != expected {
        return Err(eyre::eyre!("expected events {expected:?}, got {actual:?}"));
    }
    Ok(())
}

#[then("no events are published")]
fn no_events_are_published(world: &TaskCompletionWorld) -> Result<(), eyre::Report> {
    let batches = world.publisher.batches()?;
    if !batches.is_empty() {
        return Err(eyre::eyre!("expected no publications, got {batches:?}"));
    }
    Ok(())
}

#[then(r#"completion fails with "{message}""#)]
fn completion_fails_with(world: &TaskCompletionWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_completion
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing completion result"))?;

    match result {
        Err(err) if err.to_string() == message => Ok(()),
        other => Err(eyre::eyre!("expected failure {message:?}, got {other:?}")),
    }
}

#[then("no task is found")]
fn no_task_is_found(world: &TaskCompletionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_completion
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing completion result"))?;

    if !matches!(result, Ok(None)) {
        return Err(eyre::eyre!("expected no task, got {result:?}"));
    }
    Ok(())
}

#[then(r#"creation fails with "{message}""#)]
fn creation_fails_with(world: &TaskCompletionWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_creation
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing creation result"))?;

    match result {
        Err(err) if err.to_string() == message => Ok(()),
        other => Err(eyre::eyre!("expected failure {message:?}, got {other:?}")),
    }
}
