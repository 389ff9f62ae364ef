//! When steps for task completion BDD scenarios.

use super::world::{TaskCompletionWorld, run_async};
use rstest_bdd_macros::when;
use tasktrack::task::services::CreateTaskRequest;

#[when("the task is completed")]
fn complete_current_task(world: &mut TaskCompletionWorld) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    world.last_completion = Some(run_async(world.service.complete_task(&task_id)));
    Ok(())
}

#[when(r#"the task "{task_id}" is completed"#)]
fn complete_task_by_id(world: &mut TaskCompletionWorld, task_id: String) {
    world.last_completion = Some(run_async(world.service.complete_task(&task_id)));
}

#[when(r#"a task titled "{title}" is created for "{user_id}""#)]
fn create_task(world: &mut TaskCompletionWorld, title: String, user_id: String) {
    let result = run_async(
        world
            .service
            .create_task(CreateTaskRequest::new(user_id, title)),
    );
    if let Ok(ref created) = result {
        world.current_task_id = Some(created.task_id.clone());
    }
    world.last_creation = Some(result);
}
