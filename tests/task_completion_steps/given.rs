//! Given steps for task completion BDD scenarios.

use super::world::{TaskCompletionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasktrack::task::services::CreateTaskRequest;

#[given(r#"a task titled "{title}" owned by "{user_id}""#)]
fn task_owned_by(
    world: &mut TaskCompletionWorld,
    title: String,
    user_id: String,
) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .service
            .create_task(CreateTaskRequest::new(user_id, title)),
    )
    .wrap_err("create task for completion scenario")?;
    world.current_task_id = Some(created.task_id);
    Ok(())
}

#[given("the task has been completed")]
fn task_has_been_completed(world: &mut TaskCompletionWorld) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    run_async(world.service.complete_task(&task_id))
        .wrap_err("complete task in scenario setup")?
        .ok_or_else(|| eyre::eyre!("task vanished during scenario setup"))?;
    Ok(())
}
