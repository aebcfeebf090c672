//! When steps for lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tasklife::task::domain::{
    ListPositionChanged, ProjectId, TaskAction, TaskId, TaskRef, TodayListSection,
};

#[when("the task is archived")]
fn archive_task(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let task = world.task()?.clone();
    let outcome = run_async(world.archival.archive(std::slice::from_ref(&task)))
        .wrap_err("archive task")?;
    world.last_archive = Some(outcome);
    Ok(())
}

#[when("the task is restored")]
fn restore_task(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let task_ref = TaskRef::from(world.task()?.task());
    run_async(world.archival.restore(&task_ref)).wrap_err("restore task")?;
    Ok(())
}

#[when(r#"the task is moved to project "{project_id}""#)]
fn move_task(world: &mut LifecycleWorld, project_id: String) -> Result<(), eyre::Report> {
    let task = world.task()?.clone();
    let target = ProjectId::new(project_id)?;
    run_async(world.relocation.relocate(std::slice::from_ref(&task), &target))
        .wrap_err("move task to project")?;
    Ok(())
}

#[when(r#"task "{task_id}" moves from "{src}" to "{target}""#)]
fn move_in_today_list(
    world: &mut LifecycleWorld,
    task_id: String,
    src: String,
    target: String,
) -> Result<(), eyre::Report> {
    let action = TaskAction::from(ListPositionChanged {
        task_id: TaskId::new(task_id)?,
        src: TodayListSection::from(src),
        target: TodayListSection::from(target),
    });
    let emitted = run_async(world.dispatcher.dispatch(action)).wrap_err("dispatch list move")?;
    world.last_emitted = Some(emitted);
    Ok(())
}
