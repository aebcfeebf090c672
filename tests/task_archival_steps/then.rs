//! Then steps for lifecycle BDD scenarios.

use super::world::{LifecycleWorld, split_ids};
use rstest_bdd_macros::then;
use tasklife::task::domain::{
    ProjectId, ReminderId, TaskAction, TaskChanges, TaskId, TaskUpdate, UpdateTask,
};

#[then(r#"the archive holds "{ids}" in order"#)]
fn archive_holds(world: &LifecycleWorld, ids: String) -> Result<(), eyre::Report> {
    let expected = split_ids(&ids)
        .into_iter()
        .map(TaskId::new)
        .collect::<Result<Vec<_>, _>>()?;
    let archive = world.persistence.archive()?;
    eyre::ensure!(
        archive.ids() == expected.as_slice(),
        "expected archive {expected:?}, found {:?}",
        archive.ids()
    );
    Ok(())
}

#[then("every archived task is done without a reminder")]
fn archived_tasks_are_settled(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let archive = world.persistence.archive()?;
    for archived in archive.iter() {
        eyre::ensure!(archived.task().is_done(), "{} is not done", archived.id());
        eyre::ensure!(
            archived.task().reminder_id().is_none(),
            "{} still references a reminder",
            archived.id()
        );
    }
    Ok(())
}

#[then(r#"reminder "{reminder_id}" no longer exists"#)]
fn reminder_removed(world: &LifecycleWorld, reminder_id: String) -> Result<(), eyre::Report> {
    let id = ReminderId::new(reminder_id)?;
    eyre::ensure!(world.reminders.get(&id)?.is_none(), "reminder {id} still exists");
    Ok(())
}

#[then("the archive is empty")]
fn archive_is_empty(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let archive = world.persistence.archive()?;
    eyre::ensure!(archive.is_empty(), "archive still holds {:?}", archive.ids());
    Ok(())
}

#[then(r#"reminder "{reminder_id}" belongs to project "{project_id}""#)]
fn reminder_in_project(
    world: &LifecycleWorld,
    reminder_id: String,
    project_id: String,
) -> Result<(), eyre::Report> {
    let id = ReminderId::new(reminder_id)?;
    let expected = ProjectId::new(project_id)?;
    let reminder = world
        .reminders
        .get(&id)?
        .ok_or_else(|| eyre::eyre!("reminder {id} missing"))?;
    eyre::ensure!(
        reminder.project_id() == Some(&expected),
        "reminder {id} is in {:?}",
        reminder.project_id()
    );
    Ok(())
}

#[then(r#"task "{task_id}" belongs to project "{project_id}""#)]
fn task_in_project(
    world: &LifecycleWorld,
    task_id: String,
    project_id: String,
) -> Result<(), eyre::Report> {
    let id = TaskId::new(task_id)?;
    let expected = ProjectId::new(project_id)?;
    let actual = world.persistence.project_of(&id)?;
    eyre::ensure!(
        actual.as_ref() == Some(&expected),
        "task {id} is in {actual:?}"
    );
    Ok(())
}

#[then(r#"reminder "{reminder_id}" is reported as failed"#)]
fn reminder_reported_failed(
    world: &LifecycleWorld,
    reminder_id: String,
) -> Result<(), eyre::Report> {
    let id = ReminderId::new(reminder_id)?;
    let outcome = world
        .last_archive
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing archive outcome"))?;
    eyre::ensure!(
        outcome
            .failed_reminders()
            .iter()
            .any(|failure| failure.reminder_id() == &id),
        "reminder {id} was not reported as failed"
    );
    Ok(())
}

#[then(r#"an update marks task "{task_id}" as not done"#)]
fn update_marks_not_done(world: &LifecycleWorld, task_id: String) -> Result<(), eyre::Report> {
    let expected = TaskAction::from(UpdateTask {
        task: TaskUpdate::new(TaskId::new(task_id)?, TaskChanges::done(false)),
    });
    let emitted = world
        .last_emitted
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no action was dispatched"))?;
    eyre::ensure!(
        emitted.as_slice() == [expected],
        "unexpected emission {emitted:?}"
    );
    Ok(())
}

#[then("no update is emitted")]
fn no_update_emitted(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let emitted = world
        .last_emitted
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no action was dispatched"))?;
    eyre::ensure!(emitted.is_empty(), "unexpected emission {emitted:?}");
    Ok(())
}
