//! Given steps for lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async, split_ids};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasklife::task::domain::{
    ProjectId, Reminder, ReminderId, Task, TaskId, TaskWithSubTasks,
};

#[given(r#"a task "{task_id}" with reminder "{reminder_id}" and subtasks "{sub_ids}""#)]
fn task_with_reminder_and_sub_tasks(
    world: &mut LifecycleWorld,
    task_id: String,
    reminder_id: String,
    sub_ids: String,
) -> Result<(), eyre::Report> {
    let parent_id = TaskId::new(task_id)?;
    let reminder = ReminderId::new(reminder_id)?;
    let inbox = ProjectId::new("inbox")?;
    world.reminders.insert(Reminder::new(
        reminder.clone(),
        parent_id.clone(),
        Some(inbox.clone()),
    ))?;

    let sub_tasks = split_ids(&sub_ids)
        .into_iter()
        .map(|id| {
            TaskId::new(id).map(|sub_id| {
                Task::new(sub_id)
                    .with_parent(parent_id.clone())
                    .with_project(inbox.clone())
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let parent = Task::new(parent_id)
        .with_project(inbox)
        .with_reminder(reminder)
        .with_sub_task_ids(sub_tasks.iter().map(|t| t.id().clone()));

    world.pending_task = Some(TaskWithSubTasks::new(parent).with_sub_tasks(sub_tasks));
    Ok(())
}

#[given("the task has been archived")]
fn task_has_been_archived(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let task = world.task()?.clone();
    let outcome = run_async(world.archival.archive(std::slice::from_ref(&task)))
        .wrap_err("archive task in scenario setup")?;
    world.last_archive = Some(outcome);
    Ok(())
}

#[given(r#"reminder "{reminder_id}" fails on every call"#)]
fn reminder_fails(world: &mut LifecycleWorld, reminder_id: String) -> Result<(), eyre::Report> {
    world.reminders.fail_for(ReminderId::new(reminder_id)?)?;
    Ok(())
}
