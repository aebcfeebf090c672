//! Project relocation over the in-memory gateways.

use super::helpers::{Stack, parent_with_sub_tasks, project_id, reminder_id, stack, task_id};
use rstest::rstest;
use tasklife::task::domain::{Reminder, Task, TaskWithSubTasks};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn relocation_moves_tasks_and_reminders_together(stack: Stack) -> Result<(), eyre::Report> {
    stack.seed_reminder("r1", "t1", "inbox")?;
    let coordinator = stack.relocation();

    let outcome = coordinator
        .relocate(
            &[parent_with_sub_tasks("t1", Some("r1"), &["s1"])],
            &project_id("work"),
        )
        .await?;

    eyre::ensure!(outcome.failed_reminders().is_empty(), "no failures expected");
    let reminder = stack
        .reminders
        .get(&reminder_id("r1"))?
        .ok_or_else(|| eyre::eyre!("reminder should still exist"))?;
    eyre::ensure!(
        reminder.project_id() == Some(&project_id("work")),
        "reminder project mismatch"
    );
    for id in ["t1", "s1"] {
        eyre::ensure!(
            stack.persistence.project_of(&task_id(id))? == Some(project_id("work")),
            "{id} should belong to work"
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sub_task_reminders_follow_the_move(stack: Stack) -> Result<(), eyre::Report> {
    stack.reminders.insert(Reminder::new(
        reminder_id("sub-r"),
        task_id("s1"),
        Some(project_id("inbox")),
    ))?;
    let sub_task = Task::new(task_id("s1"))
        .with_parent(task_id("t1"))
        .with_reminder(reminder_id("sub-r"));
    let task = TaskWithSubTasks::new(Task::new(task_id("t1")).with_sub_task_ids([task_id("s1")]))
        .with_sub_tasks([sub_task]);

    let outcome = stack
        .relocation()
        .relocate(&[task], &project_id("home"))
        .await?;

    eyre::ensure!(
        outcome.updated_reminders() == [reminder_id("sub-r")],
        "unexpected updates: {:?}",
        outcome.updated_reminders()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_twice_keeps_the_latest_project(stack: Stack) -> Result<(), eyre::Report> {
    let coordinator = stack.relocation();
    let tasks = [parent_with_sub_tasks("t1", None, &["s1"])];

    coordinator.relocate(&tasks, &project_id("work")).await?;
    coordinator.relocate(&tasks, &project_id("home")).await?;

    eyre::ensure!(
        stack.persistence.project_of(&task_id("s1"))? == Some(project_id("home")),
        "s1 should end up in home"
    );
    Ok(())
}
