//! Archive and restore round trips over the in-memory gateways.

use super::helpers::{Stack, parent_with_sub_tasks, reminder_id, stack, task_id};
use rstest::rstest;
use tasklife::task::domain::TaskRef;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archive_then_restore_leaves_no_archived_records(stack: Stack) -> Result<(), eyre::Report> {
    stack.seed_reminder("r1", "t1", "inbox")?;
    let coordinator = stack.archival();
    let task = parent_with_sub_tasks("t1", Some("r1"), &["s1", "s2"]);

    let outcome = coordinator.archive(std::slice::from_ref(&task)).await?;
    eyre::ensure!(
        outcome.batch().ids() == [task_id("t1"), task_id("s1"), task_id("s2")],
        "unexpected archive order: {:?}",
        outcome.batch().ids()
    );
    eyre::ensure!(
        stack.reminders.get(&reminder_id("r1"))?.is_none(),
        "reminder should be removed"
    );

    let restored = coordinator.restore(&TaskRef::from(task.task())).await?;

    eyre::ensure!(restored.len() == 3, "expected three restored ids");
    eyre::ensure!(stack.persistence.archive()?.is_empty(), "archive should be empty");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn restore_leaves_unrelated_archived_tasks(stack: Stack) -> Result<(), eyre::Report> {
    let coordinator = stack.archival();
    let first = parent_with_sub_tasks("t1", None, &["s1"]);
    let second = parent_with_sub_tasks("t2", None, &[]);
    coordinator.archive(&[first.clone(), second]).await?;

    coordinator.restore(&TaskRef::from(first.task())).await?;

    let archive = stack.persistence.archive()?;
    eyre::ensure!(
        archive.ids() == [task_id("t2")],
        "only t2 should remain, found {:?}",
        archive.ids()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archive_records_last_active(stack: Stack) -> Result<(), eyre::Report> {
    let coordinator = stack.archival();

    coordinator
        .archive(&[parent_with_sub_tasks("t1", None, &[])])
        .await?;

    eyre::ensure!(
        stack.persistence.last_active()?.is_some(),
        "last active should be recorded"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archived_records_keep_title_and_project(stack: Stack) -> Result<(), eyre::Report> {
    let coordinator = stack.archival();

    coordinator
        .archive(&[parent_with_sub_tasks("t1", None, &[])])
        .await?;

    let archive = stack.persistence.archive()?;
    let record = archive
        .get(&task_id("t1"))
        .ok_or_else(|| eyre::eyre!("t1 should be archived"))?;
    eyre::ensure!(record.task().title() == "t1 title", "title mismatch");
    eyre::ensure!(
        record.task().project_id().map(|p| p.as_str()) == Some("inbox"),
        "project mismatch"
    );
    eyre::ensure!(record.task().is_done(), "archived task must be done");
    Ok(())
}
