//! Domain-focused tests for task values and the transition mutation.

use crate::client::domain::ClientId;
use crate::task::domain::{
    CompletionPercentage, NewTaskData, Priority, Status, StatusId, Task, TaskDomainError,
    TerminalStatus,
};
use crate::user::domain::UserId;
use chrono::NaiveDate;
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn new_task_data(status_id: StatusId) -> NewTaskData {
    NewTaskData {
        client_id: ClientId::new(),
        status_id,
        title: "Install workstation".to_owned(),
        description: None,
        priority: Priority::default(),
        start_date: None,
        due_date: None,
        assigned_to: None,
        created_by: None,
    }
}

#[rstest]
#[case("low", Priority::Low)]
#[case("medium", Priority::Medium)]
#[case("HIGH", Priority::High)]
#[case("  high  ", Priority::High)]
fn priority_parses_known_labels(#[case] label: &str, #[case] expected: Priority) {
    assert_eq!(Priority::try_from(label), Ok(expected));
}

#[rstest]
fn priority_rejects_unknown_label() {
    assert!(Priority::try_from("urgent").is_err());
}

#[rstest]
#[case(0, false)]
#[case(55, false)]
#[case(100, true)]
fn completion_percentage_accepts_valid_values(#[case] value: u8, #[case] complete: bool) {
    let progress = CompletionPercentage::new(value).expect("value in range");
    assert_eq!(progress.value(), value);
    assert_eq!(progress.is_complete(), complete);
}

#[rstest]
fn completion_percentage_rejects_out_of_range() {
    assert_eq!(
        CompletionPercentage::new(101),
        Err(TaskDomainError::CompletionPercentageOutOfRange(101)),
    );
}

#[rstest]
fn task_new_rejects_blank_title(clock: DefaultClock) {
    let mut data = new_task_data(StatusId::new());
    data.title = "   ".to_owned();
    assert_eq!(Task::new(data, &clock), Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn task_new_rejects_inverted_schedule(clock: DefaultClock) {
    let mut data = new_task_data(StatusId::new());
    data.start_date = NaiveDate::from_ymd_opt(2026, 3, 10);
    data.due_date = NaiveDate::from_ymd_opt(2026, 3, 1);
    assert!(matches!(
        Task::new(data, &clock),
        Err(TaskDomainError::DueDateBeforeStart { .. })
    ));
}

#[rstest]
fn task_new_starts_with_zero_progress(clock: DefaultClock) -> eyre::Result<()> {
    let task = Task::new(new_task_data(StatusId::new()), &clock)?;
    ensure!(task.completion_percentage() == CompletionPercentage::ZERO);
    ensure!(task.completed_at().is_none());
    ensure!(task.created_at() == task.updated_at());
    Ok(())
}

#[rstest]
fn set_progress_stamps_completion_once(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = Task::new(new_task_data(StatusId::new()), &clock)?;

    task.set_progress(CompletionPercentage::COMPLETE, &clock);
    let first_stamp = task.completed_at();
    ensure!(first_stamp.is_some());

    task.set_progress(CompletionPercentage::COMPLETE, &clock);
    ensure!(task.completed_at() == first_stamp);
    Ok(())
}

#[rstest]
fn set_progress_below_complete_clears_stamp(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = Task::new(new_task_data(StatusId::new()), &clock)?;
    task.set_progress(CompletionPercentage::COMPLETE, &clock);

    task.set_progress(CompletionPercentage::new(60)?, &clock);
    ensure!(task.completed_at().is_none());
    ensure!(task.completion_percentage().value() == 60);
    Ok(())
}

#[rstest]
fn change_status_rejects_current_status(clock: DefaultClock) -> eyre::Result<()> {
    let open = Status::new("Open")?;
    let terminal = TerminalStatus::new("Done");
    let mut task = Task::new(new_task_data(open.id()), &clock)?;

    let result = task.change_status(&open, UserId::new(), None, &terminal, &clock);
    ensure!(matches!(
        result,
        Err(TaskDomainError::StatusUnchanged { task_id, status_id })
            if task_id == task.id() && status_id == open.id()
    ));
    ensure!(task.status_id() == open.id());
    Ok(())
}

#[rstest]
fn change_status_into_terminal_completes_task(clock: DefaultClock) -> eyre::Result<()> {
    let open = Status::new("Open")?;
    let done = Status::new("Done")?;
    let terminal = TerminalStatus::new("Done");
    let actor = UserId::new();
    let mut task = Task::new(new_task_data(open.id()), &clock)?;

    let change = task.change_status(&done, actor, None, &terminal, &clock)?;

    ensure!(task.status_id() == done.id());
    ensure!(task.completion_percentage().is_complete());
    ensure!(task.completed_at() == Some(change.changed_at));
    ensure!(task.updated_at() == change.changed_at);
    ensure!(change.from_status_id == open.id());
    ensure!(change.to_status_id == done.id());
    ensure!(change.changed_by == actor);
    Ok(())
}

#[rstest]
fn change_status_out_of_terminal_clears_stamp(clock: DefaultClock) -> eyre::Result<()> {
    let open = Status::new("Open")?;
    let done = Status::new("Done")?;
    let terminal = TerminalStatus::new("Done");
    let actor = UserId::new();
    let mut task = Task::new(new_task_data(open.id()), &clock)?;
    task.change_status(&done, actor, None, &terminal, &clock)?;

    let change =
        task.change_status(&open, actor, Some("reopened".to_owned()), &terminal, &clock)?;

    ensure!(task.completed_at().is_none());
    // Percentage is deliberately left at its last value on the way out.
    ensure!(task.completion_percentage().is_complete());
    ensure!(change.note.as_deref() == Some("reopened"));
    Ok(())
}

#[rstest]
fn audit_detail_encodes_transition_and_note(clock: DefaultClock) -> eyre::Result<()> {
    let open = Status::new("Open")?;
    let done = Status::new("Done")?;
    let terminal = TerminalStatus::new("Done");
    let mut task = Task::new(new_task_data(open.id()), &clock)?;

    let change = task.change_status(&done, UserId::new(), None, &terminal, &clock)?;
    let detail = change.audit_detail();

    ensure!(detail == format!("{}->{}, note=-", open.id(), done.id()));

    let entry = change.audit_entry();
    ensure!(entry.task_id == Some(task.id()));
    ensure!(entry.created_at == change.changed_at);
    Ok(())
}

#[rstest]
fn terminal_status_matches_exact_name_only() -> eyre::Result<()> {
    let terminal = TerminalStatus::new("Дууссан");
    let done = Status::new("Дууссан")?;
    let almost = Status::new("дууссан")?;

    ensure!(terminal.matches(&done));
    ensure!(!terminal.matches(&almost));
    Ok(())
}

#[rstest]
fn reschedule_rejects_inverted_window(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = Task::new(new_task_data(StatusId::new()), &clock)?;
    let result = task.reschedule(
        NaiveDate::from_ymd_opt(2026, 5, 20),
        NaiveDate::from_ymd_opt(2026, 5, 1),
        &clock,
    );
    ensure!(matches!(
        result,
        Err(TaskDomainError::DueDateBeforeStart { .. })
    ));
    Ok(())
}
