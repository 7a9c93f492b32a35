//! Service orchestration tests for the status transition workflow.

use std::sync::Arc;

use crate::audit::adapters::memory::InMemoryAuditLog;
use crate::audit::domain::AuditAction;
use crate::audit::ports::{AuditLogFilter, AuditLogRepository};
use crate::client::domain::ClientId;
use crate::pagination::Page;
use crate::task::adapters::memory::InMemoryWorkflowRepository;
use crate::task::domain::{Status, StatusChangeRequest, StatusId, Task, TaskId, TerminalStatus};
use crate::task::services::{
    CreateTaskRequest, StatusCatalogService, TaskLifecycleService, TaskWorkflowError,
    TaskWorkflowService,
};
use crate::user::adapters::memory::InMemoryUserDirectory;
use crate::user::domain::UserId;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

struct Bench {
    catalog: StatusCatalogService<InMemoryWorkflowRepository, DefaultClock>,
    lifecycle: TaskLifecycleService<InMemoryWorkflowRepository, InMemoryUserDirectory, DefaultClock>,
    workflow: TaskWorkflowService<InMemoryWorkflowRepository>,
    audit: InMemoryAuditLog,
}

#[fixture]
fn bench() -> Bench {
    let audit = InMemoryAuditLog::new();
    let repository = Arc::new(InMemoryWorkflowRepository::new(
        TerminalStatus::new("Done"),
        audit.clone(),
    ));
    let users = Arc::new(InMemoryUserDirectory::new(audit.clone()));
    let clock = Arc::new(DefaultClock);
    Bench {
        catalog: StatusCatalogService::new(Arc::clone(&repository), Arc::clone(&clock)),
        lifecycle: TaskLifecycleService::new(Arc::clone(&repository), users, clock),
        workflow: TaskWorkflowService::new(repository),
        audit,
    }
}

async fn seed_status(bench: &Bench, name: &str) -> Status {
    bench
        .catalog
        .create_status(name, UserId::new())
        .await
        .expect("status creation should succeed")
}

async fn seed_task(bench: &Bench, status: &Status, title: &str) -> Task {
    bench
        .lifecycle
        .create_task(
            CreateTaskRequest::new(ClientId::new(), status.id(), title),
            UserId::new(),
        )
        .await
        .expect("task creation should succeed")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_status_moves_task_and_records_history(bench: Bench) {
    let open = seed_status(&bench, "Open").await;
    let in_progress = seed_status(&bench, "In Progress").await;
    let task = seed_task(&bench, &open, "Tracked work").await;
    let actor = UserId::new();

    let change = bench
        .workflow
        .change_status(StatusChangeRequest::new(task.id(), in_progress.id(), actor))
        .await
        .expect("transition should succeed");

    assert_eq!(change.from_status_id, open.id());
    assert_eq!(change.to_status_id, in_progress.id());
    assert_eq!(change.changed_by, actor);

    let moved = bench
        .lifecycle
        .get_task(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(moved.status_id(), in_progress.id());
    assert!(moved.completed_at().is_none());

    let history = bench
        .workflow
        .history(task.id())
        .await
        .expect("history should succeed");
    assert_eq!(history, vec![change.clone()]);

    let entries = bench
        .audit
        .list(&AuditLogFilter::new().for_task(task.id()), Page::default())
        .await
        .expect("audit listing should succeed");
    let transition_entries: Vec<_> = entries
        .iter()
        .filter(|entry| entry.action == AuditAction::TaskStatusChanged)
        .collect();
    assert_eq!(transition_entries.len(), 1);
    let entry = transition_entries.first().expect("one transition entry");
    assert_eq!(entry.detail, change.audit_detail());
    assert_eq!(entry.user_id, actor);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn terminal_transition_completes_task(bench: Bench) {
    let open = seed_status(&bench, "Open").await;
    let done = seed_status(&bench, "Done").await;
    let task = seed_task(&bench, &open, "Finishable work").await;
    let actor = UserId::new();

    bench
        .workflow
        .change_status(StatusChangeRequest::new(task.id(), done.id(), actor))
        .await
        .expect("transition should succeed");

    let finished = bench
        .lifecycle
        .get_task(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(finished.status_id(), done.id());
    assert!(finished.completion_percentage().is_complete());
    assert!(finished.completed_at().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reopening_clears_completion_stamp(bench: Bench) {
    let open = seed_status(&bench, "Open").await;
    let done = seed_status(&bench, "Done").await;
    let task = seed_task(&bench, &open, "Reopened work").await;
    let actor = UserId::new();

    bench
        .workflow
        .change_status(StatusChangeRequest::new(task.id(), done.id(), actor))
        .await
        .expect("transition should succeed");
    let reopen = bench
        .workflow
        .change_status(
            StatusChangeRequest::new(task.id(), open.id(), actor).with_note("reopened"),
        )
        .await
        .expect("transition should succeed");

    let reopened = bench
        .lifecycle
        .get_task(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(reopened.status_id(), open.id());
    assert!(reopened.completed_at().is_none());
    assert_eq!(reopen.note.as_deref(), Some("reopened"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn no_op_transition_fails_with_zero_writes(bench: Bench) {
    let open = seed_status(&bench, "Open").await;
    let task = seed_task(&bench, &open, "Stationary work").await;
    let before = bench
        .lifecycle
        .get_task(task.id())
        .await
        .expect("lookup should succeed");
    let audit_before = bench.audit.len().expect("audit log readable");

    let result = bench
        .workflow
        .change_status(StatusChangeRequest::new(task.id(), open.id(), UserId::new()))
        .await;

    assert!(matches!(
        result,
        Err(TaskWorkflowError::StatusUnchanged { task_id, status_id })
            if task_id == task.id() && status_id == open.id()
    ));
    let after = bench
        .lifecycle
        .get_task(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(after, before);
    assert!(bench
        .workflow
        .history(task.id())
        .await
        .expect("history should succeed")
        .is_empty());
    assert_eq!(bench.audit.len().expect("audit log readable"), audit_before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_on_unknown_task_fails_with_zero_writes(bench: Bench) {
    let open = seed_status(&bench, "Open").await;
    let ghost = TaskId::new();
    let audit_before = bench.audit.len().expect("audit log readable");

    let result = bench
        .workflow
        .change_status(StatusChangeRequest::new(ghost, open.id(), UserId::new()))
        .await;

    assert!(matches!(
        result,
        Err(TaskWorkflowError::TaskNotFound(id)) if id == ghost
    ));
    assert_eq!(bench.audit.len().expect("audit log readable"), audit_before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_to_unknown_status_fails_with_zero_writes(bench: Bench) {
    let open = seed_status(&bench, "Open").await;
    let task = seed_task(&bench, &open, "Misdirected work").await;
    let ghost = StatusId::new();

    let result = bench
        .workflow
        .change_status(StatusChangeRequest::new(task.id(), ghost, UserId::new()))
        .await;

    assert!(matches!(
        result,
        Err(TaskWorkflowError::StatusNotFound(id)) if id == ghost
    ));
    assert!(bench
        .workflow
        .history(task.id())
        .await
        .expect("history should succeed")
        .is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_chains_transitions_in_order(bench: Bench) {
    let open = seed_status(&bench, "Open").await;
    let in_progress = seed_status(&bench, "In Progress").await;
    let done = seed_status(&bench, "Done").await;
    let task = seed_task(&bench, &open, "Long-running work").await;
    let actor = UserId::new();

    for target in [in_progress.id(), done.id(), open.id()] {
        bench
            .workflow
            .change_status(StatusChangeRequest::new(task.id(), target, actor))
            .await
            .expect("transition should succeed");
    }

    let history = bench
        .workflow
        .history(task.id())
        .await
        .expect("history should succeed");
    assert_eq!(history.len(), 3);
    for pair in history.windows(2) {
        let [earlier, later] = pair else {
            continue;
        };
        assert!(earlier.changed_at <= later.changed_at);
        assert_eq!(earlier.to_status_id, later.from_status_id);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_for_unknown_task_is_empty(bench: Bench) {
    let history = bench
        .workflow
        .history(TaskId::new())
        .await
        .expect("history should succeed");
    assert!(history.is_empty());
}
