//! End-to-end status transition scenarios.

use rstest::rstest;

use taskledger::audit::domain::AuditAction;
use taskledger::audit::ports::AuditLogFilter;
use taskledger::client::services::CreateClientRequest;
use taskledger::pagination::Page;
use taskledger::task::domain::StatusChangeRequest;
use taskledger::task::services::CreateTaskRequest;

use super::helpers::{DONE_STATUS, TestApp, app, seed_status, seed_user};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_and_reopening_a_task(app: TestApp) {
    let open = seed_status(&app, "Нээлттэй").await;
    let done = seed_status(&app, DONE_STATUS).await;
    let actor = seed_user(&app);

    let client = app
        .clients
        .create_client(CreateClientRequest::new("Acme Ltd"), actor.id())
        .await
        .expect("client creation should succeed");
    let task = app
        .lifecycle
        .create_task(
            CreateTaskRequest::new(client.id(), open.id(), "Deliver the report"),
            actor.id(),
        )
        .await
        .expect("task creation should succeed");

    // Open -> Done: the terminal transition completes the task.
    app.workflow
        .change_status(StatusChangeRequest::new(task.id(), done.id(), actor.id()))
        .await
        .expect("transition should succeed");

    let finished = app
        .lifecycle
        .get_task(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(finished.status_id(), done.id());
    assert!(finished.completion_percentage().is_complete());
    assert!(finished.completed_at().is_some());

    // Done -> Open: reopening clears the completion stamp.
    app.workflow
        .change_status(
            StatusChangeRequest::new(task.id(), open.id(), actor.id()).with_note("reopened"),
        )
        .await
        .expect("transition should succeed");

    let reopened = app
        .lifecycle
        .get_task(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(reopened.status_id(), open.id());
    assert!(reopened.completed_at().is_none());

    let history = app
        .workflow
        .history(task.id())
        .await
        .expect("history should succeed");
    assert_eq!(history.len(), 2);
    let first = history.first().expect("first transition");
    let second = history.get(1).expect("second transition");
    assert_eq!(first.from_status_id, open.id());
    assert_eq!(first.to_status_id, done.id());
    assert_eq!(second.from_status_id, done.id());
    assert_eq!(second.to_status_id, open.id());
    assert_eq!(second.note.as_deref(), Some("reopened"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_mutation_appends_one_audit_entry(app: TestApp) {
    let open = seed_status(&app, "Нээлттэй").await;
    let actor = seed_user(&app);
    let baseline = app
        .trail
        .list_entries(
            &AuditLogFilter::new().for_user(actor.id()),
            Page::new(100, 0),
        )
        .await
        .expect("listing should succeed")
        .len();

    let client = app
        .clients
        .create_client(CreateClientRequest::new("Acme Ltd"), actor.id())
        .await
        .expect("client creation should succeed");
    let task = app
        .lifecycle
        .create_task(
            CreateTaskRequest::new(client.id(), open.id(), "Audited work"),
            actor.id(),
        )
        .await
        .expect("task creation should succeed");
    app.lifecycle
        .update_progress(task.id(), 30, actor.id())
        .await
        .expect("progress update should succeed");
    app.administration
        .set_active(actor.id(), true, actor.id())
        .await
        .expect("activation should succeed");

    let entries = app
        .trail
        .list_entries(
            &AuditLogFilter::new().for_user(actor.id()),
            Page::new(100, 0),
        )
        .await
        .expect("listing should succeed");
    assert_eq!(entries.len(), baseline + 4);

    let actions: Vec<AuditAction> = entries.iter().map(|entry| entry.action).collect();
    for expected in [
        AuditAction::ClientCreated,
        AuditAction::TaskCreated,
        AuditAction::TaskProgressUpdated,
        AuditAction::UserActiveChanged,
    ] {
        assert!(actions.contains(&expected), "missing {expected}");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_scoped_trail_lists_only_task_entries(app: TestApp) {
    let open = seed_status(&app, "Нээлттэй").await;
    let in_progress = seed_status(&app, "Хийгдэж байгаа").await;
    let actor = seed_user(&app);

    let client = app
        .clients
        .create_client(CreateClientRequest::new("Acme Ltd"), actor.id())
        .await
        .expect("client creation should succeed");
    let task = app
        .lifecycle
        .create_task(
            CreateTaskRequest::new(client.id(), open.id(), "Scoped work"),
            actor.id(),
        )
        .await
        .expect("task creation should succeed");
    app.workflow
        .change_status(StatusChangeRequest::new(
            task.id(),
            in_progress.id(),
            actor.id(),
        ))
        .await
        .expect("transition should succeed");

    let entries = app
        .trail
        .list_entries(&AuditLogFilter::new().for_task(task.id()), Page::default())
        .await
        .expect("listing should succeed");

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.task_id == Some(task.id())));
    assert!(entries
        .iter()
        .any(|entry| entry.action == AuditAction::TaskStatusChanged));
}
