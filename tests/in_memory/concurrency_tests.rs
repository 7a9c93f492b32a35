//! Serialization of concurrent transitions on the same task.

use std::sync::Arc;

use rstest::rstest;

use taskledger::client::services::CreateClientRequest;
use taskledger::task::domain::{StatusChangeRequest, StatusId, TaskId};
use taskledger::task::services::CreateTaskRequest;

use super::helpers::{TestApp, app, seed_status, seed_user};

async fn seed_contended_task(app: &TestApp, initial: StatusId) -> TaskId {
    let actor = seed_user(app);
    let client = app
        .clients
        .create_client(CreateClientRequest::new("Contended Ltd"), actor.id())
        .await
        .expect("client creation should succeed");
    app.lifecycle
        .create_task(
            CreateTaskRequest::new(client.id(), initial, "Contended work"),
            actor.id(),
        )
        .await
        .expect("task creation should succeed")
        .id()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn racing_transitions_serialize_into_a_chain(app: TestApp) {
    let open = seed_status(&app, "Open").await;
    let review = seed_status(&app, "Review").await;
    let paused = seed_status(&app, "Paused").await;
    let task_id = seed_contended_task(&app, open.id()).await;
    let actor = seed_user(&app);

    let app = Arc::new(app);
    let first = {
        let app = Arc::clone(&app);
        let request = StatusChangeRequest::new(task_id, review.id(), actor.id());
        tokio::spawn(async move { app.workflow.change_status(request).await })
    };
    let second = {
        let app = Arc::clone(&app);
        let request = StatusChangeRequest::new(task_id, paused.id(), actor.id());
        tokio::spawn(async move { app.workflow.change_status(request).await })
    };

    first
        .await
        .expect("task should not panic")
        .expect("transition should succeed");
    second
        .await
        .expect("task should not panic")
        .expect("transition should succeed");

    // Whatever the interleaving, the lock serializes the transitions:
    // the later one read the status the earlier one wrote.
    let history = app
        .workflow
        .history(task_id)
        .await
        .expect("history should succeed");
    assert_eq!(history.len(), 2);
    let earlier = history.first().expect("first transition");
    let later = history.get(1).expect("second transition");
    assert_eq!(earlier.from_status_id, open.id());
    assert_eq!(later.from_status_id, earlier.to_status_id);

    let settled = app
        .lifecycle
        .get_task(task_id)
        .await
        .expect("lookup should succeed");
    assert_eq!(settled.status_id(), later.to_status_id);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn many_racing_transitions_never_tear_the_history(app: TestApp) {
    let open = seed_status(&app, "Open").await;
    let mut targets = Vec::new();
    for name in ["S1", "S2", "S3", "S4", "S5", "S6"] {
        targets.push(seed_status(&app, name).await);
    }
    let task_id = seed_contended_task(&app, open.id()).await;
    let actor = seed_user(&app);

    let app = Arc::new(app);
    let mut handles = Vec::new();
    for target in &targets {
        let app = Arc::clone(&app);
        let request = StatusChangeRequest::new(task_id, target.id(), actor.id());
        handles.push(tokio::spawn(
            async move { app.workflow.change_status(request).await },
        ));
    }
    for handle in handles {
        handle
            .await
            .expect("task should not panic")
            .expect("transition should succeed");
    }

    // All targets are distinct, so every transition succeeds exactly once
    // and the records must form an unbroken chain from the initial status.
    let history = app
        .workflow
        .history(task_id)
        .await
        .expect("history should succeed");
    assert_eq!(history.len(), targets.len());
    let mut current = open.id();
    for change in &history {
        assert_eq!(change.from_status_id, current);
        current = change.to_status_id;
    }

    let settled = app
        .lifecycle
        .get_task(task_id)
        .await
        .expect("lookup should succeed");
    assert_eq!(settled.status_id(), current);
}
