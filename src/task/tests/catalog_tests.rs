//! Service orchestration tests for the status catalog.

use std::sync::Arc;

use crate::audit::adapters::memory::InMemoryAuditLog;
use crate::client::domain::ClientId;
use crate::task::adapters::memory::InMemoryWorkflowRepository;
use crate::task::domain::TerminalStatus;
use crate::task::services::{
    CreateTaskRequest, StatusCatalogError, StatusCatalogService, TaskLifecycleService,
};
use crate::user::adapters::memory::InMemoryUserDirectory;
use crate::user::domain::UserId;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

struct Bench {
    catalog: StatusCatalogService<InMemoryWorkflowRepository, DefaultClock>,
    lifecycle: TaskLifecycleService<InMemoryWorkflowRepository, InMemoryUserDirectory, DefaultClock>,
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
        lifecycle: TaskLifecycleService::new(repository, users, clock),
        audit,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_status_persists_and_lists_by_name(bench: Bench) {
    let actor = UserId::new();
    bench
        .catalog
        .create_status("Open", actor)
        .await
        .expect("status creation should succeed");
    bench
        .catalog
        .create_status("Done", actor)
        .await
        .expect("status creation should succeed");

    let names: Vec<String> = bench
        .catalog
        .list_statuses()
        .await
        .expect("listing should succeed")
        .into_iter()
        .map(|status| status.name().to_owned())
        .collect();

    assert_eq!(names, vec!["Done".to_owned(), "Open".to_owned()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_status_rejects_duplicate_name(bench: Bench) {
    let actor = UserId::new();
    bench
        .catalog
        .create_status("Open", actor)
        .await
        .expect("first creation should succeed");

    let result = bench.catalog.create_status("Open", actor).await;

    assert!(matches!(
        result,
        Err(StatusCatalogError::DuplicateName(name)) if name == "Open"
    ));
    let statuses = bench
        .catalog
        .list_statuses()
        .await
        .expect("listing should succeed");
    assert_eq!(statuses.len(), 1);
    assert_eq!(bench.audit.len().expect("audit log readable"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rename_status_updates_catalog(bench: Bench) {
    let actor = UserId::new();
    let status = bench
        .catalog
        .create_status("In Prgress", actor)
        .await
        .expect("creation should succeed");

    let renamed = bench
        .catalog
        .rename_status(status.id(), "In Progress", actor)
        .await
        .expect("rename should succeed");

    assert_eq!(renamed.name(), "In Progress");
    let names: Vec<String> = bench
        .catalog
        .list_statuses()
        .await
        .expect("listing should succeed")
        .into_iter()
        .map(|s| s.name().to_owned())
        .collect();
    assert_eq!(names, vec!["In Progress".to_owned()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rename_status_rejects_taken_name(bench: Bench) {
    let actor = UserId::new();
    bench
        .catalog
        .create_status("Open", actor)
        .await
        .expect("creation should succeed");
    let other = bench
        .catalog
        .create_status("Paused", actor)
        .await
        .expect("creation should succeed");

    let result = bench.catalog.rename_status(other.id(), "Open", actor).await;

    assert!(matches!(
        result,
        Err(StatusCatalogError::DuplicateName(name)) if name == "Open"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_status_removes_unreferenced_entry(bench: Bench) {
    let actor = UserId::new();
    let status = bench
        .catalog
        .create_status("Scratch", actor)
        .await
        .expect("creation should succeed");

    bench
        .catalog
        .delete_status(status.id(), actor)
        .await
        .expect("deletion should succeed");

    let statuses = bench
        .catalog
        .list_statuses()
        .await
        .expect("listing should succeed");
    assert!(statuses.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_status_rejects_referenced_entry(bench: Bench) {
    let actor = UserId::new();
    let status = bench
        .catalog
        .create_status("Open", actor)
        .await
        .expect("creation should succeed");
    bench
        .lifecycle
        .create_task(
            CreateTaskRequest::new(ClientId::new(), status.id(), "Wire the office"),
            actor,
        )
        .await
        .expect("task creation should succeed");

    let result = bench.catalog.delete_status(status.id(), actor).await;

    assert!(matches!(
        result,
        Err(StatusCatalogError::InUse(id)) if id == status.id()
    ));
}
