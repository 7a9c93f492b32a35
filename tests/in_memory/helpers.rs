//! Shared wiring for the in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;

use taskledger::audit::adapters::memory::InMemoryAuditLog;
use taskledger::audit::services::AuditTrailService;
use taskledger::client::adapters::memory::InMemoryClientRepository;
use taskledger::client::services::ClientDirectoryService;
use taskledger::task::adapters::memory::InMemoryWorkflowRepository;
use taskledger::task::domain::{Status, TerminalStatus};
use taskledger::task::services::{StatusCatalogService, TaskLifecycleService, TaskWorkflowService};
use taskledger::user::adapters::memory::InMemoryUserDirectory;
use taskledger::user::domain::{RoleId, User};
use taskledger::user::services::UserAdministrationService;

/// The terminal status label the seeded catalog uses (the original
/// deployment seeds the Mongolian word for "finished").
pub const DONE_STATUS: &str = "Дууссан";

/// Fully wired in-memory application surface.
pub struct TestApp {
    /// Shared audit sink every mutating adapter appends into.
    pub audit_log: InMemoryAuditLog,
    /// Status catalog service.
    pub catalog: StatusCatalogService<InMemoryWorkflowRepository, DefaultClock>,
    /// Task CRUD/assignment/progress service.
    pub lifecycle:
        TaskLifecycleService<InMemoryWorkflowRepository, InMemoryUserDirectory, DefaultClock>,
    /// Status transition service.
    pub workflow: TaskWorkflowService<InMemoryWorkflowRepository>,
    /// Client directory service.
    pub clients: ClientDirectoryService<InMemoryClientRepository, DefaultClock>,
    /// User administration service.
    pub administration: UserAdministrationService<InMemoryUserDirectory, DefaultClock>,
    /// Audit trail query service.
    pub trail: AuditTrailService<InMemoryAuditLog>,
    /// Backing user directory, for seeding.
    pub users: Arc<InMemoryUserDirectory>,
}

/// Provides a fresh application wiring for each test.
#[fixture]
pub fn app() -> TestApp {
    let audit_log = InMemoryAuditLog::new();
    let workflow_repo = Arc::new(InMemoryWorkflowRepository::new(
        TerminalStatus::new(DONE_STATUS),
        audit_log.clone(),
    ));
    let users = Arc::new(InMemoryUserDirectory::new(audit_log.clone()));
    let clients = Arc::new(InMemoryClientRepository::new(audit_log.clone()));
    let clock = Arc::new(DefaultClock);

    TestApp {
        audit_log: audit_log.clone(),
        catalog: StatusCatalogService::new(Arc::clone(&workflow_repo), Arc::clone(&clock)),
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&workflow_repo),
            Arc::clone(&users),
            Arc::clone(&clock),
        ),
        workflow: TaskWorkflowService::new(workflow_repo),
        clients: ClientDirectoryService::new(clients, Arc::clone(&clock)),
        administration: UserAdministrationService::new(Arc::clone(&users), clock),
        trail: AuditTrailService::new(Arc::new(audit_log)),
        users,
    }
}

/// Creates a status through the catalog service.
pub async fn seed_status(app: &TestApp, name: &str) -> Status {
    app.catalog
        .create_status(name, seed_user(app).id())
        .await
        .expect("status creation should succeed")
}

/// Seeds an active user into the directory.
pub fn seed_user(app: &TestApp) -> User {
    let user = User::new("operator", RoleId::new(), &DefaultClock).expect("valid username");
    app.users
        .insert_user(user.clone())
        .expect("seeding should succeed");
    user
}
