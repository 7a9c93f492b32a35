//! Client directory and user administration flows.

use rstest::rstest;

use taskledger::audit::ports::AuditLogFilter;
use taskledger::client::ports::ClientFilter;
use taskledger::client::services::{ClientDirectoryError, ClientUpdate, CreateClientRequest};
use taskledger::pagination::Page;
use taskledger::user::domain::Role;
use taskledger::user::services::UserAdministrationError;

use super::helpers::{TestApp, app, seed_user};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn client_lifecycle_round_trip(app: TestApp) {
    let actor = seed_user(&app);

    let created = app
        .clients
        .create_client(
            CreateClientRequest::new("Acme Ltd").with_company("Acme Holdings"),
            actor.id(),
        )
        .await
        .expect("client creation should succeed");

    let updated = app
        .clients
        .update_client(
            created.id(),
            ClientUpdate::new().with_email("office@acme.example"),
            actor.id(),
        )
        .await
        .expect("update should succeed");
    assert_eq!(updated.email(), Some("office@acme.example"));

    let listed = app
        .clients
        .list_clients(&ClientFilter::new().with_query("holdings"), Page::default())
        .await
        .expect("listing should succeed");
    assert_eq!(listed.len(), 1);

    app.clients
        .delete_client(created.id(), actor.id())
        .await
        .expect("deletion should succeed");
    let missing = app.clients.get_client(created.id()).await;
    assert!(matches!(missing, Err(ClientDirectoryError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn role_change_requires_seeded_role(app: TestApp) {
    let admin = seed_user(&app);
    let target = seed_user(&app);
    let manager = Role::new("manager").expect("valid role name");

    let before = app
        .administration
        .change_role(target.id(), manager.id(), admin.id())
        .await;
    assert!(matches!(
        before,
        Err(UserAdministrationError::RoleNotFound(id)) if id == manager.id()
    ));

    app.users
        .insert_role(manager.clone())
        .expect("seeding should succeed");
    let changed = app
        .administration
        .change_role(target.id(), manager.id(), admin.id())
        .await
        .expect("role change should succeed");
    assert_eq!(changed.role_id(), manager.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivated_user_is_visible_in_the_trail(app: TestApp) {
    let admin = seed_user(&app);
    let target = seed_user(&app);

    app.administration
        .set_active(target.id(), false, admin.id())
        .await
        .expect("deactivation should succeed");

    let entries = app
        .trail
        .list_entries(&AuditLogFilter::new().for_user(admin.id()), Page::default())
        .await
        .expect("listing should succeed");
    assert_eq!(entries.len(), 1);
    let entry = entries.first().expect("one entry");
    assert_eq!(
        entry.detail,
        format!("user_id={}, is_active=false", target.id()),
    );
}
