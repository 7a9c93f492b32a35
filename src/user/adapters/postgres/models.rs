//! Diesel row models for user administration persistence.

use super::schema::{roles, users};
use crate::user::domain::{PersistedUserData, Role, RoleId, User, UserId};
use crate::user::ports::{UserRepositoryError, UserRepositoryResult};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Login / display name.
    pub username: String,
    /// Role reference.
    pub role_id: uuid::Uuid,
    /// Active flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for role records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleRow {
    /// Role identifier.
    pub id: uuid::Uuid,
    /// Role name.
    pub name: String,
}

/// Maps a stored row back to the domain user.
#[must_use]
pub fn row_to_user(row: UserRow) -> User {
    User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(row.id),
        username: row.username,
        role_id: RoleId::from_uuid(row.role_id),
        is_active: row.is_active,
        created_at: row.created_at,
    })
}

/// Maps a stored row back to the domain role.
///
/// # Errors
///
/// Returns [`UserRepositoryError::Persistence`] when the stored name
/// fails domain validation.
pub fn row_to_role(row: RoleRow) -> UserRepositoryResult<Role> {
    Role::from_parts(RoleId::from_uuid(row.id), row.name)
        .map_err(UserRepositoryError::persistence)
}
