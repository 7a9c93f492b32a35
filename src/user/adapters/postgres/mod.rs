//! `PostgreSQL` implementation of the user repository port using Diesel.

pub mod models;
pub mod schema;

use async_trait::async_trait;
use diesel::prelude::*;

use crate::audit::adapters::postgres::models::NewAuditEntryRow;
use crate::audit::adapters::postgres::schema::audit_log;
use crate::audit::domain::AuditEntry;
use crate::db::{PgPool, get_conn_with, run_blocking_with};
use crate::user::domain::{Role, RoleId, User, UserId};
use crate::user::ports::{UserRepository, UserRepositoryError, UserRepositoryResult};
use models::{RoleRow, UserRow, row_to_role, row_to_user};
use schema::{roles, users};

/// `PostgreSQL`-backed user directory.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, UserRepositoryError::persistence)?;
                let row = users::table
                    .find(id.into_inner())
                    .select(UserRow::as_select())
                    .first::<UserRow>(&mut conn)
                    .optional()
                    .map_err(UserRepositoryError::persistence)?;
                Ok(row.map(row_to_user))
            },
            UserRepositoryError::persistence,
        )
        .await
    }

    async fn find_role(&self, id: RoleId) -> UserRepositoryResult<Option<Role>> {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, UserRepositoryError::persistence)?;
                let row = roles::table
                    .find(id.into_inner())
                    .select(RoleRow::as_select())
                    .first::<RoleRow>(&mut conn)
                    .optional()
                    .map_err(UserRepositoryError::persistence)?;
                row.map(row_to_role).transpose()
            },
            UserRepositoryError::persistence,
        )
        .await
    }

    async fn update(&self, user: &User, audit: &AuditEntry) -> UserRepositoryResult<()> {
        let pool = self.pool.clone();
        let user_id = user.id();
        let role_id = user.role_id().into_inner();
        let is_active = user.is_active();
        let new_audit = NewAuditEntryRow::from_domain(audit);

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, UserRepositoryError::persistence)?;
                conn.transaction::<_, UserRepositoryError, _>(|tx_conn| {
                    let updated = diesel::update(users::table.find(user_id.into_inner()))
                        .set((users::role_id.eq(role_id), users::is_active.eq(is_active)))
                        .execute(tx_conn)
                        .map_err(UserRepositoryError::persistence)?;
                    if updated == 0 {
                        return Err(UserRepositoryError::NotFound(user_id));
                    }

                    diesel::insert_into(audit_log::table)
                        .values(&new_audit)
                        .execute(tx_conn)
                        .map_err(UserRepositoryError::persistence)?;
                    Ok(())
                })
            },
            UserRepositoryError::persistence,
        )
        .await
    }
}
