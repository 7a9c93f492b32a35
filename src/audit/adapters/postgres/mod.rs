//! `PostgreSQL` implementation of the audit log query port using Diesel.
//!
//! The write side lives in the other contexts' adapters: they insert into
//! [`schema::audit_log`] inside their own transactions so an entry is
//! durable exactly when the mutation it records commits.

pub mod models;
pub mod schema;

use async_trait::async_trait;
use diesel::prelude::*;

use crate::audit::domain::AuditEntry;
use crate::audit::ports::{AuditLogError, AuditLogFilter, AuditLogRepository, AuditLogResult};
use crate::db::{PgPool, get_conn_with, run_blocking_with};
use crate::pagination::Page;
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use models::{AuditEntryRow, row_to_entry};
use schema::audit_log;

/// `PostgreSQL`-backed audit log reader.
#[derive(Debug, Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn list(&self, filter: &AuditLogFilter, page: Page) -> AuditLogResult<Vec<AuditEntry>> {
        let pool = self.pool.clone();
        let task_id = filter.task_id.map(TaskId::into_inner);
        let user_id = filter.user_id.map(UserId::into_inner);

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, AuditLogError::persistence)?;

                let mut query = audit_log::table
                    .select(AuditEntryRow::as_select())
                    .into_boxed();
                if let Some(id) = task_id {
                    query = query.filter(audit_log::task_id.eq(id));
                }
                if let Some(id) = user_id {
                    query = query.filter(audit_log::user_id.eq(id));
                }

                let rows = query
                    .order(audit_log::created_at.desc())
                    .limit(page.limit_i64())
                    .offset(page.offset_i64())
                    .load::<AuditEntryRow>(&mut conn)
                    .map_err(AuditLogError::persistence)?;

                rows.into_iter()
                    .map(|row| row_to_entry(row).map_err(AuditLogError::persistence))
                    .collect()
            },
            AuditLogError::persistence,
        )
        .await
    }
}
