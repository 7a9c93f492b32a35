//! `PostgreSQL` repository implementation for the status catalog.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use super::models::{NewStatusRow, StatusRow};
use super::schema::statuses;
use crate::audit::adapters::postgres::models::NewAuditEntryRow;
use crate::audit::adapters::postgres::schema::audit_log;
use crate::audit::domain::AuditEntry;
use crate::db::{PgPool, get_conn_with, run_blocking_with};
use crate::task::domain::{Status, StatusId};
use crate::task::ports::{StatusRepository, StatusRepositoryError, StatusRepositoryResult};

/// `PostgreSQL`-backed status catalog repository.
#[derive(Debug, Clone)]
pub struct PostgresStatusRepository {
    pool: PgPool,
}

impl PostgresStatusRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_domain(row: StatusRow) -> StatusRepositoryResult<Status> {
    Status::from_parts(StatusId::from_uuid(row.id), row.name)
        .map_err(StatusRepositoryError::persistence)
}

fn insert_audit(tx_conn: &mut PgConnection, entry: &AuditEntry) -> StatusRepositoryResult<()> {
    diesel::insert_into(audit_log::table)
        .values(NewAuditEntryRow::from_domain(entry))
        .execute(tx_conn)
        .map_err(StatusRepositoryError::persistence)?;
    Ok(())
}

/// Maps a unique-constraint violation on the name column to the semantic
/// duplicate error; the index still enforces integrity in the window
/// between any pre-check and the write.
fn map_name_conflict(err: DieselError, name: &str) -> StatusRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StatusRepositoryError::DuplicateName(name.to_owned())
        }
        other => StatusRepositoryError::persistence(other),
    }
}

#[async_trait]
impl StatusRepository for PostgresStatusRepository {
    async fn store(&self, status: &Status, audit: &AuditEntry) -> StatusRepositoryResult<()> {
        let pool = self.pool.clone();
        let new_row = NewStatusRow::from_domain(status);
        let entry = audit.clone();

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, StatusRepositoryError::persistence)?;
                conn.transaction::<_, StatusRepositoryError, _>(|tx_conn| {
                    diesel::insert_into(statuses::table)
                        .values(&new_row)
                        .execute(tx_conn)
                        .map_err(|err| map_name_conflict(err, &new_row.name))?;
                    insert_audit(tx_conn, &entry)
                })
            },
            StatusRepositoryError::persistence,
        )
        .await
    }

    async fn list(&self) -> StatusRepositoryResult<Vec<Status>> {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, StatusRepositoryError::persistence)?;
                let rows = statuses::table
                    .order(statuses::name.asc())
                    .select(StatusRow::as_select())
                    .load::<StatusRow>(&mut conn)
                    .map_err(StatusRepositoryError::persistence)?;
                rows.into_iter().map(to_domain).collect()
            },
            StatusRepositoryError::persistence,
        )
        .await
    }

    async fn find_by_id(&self, id: StatusId) -> StatusRepositoryResult<Option<Status>> {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, StatusRepositoryError::persistence)?;
                let row = statuses::table
                    .find(id.into_inner())
                    .select(StatusRow::as_select())
                    .first::<StatusRow>(&mut conn)
                    .optional()
                    .map_err(StatusRepositoryError::persistence)?;
                row.map(to_domain).transpose()
            },
            StatusRepositoryError::persistence,
        )
        .await
    }

    async fn find_by_name(&self, name: &str) -> StatusRepositoryResult<Option<Status>> {
        let pool = self.pool.clone();
        let lookup = name.to_owned();
        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, StatusRepositoryError::persistence)?;
                let row = statuses::table
                    .filter(statuses::name.eq(lookup))
                    .select(StatusRow::as_select())
                    .first::<StatusRow>(&mut conn)
                    .optional()
                    .map_err(StatusRepositoryError::persistence)?;
                row.map(to_domain).transpose()
            },
            StatusRepositoryError::persistence,
        )
        .await
    }

    async fn update(&self, status: &Status, audit: &AuditEntry) -> StatusRepositoryResult<()> {
        let pool = self.pool.clone();
        let status_id = status.id();
        let name = status.name().to_owned();
        let entry = audit.clone();

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, StatusRepositoryError::persistence)?;
                conn.transaction::<_, StatusRepositoryError, _>(|tx_conn| {
                    let updated = diesel::update(statuses::table.find(status_id.into_inner()))
                        .set(statuses::name.eq(name.clone()))
                        .execute(tx_conn)
                        .map_err(|err| map_name_conflict(err, &name))?;
                    if updated == 0 {
                        return Err(StatusRepositoryError::NotFound(status_id));
                    }
                    insert_audit(tx_conn, &entry)
                })
            },
            StatusRepositoryError::persistence,
        )
        .await
    }

    async fn delete(&self, id: StatusId, audit: &AuditEntry) -> StatusRepositoryResult<()> {
        let pool = self.pool.clone();
        let entry = audit.clone();

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, StatusRepositoryError::persistence)?;
                conn.transaction::<_, StatusRepositoryError, _>(|tx_conn| {
                    let deleted = diesel::delete(statuses::table.find(id.into_inner()))
                        .execute(tx_conn)
                        .map_err(|err| match err {
                            DieselError::DatabaseError(
                                DatabaseErrorKind::ForeignKeyViolation,
                                _,
                            ) => StatusRepositoryError::InUse(id),
                            other => StatusRepositoryError::persistence(other),
                        })?;
                    if deleted == 0 {
                        return Err(StatusRepositoryError::NotFound(id));
                    }
                    insert_audit(tx_conn, &entry)
                })
            },
            StatusRepositoryError::persistence,
        )
        .await
    }
}
