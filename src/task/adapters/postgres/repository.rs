//! `PostgreSQL` repository implementation for tasks and status transitions.
//!
//! The status transition is the one locked path in the crate: it runs in
//! a transaction that takes `SELECT … FOR UPDATE` on the task row, so two
//! concurrent transitions on the same task serialize and the second one
//! re-reads the status the first one wrote.

use async_trait::async_trait;
use diesel::prelude::*;
use mockable::DefaultClock;

use super::models::{
    NewStatusChangeRow, NewTaskRow, StatusChangeRow, StatusRow, TaskRow, row_to_change,
    row_to_status, row_to_task,
};
use super::schema::{statuses, task_status_history, tasks};
use crate::audit::adapters::postgres::models::NewAuditEntryRow;
use crate::audit::adapters::postgres::schema::audit_log;
use crate::audit::domain::AuditEntry;
use crate::db::{PgPool, get_conn_with, run_blocking_with};
use crate::pagination::Page;
use crate::task::domain::{
    StatusChange, StatusChangeRequest, Task, TaskDomainError, TaskId, TerminalStatus,
};
use crate::task::ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
    terminal: TerminalStatus,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool and
    /// the terminal-status configuration.
    #[must_use]
    pub const fn new(pool: PgPool, terminal: TerminalStatus) -> Self {
        Self { pool, terminal }
    }
}

fn map_transition_error(err: TaskDomainError) -> TaskRepositoryError {
    match err {
        TaskDomainError::StatusUnchanged { task_id, status_id } => {
            TaskRepositoryError::StatusUnchanged { task_id, status_id }
        }
        other => TaskRepositoryError::persistence(other),
    }
}

fn insert_audit(tx_conn: &mut PgConnection, entry: &AuditEntry) -> TaskRepositoryResult<()> {
    diesel::insert_into(audit_log::table)
        .values(NewAuditEntryRow::from_domain(entry))
        .execute(tx_conn)
        .map_err(TaskRepositoryError::persistence)?;
    Ok(())
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task, audit: &AuditEntry) -> TaskRepositoryResult<()> {
        let pool = self.pool.clone();
        let new_row = NewTaskRow::from_domain(task);
        let entry = audit.clone();

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                conn.transaction::<_, TaskRepositoryError, _>(|tx_conn| {
                    diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .execute(tx_conn)
                        .map_err(TaskRepositoryError::persistence)?;
                    insert_audit(tx_conn, &entry)
                })
            },
            TaskRepositoryError::persistence,
        )
        .await
    }

    async fn update(&self, task: &Task, audit: &AuditEntry) -> TaskRepositoryResult<()> {
        let pool = self.pool.clone();
        let task_id = task.id();
        let row = NewTaskRow::from_domain(task);
        let entry = audit.clone();

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                conn.transaction::<_, TaskRepositoryError, _>(|tx_conn| {
                    let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                        .set((
                            tasks::assigned_to.eq(row.assigned_to),
                            tasks::title.eq(row.title.clone()),
                            tasks::description.eq(row.description.clone()),
                            tasks::priority.eq(row.priority.clone()),
                            tasks::start_date.eq(row.start_date),
                            tasks::due_date.eq(row.due_date),
                            tasks::completion_percentage.eq(row.completion_percentage),
                            tasks::completed_at.eq(row.completed_at),
                            tasks::updated_at.eq(row.updated_at),
                        ))
                        .execute(tx_conn)
                        .map_err(TaskRepositoryError::persistence)?;
                    if updated == 0 {
                        return Err(TaskRepositoryError::NotFound(task_id));
                    }
                    insert_audit(tx_conn, &entry)
                })
            },
            TaskRepositoryError::persistence,
        )
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                let row = tasks::table
                    .find(id.into_inner())
                    .select(TaskRow::as_select())
                    .first::<TaskRow>(&mut conn)
                    .optional()
                    .map_err(TaskRepositoryError::persistence)?;
                row.map(row_to_task).transpose()
            },
            TaskRepositoryError::persistence,
        )
        .await
    }

    async fn list(&self, filter: &TaskFilter, page: Page) -> TaskRepositoryResult<Vec<Task>> {
        let pool = self.pool.clone();
        let filter = *filter;

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, TaskRepositoryError::persistence)?;

                let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
                if let Some(status_id) = filter.status_id {
                    query = query.filter(tasks::status_id.eq(status_id.into_inner()));
                }
                if let Some(client_id) = filter.client_id {
                    query = query.filter(tasks::client_id.eq(client_id.into_inner()));
                }
                if let Some(assigned_to) = filter.assigned_to {
                    query = query.filter(tasks::assigned_to.eq(assigned_to.into_inner()));
                }
                if let Some(priority) = filter.priority {
                    query = query.filter(tasks::priority.eq(priority.as_str()));
                }

                let rows = query
                    .order(tasks::created_at.desc())
                    .limit(page.limit_i64())
                    .offset(page.offset_i64())
                    .load::<TaskRow>(&mut conn)
                    .map_err(TaskRepositoryError::persistence)?;

                rows.into_iter().map(row_to_task).collect()
            },
            TaskRepositoryError::persistence,
        )
        .await
    }

    async fn delete(&self, id: TaskId, audit: &AuditEntry) -> TaskRepositoryResult<()> {
        let pool = self.pool.clone();
        let entry = audit.clone();

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                conn.transaction::<_, TaskRepositoryError, _>(|tx_conn| {
                    diesel::delete(
                        task_status_history::table
                            .filter(task_status_history::task_id.eq(id.into_inner())),
                    )
                    .execute(tx_conn)
                    .map_err(TaskRepositoryError::persistence)?;

                    let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                        .execute(tx_conn)
                        .map_err(TaskRepositoryError::persistence)?;
                    if deleted == 0 {
                        return Err(TaskRepositoryError::NotFound(id));
                    }
                    insert_audit(tx_conn, &entry)
                })
            },
            TaskRepositoryError::persistence,
        )
        .await
    }

    async fn change_status(
        &self,
        request: StatusChangeRequest,
    ) -> TaskRepositoryResult<StatusChange> {
        let pool = self.pool.clone();
        let terminal = self.terminal.clone();
        let clock = DefaultClock;

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                conn.transaction::<_, TaskRepositoryError, _>(|tx_conn| {
                    // Lock held until commit or rollback; a concurrent
                    // transition on the same task waits here and then
                    // re-reads the status this one wrote.
                    let row = tasks::table
                        .find(request.task_id.into_inner())
                        .select(TaskRow::as_select())
                        .for_update()
                        .first::<TaskRow>(tx_conn)
                        .optional()
                        .map_err(TaskRepositoryError::persistence)?
                        .ok_or(TaskRepositoryError::NotFound(request.task_id))?;
                    let mut task = row_to_task(row)?;

                    let status_row = statuses::table
                        .find(request.to_status_id.into_inner())
                        .select(StatusRow::as_select())
                        .first::<StatusRow>(tx_conn)
                        .optional()
                        .map_err(TaskRepositoryError::persistence)?
                        .ok_or(TaskRepositoryError::StatusNotFound(request.to_status_id))?;
                    let to_status = row_to_status(status_row)?;

                    let change = task
                        .change_status(
                            &to_status,
                            request.changed_by,
                            request.note.clone(),
                            &terminal,
                            &clock,
                        )
                        .map_err(map_transition_error)?;

                    diesel::update(tasks::table.find(request.task_id.into_inner()))
                        .set((
                            tasks::status_id.eq(task.status_id().into_inner()),
                            tasks::completion_percentage
                                .eq(i16::from(task.completion_percentage().value())),
                            tasks::completed_at.eq(task.completed_at()),
                            tasks::updated_at.eq(task.updated_at()),
                        ))
                        .execute(tx_conn)
                        .map_err(TaskRepositoryError::persistence)?;

                    diesel::insert_into(task_status_history::table)
                        .values(NewStatusChangeRow::from_domain(&change))
                        .execute(tx_conn)
                        .map_err(TaskRepositoryError::persistence)?;

                    insert_audit(tx_conn, &change.audit_entry())?;
                    Ok(change)
                })
            },
            TaskRepositoryError::persistence,
        )
        .await
    }

    async fn history_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<StatusChange>> {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                let rows = task_status_history::table
                    .filter(task_status_history::task_id.eq(task_id.into_inner()))
                    .order(task_status_history::changed_at.asc())
                    .select(StatusChangeRow::as_select())
                    .load::<StatusChangeRow>(&mut conn)
                    .map_err(TaskRepositoryError::persistence)?;
                Ok(rows.into_iter().map(row_to_change).collect())
            },
            TaskRepositoryError::persistence,
        )
        .await
    }
}
