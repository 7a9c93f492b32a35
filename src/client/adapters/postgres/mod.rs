//! `PostgreSQL` implementation of the client repository port using Diesel.

pub mod models;
pub mod schema;

use async_trait::async_trait;
use diesel::prelude::*;

use crate::audit::adapters::postgres::models::NewAuditEntryRow;
use crate::audit::adapters::postgres::schema::audit_log;
use crate::audit::domain::AuditEntry;
use crate::client::domain::{Client, ClientId};
use crate::client::ports::{
    ClientFilter, ClientRepository, ClientRepositoryError, ClientRepositoryResult,
};
use crate::db::{PgPool, get_conn_with, run_blocking_with};
use crate::pagination::Page;
use models::{ClientRow, NewClientRow, row_to_client};
use schema::clients;

/// `PostgreSQL`-backed client repository.
#[derive(Debug, Clone)]
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn store(&self, client: &Client, audit: &AuditEntry) -> ClientRepositoryResult<()> {
        let pool = self.pool.clone();
        let new_row = NewClientRow::from_domain(client);
        let new_audit = NewAuditEntryRow::from_domain(audit);

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, ClientRepositoryError::persistence)?;
                conn.transaction::<_, ClientRepositoryError, _>(|tx_conn| {
                    diesel::insert_into(clients::table)
                        .values(&new_row)
                        .execute(tx_conn)
                        .map_err(ClientRepositoryError::persistence)?;
                    diesel::insert_into(audit_log::table)
                        .values(&new_audit)
                        .execute(tx_conn)
                        .map_err(ClientRepositoryError::persistence)?;
                    Ok(())
                })
            },
            ClientRepositoryError::persistence,
        )
        .await
    }

    async fn update(&self, client: &Client, audit: &AuditEntry) -> ClientRepositoryResult<()> {
        let pool = self.pool.clone();
        let client_id = client.id();
        let new_row = NewClientRow::from_domain(client);
        let new_audit = NewAuditEntryRow::from_domain(audit);

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, ClientRepositoryError::persistence)?;
                conn.transaction::<_, ClientRepositoryError, _>(|tx_conn| {
                    let updated = diesel::update(clients::table.find(client_id.into_inner()))
                        .set((
                            clients::name.eq(new_row.name.clone()),
                            clients::company.eq(new_row.company.clone()),
                            clients::phone.eq(new_row.phone.clone()),
                            clients::email.eq(new_row.email.clone()),
                        ))
                        .execute(tx_conn)
                        .map_err(ClientRepositoryError::persistence)?;
                    if updated == 0 {
                        return Err(ClientRepositoryError::NotFound(client_id));
                    }

                    diesel::insert_into(audit_log::table)
                        .values(&new_audit)
                        .execute(tx_conn)
                        .map_err(ClientRepositoryError::persistence)?;
                    Ok(())
                })
            },
            ClientRepositoryError::persistence,
        )
        .await
    }

    async fn find_by_id(&self, id: ClientId) -> ClientRepositoryResult<Option<Client>> {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, ClientRepositoryError::persistence)?;
                let row = clients::table
                    .find(id.into_inner())
                    .select(ClientRow::as_select())
                    .first::<ClientRow>(&mut conn)
                    .optional()
                    .map_err(ClientRepositoryError::persistence)?;
                Ok(row.map(row_to_client))
            },
            ClientRepositoryError::persistence,
        )
        .await
    }

    async fn list(&self, filter: &ClientFilter, page: Page) -> ClientRepositoryResult<Vec<Client>> {
        let pool = self.pool.clone();
        let query_text = filter.query.clone();

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, ClientRepositoryError::persistence)?;

                let mut query = clients::table.select(ClientRow::as_select()).into_boxed();
                if let Some(text) = query_text {
                    let pattern = format!("%{text}%");
                    query = query.filter(
                        clients::name
                            .ilike(pattern.clone())
                            .or(clients::company.ilike(pattern)),
                    );
                }

                let rows = query
                    .order(clients::created_at.desc())
                    .limit(page.limit_i64())
                    .offset(page.offset_i64())
                    .load::<ClientRow>(&mut conn)
                    .map_err(ClientRepositoryError::persistence)?;

                Ok(rows.into_iter().map(row_to_client).collect())
            },
            ClientRepositoryError::persistence,
        )
        .await
    }

    async fn delete(&self, id: ClientId, audit: &AuditEntry) -> ClientRepositoryResult<()> {
        let pool = self.pool.clone();
        let new_audit = NewAuditEntryRow::from_domain(audit);

        run_blocking_with(
            move || {
                let mut conn = get_conn_with(&pool, ClientRepositoryError::persistence)?;
                conn.transaction::<_, ClientRepositoryError, _>(|tx_conn| {
                    let deleted = diesel::delete(clients::table.find(id.into_inner()))
                        .execute(tx_conn)
                        .map_err(ClientRepositoryError::persistence)?;
                    if deleted == 0 {
                        return Err(ClientRepositoryError::NotFound(id));
                    }

                    diesel::insert_into(audit_log::table)
                        .values(&new_audit)
                        .execute(tx_conn)
                        .map_err(ClientRepositoryError::persistence)?;
                    Ok(())
                })
            },
            ClientRepositoryError::persistence,
        )
        .await
    }
}
