//! Diesel row models for client directory persistence.

use super::schema::clients;
use crate::client::domain::{Client, ClientId, PersistedClientData};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for client records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClientRow {
    /// Client identifier.
    pub id: uuid::Uuid,
    /// Client name.
    pub name: String,
    /// Optional company name.
    pub company: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional email address.
    pub email: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for client records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clients)]
pub struct NewClientRow {
    /// Client identifier.
    pub id: uuid::Uuid,
    /// Client name.
    pub name: String,
    /// Optional company name.
    pub company: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional email address.
    pub email: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewClientRow {
    /// Builds an insert row from a domain client.
    #[must_use]
    pub fn from_domain(client: &Client) -> Self {
        Self {
            id: client.id().into_inner(),
            name: client.name().to_owned(),
            company: client.company().map(str::to_owned),
            phone: client.phone().map(str::to_owned),
            email: client.email().map(str::to_owned),
            created_at: client.created_at(),
        }
    }
}

/// Maps a stored row back to the domain client.
#[must_use]
pub fn row_to_client(row: ClientRow) -> Client {
    Client::from_persisted(PersistedClientData {
        id: ClientId::from_uuid(row.id),
        name: row.name,
        company: row.company,
        phone: row.phone,
        email: row.email,
        created_at: row.created_at,
    })
}
