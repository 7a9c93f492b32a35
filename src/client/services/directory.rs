//! Service layer for client creation, update, lookup, and deletion.

use crate::audit::domain::{AuditAction, AuditEntry};
use crate::client::domain::{Client, ClientDomainError, ClientId};
use crate::client::ports::{ClientFilter, ClientRepository, ClientRepositoryError};
use crate::pagination::Page;
use crate::user::domain::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a client record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClientRequest {
    name: String,
    company: Option<String>,
    phone: Option<String>,
    email: Option<String>,
}

impl CreateClientRequest {
    /// Creates a request with the required client name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: None,
            phone: None,
            email: None,
        }
    }

    /// Sets the company name.
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Conditional field updates for a client record.
///
/// Only fields set to `Some` are applied; the rest keep their stored
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientUpdate {
    name: Option<String>,
    company: Option<String>,
    phone: Option<String>,
    email: Option<String>,
}

impl ClientUpdate {
    /// Creates an empty update.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            company: None,
            phone: None,
            email: None,
        }
    }

    /// Replaces the client name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the company name.
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Replaces the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Replaces the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Names of the fields this update touches, for the audit detail.
    #[must_use]
    pub fn updated_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.company.is_some() {
            fields.push("company");
        }
        if self.phone.is_some() {
            fields.push("phone");
        }
        if self.email.is_some() {
            fields.push("email");
        }
        fields
    }
}

/// Service-level errors for client directory operations.
#[derive(Debug, Error)]
pub enum ClientDirectoryError {
    /// The client does not exist.
    #[error("client not found: {0}")]
    NotFound(ClientId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ClientDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(ClientRepositoryError),
}

impl From<ClientRepositoryError> for ClientDirectoryError {
    fn from(err: ClientRepositoryError) -> Self {
        match err {
            ClientRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for client directory service operations.
pub type ClientDirectoryResult<T> = Result<T, ClientDirectoryError>;

/// Client directory orchestration service.
#[derive(Clone)]
pub struct ClientDirectoryService<R, C>
where
    R: ClientRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ClientDirectoryService<R, C>
where
    R: ClientRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new client directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new client record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError`] when validation fails or the
    /// repository rejects persistence.
    pub async fn create_client(
        &self,
        request: CreateClientRequest,
        actor: UserId,
    ) -> ClientDirectoryResult<Client> {
        let client = Client::new(
            request.name,
            request.company,
            request.phone,
            request.email,
            &*self.clock,
        )?;

        let entry = AuditEntry::new(
            actor,
            AuditAction::ClientCreated,
            format!("client_id={}, name={}", client.id(), client.name()),
            &*self.clock,
        );
        self.repository.store(&client, &entry).await?;
        tracing::debug!(client_id = %client.id(), "client created");
        Ok(client)
    }

    /// Applies conditional field updates to a client record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError::NotFound`] when the client does
    /// not exist, or a validation/repository error.
    pub async fn update_client(
        &self,
        id: ClientId,
        update: ClientUpdate,
        actor: UserId,
    ) -> ClientDirectoryResult<Client> {
        let mut client = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ClientDirectoryError::NotFound(id))?;

        let fields = update.updated_fields();
        if let Some(name) = update.name {
            client.rename(name)?;
        }
        if let Some(company) = update.company {
            client.set_company(company);
        }
        if let Some(phone) = update.phone {
            client.set_phone(phone);
        }
        if let Some(email) = update.email {
            client.set_email(email);
        }

        let entry = AuditEntry::new(
            actor,
            AuditAction::ClientUpdated,
            format!("client_id={id}, fields=[{}]", fields.join(", ")),
            &*self.clock,
        );
        self.repository.update(&client, &entry).await?;
        Ok(client)
    }

    /// Retrieves a client by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError::NotFound`] when the client does
    /// not exist.
    pub async fn get_client(&self, id: ClientId) -> ClientDirectoryResult<Client> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ClientDirectoryError::NotFound(id))
    }

    /// Lists clients matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing cannot be retrieved.
    pub async fn list_clients(
        &self,
        filter: &ClientFilter,
        page: Page,
    ) -> ClientDirectoryResult<Vec<Client>> {
        Ok(self.repository.list(filter, page).await?)
    }

    /// Deletes a client record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError::NotFound`] when the client does
    /// not exist.
    pub async fn delete_client(
        &self,
        id: ClientId,
        actor: UserId,
    ) -> ClientDirectoryResult<()> {
        let entry = AuditEntry::new(
            actor,
            AuditAction::ClientDeleted,
            format!("client_id={id}"),
            &*self.clock,
        );
        self.repository.delete(id, &entry).await?;
        Ok(())
    }
}
