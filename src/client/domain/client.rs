//! Client aggregate root.

use super::{ClientDomainError, ClientId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Client aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    name: String,
    company: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted client aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedClientData {
    /// Persisted client identifier.
    pub id: ClientId,
    /// Persisted client name.
    pub name: String,
    /// Persisted company name, if any.
    pub company: Option<String>,
    /// Persisted phone number, if any.
    pub phone: Option<String>,
    /// Persisted email address, if any.
    pub email: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Creates a new client record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(
        name: impl Into<String>,
        company: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, ClientDomainError> {
        Ok(Self {
            id: ClientId::new(),
            name: validated_name(name)?,
            company,
            phone,
            email,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a client from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedClientData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            company: data.company,
            phone: data.phone,
            email: data.email,
            created_at: data.created_at,
        }
    }

    /// Returns the client identifier.
    #[must_use]
    pub const fn id(&self) -> ClientId {
        self.id
    }

    /// Returns the client name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the company name, if any.
    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    /// Returns the phone number, if any.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the email address, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Renames the client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ClientDomainError> {
        self.name = validated_name(name)?;
        Ok(())
    }

    /// Sets the company name.
    pub fn set_company(&mut self, company: impl Into<String>) {
        self.company = Some(company.into());
    }

    /// Sets the phone number.
    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = Some(phone.into());
    }

    /// Sets the email address.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = Some(email.into());
    }

    /// Returns `true` when the query matches the name or company,
    /// case-insensitively.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .company
                .as_ref()
                .is_some_and(|company| company.to_lowercase().contains(&needle))
    }
}

fn validated_name(name: impl Into<String>) -> Result<String, ClientDomainError> {
    let raw = name.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}
