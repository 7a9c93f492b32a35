//! Status catalog records and the terminal-status configuration.

use super::{StatusId, TaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A status tasks can hold, e.g. "Open" or "Done".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    id: StatusId,
    name: String,
}

impl Status {
    /// Creates a status with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyStatusName`] when the name is
    /// empty after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, TaskDomainError> {
        Self::from_parts(StatusId::new(), name)
    }

    /// Reconstructs a status from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyStatusName`] when the name is
    /// empty after trimming.
    pub fn from_parts(id: StatusId, name: impl Into<String>) -> Result<Self, TaskDomainError> {
        Ok(Self {
            id,
            name: validated_name(name)?,
        })
    }

    /// Returns the status identifier.
    #[must_use]
    pub const fn id(&self) -> StatusId {
        self.id
    }

    /// Returns the status name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyStatusName`] when the name is
    /// empty after trimming.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), TaskDomainError> {
        self.name = validated_name(name)?;
        Ok(())
    }
}

fn validated_name(name: impl Into<String>) -> Result<String, TaskDomainError> {
    let raw = name.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyStatusName);
    }
    Ok(trimmed.to_owned())
}

/// The configured name of the status that marks a task as done.
///
/// Injected into the workflow adapters at construction so the terminal
/// label stays a deployment concern (it is locale-specific in the seeded
/// data). A name matching no seeded status simply means no transition is
/// treated as terminal.
///
/// # Examples
///
/// ```
/// use taskledger::task::domain::{Status, TerminalStatus};
///
/// let terminal = TerminalStatus::new("Дууссан");
/// let done = Status::new("Дууссан")?;
/// let open = Status::new("Open")?;
/// assert!(terminal.matches(&done));
/// assert!(!terminal.matches(&open));
/// # Ok::<(), taskledger::task::domain::TaskDomainError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerminalStatus(String);

impl TerminalStatus {
    /// Creates the terminal-status configuration value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns `true` when the status carries the configured terminal
    /// name, compared exactly.
    #[must_use]
    pub fn matches(&self, status: &Status) -> bool {
        status.name() == self.0
    }

    /// Returns the configured name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
