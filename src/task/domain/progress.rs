//! Validated completion percentage.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A completion percentage clamped to the 0–100 range at construction.
///
/// # Examples
///
/// ```
/// use taskledger::task::domain::CompletionPercentage;
///
/// let progress = CompletionPercentage::new(40)?;
/// assert_eq!(progress.value(), 40);
/// assert!(!progress.is_complete());
/// assert!(CompletionPercentage::new(101).is_err());
/// # Ok::<(), taskledger::task::domain::TaskDomainError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionPercentage(u8);

impl CompletionPercentage {
    /// No progress recorded.
    pub const ZERO: Self = Self(0);

    /// Fully complete.
    pub const COMPLETE: Self = Self(100);

    /// Creates a validated completion percentage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CompletionPercentageOutOfRange`] when
    /// the value exceeds 100.
    pub const fn new(value: u8) -> Result<Self, TaskDomainError> {
        if value > 100 {
            return Err(TaskDomainError::CompletionPercentageOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` at 100 percent.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.0 == 100
    }
}

impl Default for CompletionPercentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for CompletionPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
