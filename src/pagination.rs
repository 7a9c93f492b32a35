//! Limit/offset pagination shared by the list operations.

use serde::{Deserialize, Serialize};

/// A limit/offset window over an ordered listing.
///
/// # Examples
///
/// ```
/// use taskledger::pagination::Page;
///
/// let page = Page::new(20, 40);
/// assert_eq!(page.limit(), 20);
/// assert_eq!(page.offset(), 40);
/// assert_eq!(Page::default().limit(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    limit: u32,
    offset: u32,
}

impl Page {
    /// Default number of records per page.
    pub const DEFAULT_LIMIT: u32 = 50;

    /// Creates a page window with the given limit and offset.
    #[must_use]
    pub const fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Returns the maximum number of records in the window.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns the number of records skipped before the window.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Returns the limit widened for SQL `LIMIT` clauses.
    #[must_use]
    pub const fn limit_i64(self) -> i64 {
        self.limit as i64
    }

    /// Returns the offset widened for SQL `OFFSET` clauses.
    #[must_use]
    pub const fn offset_i64(self) -> i64 {
        self.offset as i64
    }

    /// Returns the limit as an in-memory collection bound.
    #[must_use]
    pub fn limit_usize(self) -> usize {
        usize::try_from(self.limit).unwrap_or(usize::MAX)
    }

    /// Returns the offset as an in-memory collection bound.
    #[must_use]
    pub fn offset_usize(self) -> usize {
        usize::try_from(self.offset).unwrap_or(usize::MAX)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, 0)
    }
}
