//! Unit tests for the user context.
