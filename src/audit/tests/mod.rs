//! Unit tests for the audit context.

mod domain_tests;
