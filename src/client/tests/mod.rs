//! Unit tests for the client context.

mod domain_tests;
