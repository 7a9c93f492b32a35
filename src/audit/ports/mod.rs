//! Port contracts for audit trail queries.

pub mod log;

pub use log::{AuditLogError, AuditLogFilter, AuditLogRepository, AuditLogResult};
