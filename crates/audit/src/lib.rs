//! Append-only audit trail of security-relevant actions.

pub mod entry;
pub mod error;
pub mod recorder;
pub mod store;

pub use entry::{AuditAction, AuditLogEntry, NewAuditEntry};
pub use error::AuditError;
pub use recorder::{AuditFilter, AuditRecorder};
pub use store::{AuditLogRepository, AuditQuery};
