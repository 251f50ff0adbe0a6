//! `orgguard-core`: shared identifiers and record primitives.
//!
//! Pure building blocks only: no storage, no policy, no I/O.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Entity, OrganizationScoped};
pub use error::{DomainError, DomainResult};
pub use id::{AuditLogId, OrganizationId, TaskId, UserId};
