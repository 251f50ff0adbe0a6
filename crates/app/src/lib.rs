//! Request authorization pipeline and the services that run behind it.
//!
//! Layout:
//! - `context.rs`: per-request identity and correlation id
//! - `operations.rs`: the static policy declared for every operation
//! - `pipeline.rs`: authenticate → authorize → scope → execute → audit
//! - `services/`: task, user, organization and audit-log operations
//! - `error.rs`: the error taxonomy surfaced to callers

pub mod context;
pub mod error;
pub mod operations;
pub mod pipeline;
pub mod services;

pub use context::RequestContext;
pub use error::{AccessError, Completed, ErrorKind};
pub use operations::Operation;
pub use pipeline::{AuditEvent, AuthorizationPipeline, Outcome};
pub use services::{
    AuditLogService, OrganizationService, OrganizationSummary, Repositories, Services, TaskService,
    UserService,
};
