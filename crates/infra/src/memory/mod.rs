//! In-memory repositories for tests and the demo binary.
//!
//! Not optimized for volume: filters are linear scans over a `BTreeMap`.

mod audit_log;
mod organizations;
mod table;
mod tasks;
mod users;

use std::sync::Arc;

pub use audit_log::InMemoryAuditLogRepository;
pub use organizations::InMemoryOrganizationRepository;
pub use tasks::InMemoryTaskRepository;
pub use users::InMemoryUserRepository;

/// One in-memory repository per record shape, shared behind `Arc`s.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStores {
    pub organizations: Arc<InMemoryOrganizationRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub audit_log: Arc<InMemoryAuditLogRepository>,
}

impl InMemoryStores {
    pub fn new() -> Self {
        Self::default()
    }
}
