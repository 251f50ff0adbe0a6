use std::collections::BTreeSet;

use orgguard_core::UserId;
use orgguard_directory::RepositoryResult;

use crate::{AuditLogEntry, NewAuditEntry};

/// Read filter for the audit store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditQuery {
    /// Restrict to these actors; `None` means every actor.
    pub actor_ids: Option<BTreeSet<UserId>>,
    pub limit: usize,
}

/// Append-only audit storage.
///
/// There is no update or delete: entries live forever once appended.
pub trait AuditLogRepository: Send + Sync {
    /// Persist a new entry, assigning its id and timestamp.
    fn append(&self, entry: NewAuditEntry) -> RepositoryResult<AuditLogEntry>;

    /// Matching entries, newest first, at most `query.limit` of them.
    fn find_recent(&self, query: &AuditQuery) -> RepositoryResult<Vec<AuditLogEntry>>;
}
