use std::cmp::Reverse;

use chrono::Utc;

use orgguard_audit::{AuditLogEntry, AuditLogRepository, AuditQuery, NewAuditEntry};
use orgguard_directory::RepositoryResult;

use super::table::Table;

/// Append-only audit store. Exposes no way to change or remove an entry.
#[derive(Debug, Default)]
pub struct InMemoryAuditLogRepository {
    table: Table<AuditLogEntry>,
}

impl InMemoryAuditLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every entry in append order (test/inspection helper).
    pub fn entries(&self) -> RepositoryResult<Vec<AuditLogEntry>> {
        self.table.filter(|_| true)
    }
}

impl AuditLogRepository for InMemoryAuditLogRepository {
    fn append(&self, entry: NewAuditEntry) -> RepositoryResult<AuditLogEntry> {
        let mut rows = self.table.write()?;
        let stored = entry.into_entry(self.table.next_id(), Utc::now());
        rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn find_recent(&self, query: &AuditQuery) -> RepositoryResult<Vec<AuditLogEntry>> {
        let mut entries = self.table.filter(|e| {
            query
                .actor_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&e.actor_id))
        })?;
        entries.sort_by_key(|e| Reverse((e.timestamp, e.id)));
        entries.truncate(query.limit);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use orgguard_audit::AuditAction;
    use orgguard_core::UserId;

    #[test]
    fn recent_entries_are_filtered_limited_and_newest_first() {
        let repo = InMemoryAuditLogRepository::new();
        for actor in [1, 2, 1, 1] {
            repo.append(NewAuditEntry::new(UserId::new(actor), AuditAction::Read, "Task"))
                .unwrap();
        }

        let recent = repo
            .find_recent(&AuditQuery {
                actor_ids: Some(BTreeSet::from([UserId::new(1)])),
                limit: 2,
            })
            .unwrap();
        let ids: Vec<i64> = recent.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![4, 3]);

        let all = repo
            .find_recent(&AuditQuery {
                actor_ids: None,
                limit: 100,
            })
            .unwrap();
        assert_eq!(all.len(), 4);
    }
}
