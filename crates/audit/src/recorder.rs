use std::sync::Arc;

use tracing::{debug, error};

use orgguard_auth::{OrganizationScope, Role, organization_scope};
use orgguard_core::{OrganizationId, UserId};
use orgguard_directory::UserRepository;

use crate::{AuditAction, AuditError, AuditLogEntry, AuditLogRepository, AuditQuery, NewAuditEntry};

/// Who is reading the audit trail.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AuditFilter {
    pub actor_role: Role,
    pub actor_org: OrganizationId,
}

/// Owns the audit store: appends entries and serves scoped reads.
#[derive(Clone)]
pub struct AuditRecorder {
    log: Arc<dyn AuditLogRepository>,
    users: Arc<dyn UserRepository>,
}

impl AuditRecorder {
    pub fn new(log: Arc<dyn AuditLogRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { log, users }
    }

    pub fn record(
        &self,
        actor_id: UserId,
        action: AuditAction,
        resource_kind: &str,
        resource_id: Option<i64>,
        details: Option<&str>,
    ) -> Result<AuditLogEntry, AuditError> {
        let mut entry = NewAuditEntry::new(actor_id, action, resource_kind);
        entry.resource_id = resource_id;
        entry.details = details.map(str::to_string);
        self.record_entry(entry)
    }

    /// Append a prepared entry.
    ///
    /// A failure is logged here as well as returned, so it reaches an
    /// operator even if the caller only attaches it to its result.
    pub fn record_entry(&self, entry: NewAuditEntry) -> Result<AuditLogEntry, AuditError> {
        let actor_id = entry.actor_id;
        let action = entry.action;
        match self.log.append(entry) {
            Ok(stored) => {
                debug!(
                    audit_id = %stored.id,
                    actor_id = %actor_id,
                    action = %action,
                    resource_kind = %stored.resource_kind,
                    "audit entry recorded"
                );
                Ok(stored)
            }
            Err(e) => {
                error!(actor_id = %actor_id, action = %action, error = %e, "audit write failed");
                Err(AuditError::WriteFailed(e))
            }
        }
    }

    /// Most recent entries visible to the reader, newest first.
    ///
    /// OWNER sees every entry. Anyone else sees entries whose actor belongs
    /// to the reader's organization, resolved in two steps: organization →
    /// member ids, then entries by those ids.
    pub fn find_recent(
        &self,
        limit: usize,
        filter: AuditFilter,
    ) -> Result<Vec<AuditLogEntry>, AuditError> {
        let actor_ids = match organization_scope(filter.actor_org, filter.actor_role) {
            OrganizationScope::All => None,
            OrganizationScope::Only(org) => Some(
                self.users
                    .find_ids_by_organization(org)
                    .map_err(AuditError::ReadFailed)?,
            ),
        };

        let query = AuditQuery { actor_ids, limit };
        self.log.find_recent(&query).map_err(AuditError::ReadFailed)
    }
}
