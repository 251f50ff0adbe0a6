use std::sync::Arc;

use orgguard_audit::{AuditFilter, AuditLogEntry};

use crate::{AccessError, AuthorizationPipeline, Completed, Operation, Outcome, RequestContext};

#[derive(Clone)]
pub struct AuditLogService {
    pipeline: Arc<AuthorizationPipeline>,
    recent_limit: usize,
}

impl AuditLogService {
    pub fn new(pipeline: Arc<AuthorizationPipeline>, recent_limit: usize) -> Self {
        Self {
            pipeline,
            recent_limit,
        }
    }

    /// Most recent entries visible to the caller, newest first.
    ///
    /// Reading the audit trail is not itself audited.
    pub fn recent(&self, ctx: &RequestContext) -> Result<Completed<Vec<AuditLogEntry>>, AccessError> {
        self.pipeline.run(ctx, Operation::ListAuditLog, |actor| {
            let filter = AuditFilter {
                actor_role: actor.role,
                actor_org: actor.organization_id,
            };
            let entries = self.pipeline.audit().find_recent(self.recent_limit, filter)?;
            Ok(Outcome::unaudited(entries))
        })
    }
}
