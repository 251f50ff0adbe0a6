//! The per-request authorization pipeline.
//!
//! Every operation runs the same sequence:
//!
//! 1. authenticate: an identity claim is present (unless the policy is public)
//! 2. authorize: the claim satisfies the operation's declared policy
//! 3. scope: list reads are narrowed to accessible organization ids
//! 4. guard: single-record access checks existence, then organization access
//! 5. execute the business logic
//! 6. audit: append an entry for the completed operation
//!
//! Steps 1-2 happen here before any storage is touched. Steps 3-5 run inside
//! the operation body with the helpers below. Step 6 runs after the body
//! succeeded; its failure never turns a completed operation into an error.

use std::sync::Arc;

use tracing::{Span, debug, field, instrument, warn};

use orgguard_audit::{AuditAction, AuditRecorder, NewAuditEntry};
use orgguard_auth::{
    IdentityClaim, OperationPolicy, RolePermissionMap, authorize, explain_authorization,
};
use orgguard_core::OrganizationScoped;
use orgguard_directory::OrganizationAccessResolver;

use crate::{AccessError, Completed, RequestContext};

/// Audit entry produced by an operation body. The actor, request address
/// and timestamp are filled in by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub resource_kind: &'static str,
    pub resource_id: Option<i64>,
    pub details: Option<String>,
}

impl AuditEvent {
    pub fn new(action: AuditAction, resource_kind: &'static str) -> Self {
        Self {
            action,
            resource_kind,
            resource_id: None,
            details: None,
        }
    }

    pub fn resource(mut self, id: impl Into<i64>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// What an operation body hands back to the pipeline.
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub audit: Option<AuditEvent>,
}

impl<T> Outcome<T> {
    pub fn audited(value: T, event: AuditEvent) -> Self {
        Self {
            value,
            audit: Some(event),
        }
    }

    pub fn unaudited(value: T) -> Self {
        Self { value, audit: None }
    }
}

#[derive(Clone)]
pub struct AuthorizationPipeline {
    registry: Arc<RolePermissionMap>,
    resolver: OrganizationAccessResolver,
    audit: AuditRecorder,
}

impl AuthorizationPipeline {
    pub fn new(
        registry: Arc<RolePermissionMap>,
        resolver: OrganizationAccessResolver,
        audit: AuditRecorder,
    ) -> Self {
        Self {
            registry,
            resolver,
            audit,
        }
    }

    pub fn registry(&self) -> &RolePermissionMap {
        &self.registry
    }

    pub fn resolver(&self) -> &OrganizationAccessResolver {
        &self.resolver
    }

    pub fn audit(&self) -> &AuditRecorder {
        &self.audit
    }

    /// Steps 1-2. Returns the caller's claim, which is `None` only for an
    /// anonymous caller of a public operation.
    pub fn authorize(
        &self,
        ctx: &RequestContext,
        operation: &impl OperationPolicy,
    ) -> Result<Option<IdentityClaim>, AccessError> {
        let policy = operation.policy();
        let claim = ctx.claim();

        if let Err(reason) = authorize(&self.registry, claim, &policy).into_result() {
            let explanation = explain_authorization(&self.registry, claim, &policy);
            warn!(
                operation = operation.operation_name(),
                policy = %policy,
                reason = %explanation.reason,
                "request denied"
            );
            if let Some(denial) = &explanation.denial_reason {
                debug!(suggestions = ?denial.suggestions, "denial details");
            }
            return Err(reason.into());
        }

        Ok(claim.copied())
    }

    /// Run an operation that needs an authenticated actor.
    ///
    /// A public operation invoked anonymously has no actor to run as and is
    /// rejected as unauthenticated; call [`Self::authorize`] directly for
    /// operations that tolerate an anonymous caller.
    #[instrument(
        name = "operation",
        skip_all,
        fields(
            operation = operation.operation_name(),
            request_id = %ctx.request_id(),
            actor_id = field::Empty,
            actor_role = field::Empty
        )
    )]
    pub fn run<O, T, F>(
        &self,
        ctx: &RequestContext,
        operation: O,
        body: F,
    ) -> Result<Completed<T>, AccessError>
    where
        O: OperationPolicy,
        F: FnOnce(&IdentityClaim) -> Result<Outcome<T>, AccessError>,
    {
        let actor = self
            .authorize(ctx, &operation)?
            .ok_or(AccessError::Unauthenticated)?;

        let span = Span::current();
        span.record("actor_id", field::display(actor.subject_id));
        span.record("actor_role", field::display(actor.role));

        let outcome = body(&actor).inspect_err(|e| {
            debug!(error = %e, "operation failed");
        })?;

        let audit_failure = outcome
            .audit
            .and_then(|event| self.record(ctx, &actor, event).err());

        Ok(Completed {
            value: outcome.value,
            audit_failure,
        })
    }

    /// Step 4 for one looked-up record.
    ///
    /// A missing record is reported before an inaccessible one; a record in
    /// another organization is forbidden, never reported as missing.
    pub fn guard<R: OrganizationScoped>(
        &self,
        actor: &IdentityClaim,
        kind: &'static str,
        id: impl core::fmt::Display,
        found: Option<R>,
    ) -> Result<R, AccessError> {
        let Some(record) = found else {
            return Err(AccessError::not_found(kind, id));
        };

        let target = record.organization_id();
        if !self
            .resolver
            .can_access_organization(actor.organization_id, target, actor.role)
        {
            warn!(
                resource_kind = kind,
                resource_id = %id,
                actor_org = %actor.organization_id,
                target_org = %target,
                "cross-organization access denied"
            );
            return Err(AccessError::forbidden(format!(
                "access to {kind} {id} is outside your organization"
            )));
        }

        Ok(record)
    }

    fn record(
        &self,
        ctx: &RequestContext,
        actor: &IdentityClaim,
        event: AuditEvent,
    ) -> Result<(), orgguard_audit::AuditError> {
        let mut entry = NewAuditEntry::new(actor.subject_id, event.action, event.resource_kind);
        entry.resource_id = event.resource_id;
        entry.details = event.details;
        if let Some(ip) = ctx.ip_address() {
            entry = entry.ip_address(ip);
        }
        self.audit.record_entry(entry).map(|_| ())
    }
}
