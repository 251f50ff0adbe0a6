use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use orgguard_audit::AuditAction;
use orgguard_auth::Role;
use orgguard_core::UserId;
use orgguard_directory::{ProfileChanges, User, UserRepository};

use crate::{AccessError, AuditEvent, AuthorizationPipeline, Completed, Operation, Outcome, RequestContext};

const USER: &str = "User";

#[derive(Clone)]
pub struct UserService {
    pipeline: Arc<AuthorizationPipeline>,
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(pipeline: Arc<AuthorizationPipeline>, users: Arc<dyn UserRepository>) -> Self {
        Self { pipeline, users }
    }

    /// The caller's own record. Any authenticated role may read it.
    pub fn me(&self, ctx: &RequestContext) -> Result<Completed<User>, AccessError> {
        self.pipeline.run(ctx, Operation::GetProfile, |actor| {
            let user = self
                .users
                .find_by_id(actor.subject_id)?
                .ok_or_else(|| AccessError::not_found(USER, actor.subject_id))?;
            Ok(Outcome::unaudited(user))
        })
    }

    pub fn list(&self, ctx: &RequestContext) -> Result<Completed<Vec<User>>, AccessError> {
        self.pipeline.run(ctx, Operation::ListUsers, |actor| {
            let scope = self
                .pipeline
                .resolver()
                .accessible_organization_ids(actor.organization_id, actor.role)?;
            let users = self.users.find_by_organization_ids(&scope)?;

            let event = AuditEvent::new(AuditAction::Read, USER)
                .details(format!("Fetched {} users", users.len()));
            Ok(Outcome::audited(users, event))
        })
    }

    pub fn get(&self, ctx: &RequestContext, id: UserId) -> Result<Completed<User>, AccessError> {
        self.pipeline.run(ctx, Operation::GetUser, |actor| {
            let user = self.pipeline.guard(actor, USER, id, self.users.find_by_id(id)?)?;

            let event = AuditEvent::new(AuditAction::Read, USER)
                .resource(user.id)
                .details(format!("Viewed user: {}", user.email));
            Ok(Outcome::audited(user, event))
        })
    }

    pub fn update_profile(
        &self,
        ctx: &RequestContext,
        id: UserId,
        changes: ProfileChanges,
    ) -> Result<Completed<User>, AccessError> {
        self.pipeline.run(ctx, Operation::UpdateUser, |actor| {
            let mut user = self.pipeline.guard(actor, USER, id, self.users.find_by_id(id)?)?;
            user.apply_profile(&changes, Utc::now());
            let user = self.users.save(user)?;

            let event = AuditEvent::new(AuditAction::Update, USER)
                .resource(user.id)
                .details(format!("Updated user: {}", user.email));
            Ok(Outcome::audited(user, event))
        })
    }

    /// Reassign a user's role. OWNER only.
    pub fn change_role(
        &self,
        ctx: &RequestContext,
        id: UserId,
        role: Role,
    ) -> Result<Completed<User>, AccessError> {
        self.pipeline.run(ctx, Operation::ChangeUserRole, |actor| {
            let mut user = self.pipeline.guard(actor, USER, id, self.users.find_by_id(id)?)?;
            let previous = user.assign_role(role, Utc::now());
            let user = self.users.save(user)?;
            info!(user_id = %user.id, from = %previous, to = %role, "user role changed");

            let event = AuditEvent::new(AuditAction::Update, USER)
                .resource(user.id)
                .details(format!(
                    "Changed user role from {previous} to {role}: {}",
                    user.email
                ));
            Ok(Outcome::audited(user, event))
        })
    }

    /// Deactivate a user. Callers cannot deactivate themselves.
    pub fn deactivate(&self, ctx: &RequestContext, id: UserId) -> Result<Completed<User>, AccessError> {
        self.pipeline.run(ctx, Operation::DeactivateUser, |actor| {
            if id == actor.subject_id {
                return Err(AccessError::forbidden("cannot deactivate your own account"));
            }
            let mut user = self.pipeline.guard(actor, USER, id, self.users.find_by_id(id)?)?;
            user.deactivate(Utc::now())?;
            let user = self.users.save(user)?;
            info!(user_id = %user.id, "user deactivated");

            let event = AuditEvent::new(AuditAction::Delete, USER)
                .resource(user.id)
                .details(format!("Deactivated user: {}", user.email));
            Ok(Outcome::audited(user, event))
        })
    }
}
