use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use orgguard_audit::AuditAction;
use orgguard_core::OrganizationId;
use orgguard_directory::{
    NewOrganization, Organization, OrganizationRepository, TaskRepository, UserRepository,
};

use crate::{AccessError, AuditEvent, AuthorizationPipeline, Completed, Operation, Outcome, RequestContext};

const ORGANIZATION: &str = "Organization";

/// An organization with the number of records it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationSummary {
    #[serde(flatten)]
    pub organization: Organization,
    pub member_count: usize,
    pub task_count: usize,
}

#[derive(Clone)]
pub struct OrganizationService {
    pipeline: Arc<AuthorizationPipeline>,
    organizations: Arc<dyn OrganizationRepository>,
    users: Arc<dyn UserRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl OrganizationService {
    pub fn new(
        pipeline: Arc<AuthorizationPipeline>,
        organizations: Arc<dyn OrganizationRepository>,
        users: Arc<dyn UserRepository>,
        tasks: Arc<dyn TaskRepository>,
    ) -> Self {
        Self {
            pipeline,
            organizations,
            users,
            tasks,
        }
    }

    /// Create an organization. New organizations become visible to OWNER
    /// listings on the next request.
    pub fn create(
        &self,
        ctx: &RequestContext,
        input: NewOrganization,
    ) -> Result<Completed<Organization>, AccessError> {
        self.pipeline.run(ctx, Operation::CreateOrganization, |_actor| {
            input.validate()?;
            if let Some(parent) = input.parent_id {
                if self.organizations.find_by_id(parent)?.is_none() {
                    return Err(AccessError::not_found(ORGANIZATION, parent));
                }
            }

            let organization = self.organizations.insert(input)?;
            info!(organization_id = %organization.id, name = %organization.name, "organization created");

            let event = AuditEvent::new(AuditAction::Create, ORGANIZATION)
                .resource(organization.id)
                .details(format!("Created organization: {}", organization.name));
            Ok(Outcome::audited(organization, event))
        })
    }

    pub fn list(&self, ctx: &RequestContext) -> Result<Completed<Vec<Organization>>, AccessError> {
        self.pipeline.run(ctx, Operation::ListOrganizations, |actor| {
            let scope = self
                .pipeline
                .resolver()
                .accessible_organization_ids(actor.organization_id, actor.role)?;
            let organizations = self.organizations.find_by_ids(&scope)?;

            let event = AuditEvent::new(AuditAction::Read, ORGANIZATION)
                .details(format!("Fetched {} organizations", organizations.len()));
            Ok(Outcome::audited(organizations, event))
        })
    }

    pub fn get(
        &self,
        ctx: &RequestContext,
        id: OrganizationId,
    ) -> Result<Completed<OrganizationSummary>, AccessError> {
        self.pipeline.run(ctx, Operation::GetOrganization, |actor| {
            let organization = self.organizations.find_by_id(id)?;
            let organization = self.pipeline.guard(actor, ORGANIZATION, id, organization)?;
            let summary = OrganizationSummary {
                member_count: self.users.count_by_organization(id)?,
                task_count: self.tasks.count_by_organization(id)?,
                organization,
            };

            let event = AuditEvent::new(AuditAction::Read, ORGANIZATION)
                .resource(id)
                .details(format!("Viewed organization: {}", summary.organization.name));
            Ok(Outcome::audited(summary, event))
        })
    }
}
