//! Operations exposed to callers, each run through the authorization pipeline.

mod audit_log;
mod organizations;
mod tasks;
mod users;

use std::sync::Arc;

use orgguard_audit::{AuditLogRepository, AuditRecorder};
use orgguard_auth::RolePermissionMap;
use orgguard_directory::{
    OrganizationAccessResolver, OrganizationRepository, TaskRepository, UserRepository,
};
use orgguard_infra::{AppConfig, InMemoryStores};

pub use audit_log::AuditLogService;
pub use organizations::{OrganizationService, OrganizationSummary};
pub use tasks::TaskService;
pub use users::UserService;

use crate::AuthorizationPipeline;

/// Storage handles the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub organizations: Arc<dyn OrganizationRepository>,
    pub users: Arc<dyn UserRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub audit_log: Arc<dyn AuditLogRepository>,
}

impl From<&InMemoryStores> for Repositories {
    fn from(stores: &InMemoryStores) -> Self {
        Self {
            organizations: stores.organizations.clone(),
            users: stores.users.clone(),
            tasks: stores.tasks.clone(),
            audit_log: stores.audit_log.clone(),
        }
    }
}

/// All services wired to one pipeline.
#[derive(Clone)]
pub struct Services {
    pub tasks: TaskService,
    pub users: UserService,
    pub organizations: OrganizationService,
    pub audit_log: AuditLogService,
    pipeline: Arc<AuthorizationPipeline>,
}

impl Services {
    pub fn new(repositories: Repositories, registry: RolePermissionMap, config: &AppConfig) -> Self {
        let resolver = OrganizationAccessResolver::new(repositories.organizations.clone());
        let recorder = AuditRecorder::new(repositories.audit_log, repositories.users.clone());
        let pipeline = Arc::new(AuthorizationPipeline::new(
            Arc::new(registry),
            resolver,
            recorder,
        ));

        Self {
            tasks: TaskService::new(
                pipeline.clone(),
                repositories.tasks.clone(),
                repositories.organizations.clone(),
            ),
            users: UserService::new(pipeline.clone(), repositories.users.clone()),
            organizations: OrganizationService::new(
                pipeline.clone(),
                repositories.organizations,
                repositories.users,
                repositories.tasks,
            ),
            audit_log: AuditLogService::new(pipeline.clone(), config.audit.recent_limit),
            pipeline,
        }
    }

    /// Services over in-memory storage with the standard role grants.
    pub fn in_memory(stores: &InMemoryStores, config: &AppConfig) -> Self {
        Self::new(stores.into(), RolePermissionMap::standard(), config)
    }

    pub fn pipeline(&self) -> &AuthorizationPipeline {
        &self.pipeline
    }
}
