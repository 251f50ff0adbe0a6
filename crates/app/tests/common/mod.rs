#![allow(dead_code)]

use orgguard_app::{RequestContext, Services};
use orgguard_audit::AuditLogEntry;
use orgguard_auth::{IdentityClaim, Role};
use orgguard_core::{OrganizationId, UserId};
use orgguard_directory::{NewUser, UserRepository};
use orgguard_infra::{AppConfig, Fixture, InMemoryStores, seed_fixture};

/// Seeded stores plus services wired over them.
///
/// Fixture layout: TechCorp (owner), Engineering Inc (admin, child of
/// TechCorp), Sales Corp (viewer); one task per organization.
pub struct Harness {
    pub stores: InMemoryStores,
    pub fixture: Fixture,
    pub services: Services,
}

impl Harness {
    pub fn new() -> Self {
        let stores = InMemoryStores::new();
        let fixture = seed_fixture(&stores).expect("seed fixture");
        let services = Services::in_memory(&stores, &AppConfig::default());
        Self {
            stores,
            fixture,
            services,
        }
    }

    pub fn owner(&self) -> RequestContext {
        as_actor(self.fixture.owner, Role::Owner, self.fixture.tech_corp)
    }

    pub fn admin(&self) -> RequestContext {
        as_actor(self.fixture.admin, Role::Admin, self.fixture.engineering)
    }

    pub fn viewer(&self) -> RequestContext {
        as_actor(self.fixture.viewer, Role::Viewer, self.fixture.sales)
    }

    /// Add a user and return a context acting as them.
    pub fn member(&self, email: &str, role: Role, organization_id: OrganizationId) -> RequestContext {
        let user = self
            .stores
            .users
            .insert(NewUser {
                email: email.to_string(),
                name: email.to_string(),
                role,
                organization_id,
            })
            .expect("insert user");
        as_actor(user.id, role, organization_id)
    }

    pub fn audit_entries(&self) -> Vec<AuditLogEntry> {
        self.stores.audit_log.entries().expect("read audit log")
    }
}

pub fn as_actor(subject_id: UserId, role: Role, organization_id: OrganizationId) -> RequestContext {
    RequestContext::authenticated(IdentityClaim::new(subject_id, role, organization_id))
}
