//! Demo/test fixture: three organizations, one user per role, a few tasks.

use tracing::info;

use orgguard_auth::Role;
use orgguard_core::{OrganizationId, TaskId, UserId};
use orgguard_directory::{
    NewOrganization, NewTask, NewUser, OrganizationRepository, RepositoryResult, TaskCategory,
    TaskRepository, TaskStatus, UserRepository,
};

use crate::InMemoryStores;

/// Ids of the seeded records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    pub tech_corp: OrganizationId,
    pub engineering: OrganizationId,
    pub sales: OrganizationId,
    pub owner: UserId,
    pub admin: UserId,
    pub viewer: UserId,
    pub tech_task: TaskId,
    pub engineering_task: TaskId,
    pub sales_task: TaskId,
}

pub fn seed_fixture(stores: &InMemoryStores) -> RepositoryResult<Fixture> {
    let tech_corp = stores.organizations.insert(NewOrganization::new("TechCorp"))?.id;
    let engineering = stores
        .organizations
        .insert(NewOrganization::new("Engineering Inc").with_parent(tech_corp))?
        .id;
    let sales = stores.organizations.insert(NewOrganization::new("Sales Corp"))?.id;

    let owner = stores
        .users
        .insert(member("owner@example.com", "Owner User", Role::Owner, tech_corp))?
        .id;
    let admin = stores
        .users
        .insert(member("admin@example.com", "Admin User", Role::Admin, engineering))?
        .id;
    let viewer = stores
        .users
        .insert(member("viewer@example.com", "Viewer User", Role::Viewer, sales))?
        .id;

    let tech_task = stores
        .tasks
        .insert(NewTask::new("Quarterly roadmap", TaskCategory::Work), owner, tech_corp)?
        .id;
    let mut release = NewTask::new("Cut release 1.4", TaskCategory::Urgent);
    release.status = Some(TaskStatus::InProgress);
    release.priority = Some(8);
    let engineering_task = stores.tasks.insert(release, admin, engineering)?.id;
    let sales_task = stores
        .tasks
        .insert(NewTask::new("Renew partner contracts", TaskCategory::Other), owner, sales)?
        .id;

    info!(organizations = 3, users = 3, tasks = 3, "seeded fixture data");

    Ok(Fixture {
        tech_corp,
        engineering,
        sales,
        owner,
        admin,
        viewer,
        tech_task,
        engineering_task,
        sales_task,
    })
}

fn member(email: &str, name: &str, role: Role, organization_id: OrganizationId) -> NewUser {
    NewUser {
        email: email.to_string(),
        name: name.to_string(),
        role,
        organization_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_one_user_per_role() {
        let stores = InMemoryStores::new();
        let fixture = seed_fixture(&stores).unwrap();

        assert_eq!(stores.organizations.find_all().unwrap().len(), 3);
        let admin = stores.users.find_by_id(fixture.admin).unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.organization_id, fixture.engineering);
        let engineering = stores.organizations.find_by_id(fixture.engineering).unwrap().unwrap();
        assert_eq!(engineering.parent_id, Some(fixture.tech_corp));
    }

    #[test]
    fn seeding_twice_conflicts_on_email() {
        let stores = InMemoryStores::new();
        seed_fixture(&stores).unwrap();
        assert!(seed_fixture(&stores).is_err());
    }
}
