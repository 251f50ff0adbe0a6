use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use orgguard_auth::{OrganizationScope, Role, can_access_organization, organization_scope};
use orgguard_core::OrganizationId;

use crate::repository::{OrganizationRepository, RepositoryResult};

/// Resolves which organizations an actor may see.
///
/// Nothing is cached: an OWNER-scoped listing rescans the organization
/// repository on every call so newly created organizations show up at once.
#[derive(Clone)]
pub struct OrganizationAccessResolver {
    organizations: Arc<dyn OrganizationRepository>,
}

impl OrganizationAccessResolver {
    pub fn new(organizations: Arc<dyn OrganizationRepository>) -> Self {
        Self { organizations }
    }

    /// Point check for one record's owning organization. Never touches storage.
    pub fn can_access_organization(
        &self,
        actor_org: OrganizationId,
        target_org: OrganizationId,
        actor_role: Role,
    ) -> bool {
        can_access_organization(actor_org, target_org, actor_role)
    }

    /// Ids usable as an `organization_id IN (...)` filter.
    ///
    /// OWNER gets every organization currently stored; every other role gets
    /// its own organization only.
    pub fn accessible_organization_ids(
        &self,
        actor_org: OrganizationId,
        actor_role: Role,
    ) -> RepositoryResult<BTreeSet<OrganizationId>> {
        match organization_scope(actor_org, actor_role) {
            OrganizationScope::All => {
                let ids: BTreeSet<OrganizationId> = self
                    .organizations
                    .find_all()?
                    .into_iter()
                    .map(|org| org.id)
                    .collect();
                debug!(count = ids.len(), "expanded owner scope to all organizations");
                Ok(ids)
            }
            OrganizationScope::Only(own) => Ok(BTreeSet::from([own])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::Utc;

    use crate::{NewOrganization, Organization, RepositoryError};

    #[derive(Default)]
    struct FixedOrganizations {
        rows: Mutex<Vec<Organization>>,
        scans: Mutex<usize>,
    }

    impl FixedOrganizations {
        fn with(names: &[&str]) -> Self {
            let repo = Self::default();
            for name in names {
                repo.insert(NewOrganization::new(*name)).unwrap();
            }
            repo
        }
    }

    impl OrganizationRepository for FixedOrganizations {
        fn find_by_id(&self, id: OrganizationId) -> RepositoryResult<Option<Organization>> {
            Ok(self.rows.lock().unwrap().iter().find(|o| o.id == id).cloned())
        }

        fn find_all(&self) -> RepositoryResult<Vec<Organization>> {
            *self.scans.lock().unwrap() += 1;
            Ok(self.rows.lock().unwrap().clone())
        }

        fn find_by_ids(&self, ids: &BTreeSet<OrganizationId>) -> RepositoryResult<Vec<Organization>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|o| ids.contains(&o.id))
                .cloned()
                .collect())
        }

        fn insert(&self, input: NewOrganization) -> RepositoryResult<Organization> {
            let mut rows = self.rows.lock().unwrap();
            let id = OrganizationId::new(rows.len() as i64 + 1);
            let org = input.into_record(id, Utc::now());
            rows.push(org.clone());
            Ok(org)
        }
    }

    struct BrokenOrganizations;

    impl OrganizationRepository for BrokenOrganizations {
        fn find_by_id(&self, _id: OrganizationId) -> RepositoryResult<Option<Organization>> {
            Err(RepositoryError::Unavailable("down".to_string()))
        }

        fn find_all(&self) -> RepositoryResult<Vec<Organization>> {
            Err(RepositoryError::Unavailable("down".to_string()))
        }

        fn find_by_ids(&self, _ids: &BTreeSet<OrganizationId>) -> RepositoryResult<Vec<Organization>> {
            Err(RepositoryError::Unavailable("down".to_string()))
        }

        fn insert(&self, _input: NewOrganization) -> RepositoryResult<Organization> {
            Err(RepositoryError::Unavailable("down".to_string()))
        }
    }

    #[test]
    fn owner_sees_every_organization() {
        let repo = Arc::new(FixedOrganizations::with(&["TechCorp", "Engineering Inc", "Sales Corp"]));
        let resolver = OrganizationAccessResolver::new(repo.clone());

        let ids = resolver
            .accessible_organization_ids(OrganizationId::new(1), Role::Owner)
            .unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(*repo.scans.lock().unwrap(), 1);
    }

    #[test]
    fn owner_scope_is_recomputed_each_call() {
        let repo = Arc::new(FixedOrganizations::with(&["TechCorp"]));
        let resolver = OrganizationAccessResolver::new(repo.clone());
        let own = OrganizationId::new(1);

        assert_eq!(resolver.accessible_organization_ids(own, Role::Owner).unwrap().len(), 1);
        repo.insert(NewOrganization::new("Late Arrival")).unwrap();
        assert_eq!(resolver.accessible_organization_ids(own, Role::Owner).unwrap().len(), 2);
    }

    #[test]
    fn non_owners_get_their_own_organization_without_a_scan() {
        let repo = Arc::new(FixedOrganizations::with(&["TechCorp", "Engineering Inc"]));
        let resolver = OrganizationAccessResolver::new(repo.clone());
        let own = OrganizationId::new(2);

        for role in [Role::Admin, Role::Viewer] {
            let ids = resolver.accessible_organization_ids(own, role).unwrap();
            assert_eq!(ids, BTreeSet::from([own]));
        }
        assert_eq!(*repo.scans.lock().unwrap(), 0);
    }

    #[test]
    fn storage_failure_propagates_for_owner_only() {
        let resolver = OrganizationAccessResolver::new(Arc::new(BrokenOrganizations));
        let own = OrganizationId::new(1);

        assert!(resolver.accessible_organization_ids(own, Role::Owner).is_err());
        assert!(resolver.accessible_organization_ids(own, Role::Admin).is_ok());
        assert!(resolver.can_access_organization(own, own, Role::Viewer));
    }
}
