use std::collections::BTreeSet;

use chrono::Utc;

use orgguard_core::OrganizationId;
use orgguard_directory::{
    NewOrganization, Organization, OrganizationRepository, RepositoryError, RepositoryResult,
};

use super::table::Table;

#[derive(Debug, Default)]
pub struct InMemoryOrganizationRepository {
    table: Table<Organization>,
}

impl InMemoryOrganizationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrganizationRepository for InMemoryOrganizationRepository {
    fn find_by_id(&self, id: OrganizationId) -> RepositoryResult<Option<Organization>> {
        self.table.get(id)
    }

    fn find_all(&self) -> RepositoryResult<Vec<Organization>> {
        self.table.filter(|_| true)
    }

    fn find_by_ids(&self, ids: &BTreeSet<OrganizationId>) -> RepositoryResult<Vec<Organization>> {
        self.table.filter(|org| ids.contains(&org.id))
    }

    fn insert(&self, input: NewOrganization) -> RepositoryResult<Organization> {
        let mut rows = self.table.write()?;
        if let Some(parent) = input.parent_id {
            if !rows.contains_key(&parent) {
                return Err(RepositoryError::Missing(format!(
                    "parent organization {parent} does not exist"
                )));
            }
        }
        let org = input.into_record(self.table.next_id(), Utc::now());
        rows.insert(org.id, org.clone());
        Ok(org)
    }
}
