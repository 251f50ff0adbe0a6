use std::collections::BTreeSet;

use chrono::Utc;

use orgguard_core::{OrganizationId, UserId};
use orgguard_directory::{NewUser, RepositoryError, RepositoryResult, User, UserRepository};

use super::table::Table;

/// Users keyed by id; emails are unique (case-insensitive).
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Table<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken<'a>(mut users: impl Iterator<Item = &'a User>, email: &str, except: Option<UserId>) -> bool {
    users.any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        self.table.get(id)
    }

    fn find_by_organization_ids(
        &self,
        organization_ids: &BTreeSet<OrganizationId>,
    ) -> RepositoryResult<Vec<User>> {
        self.table
            .filter(|u| organization_ids.contains(&u.organization_id))
    }

    fn find_ids_by_organization(
        &self,
        organization_id: OrganizationId,
    ) -> RepositoryResult<BTreeSet<UserId>> {
        Ok(self
            .table
            .filter(|u| u.organization_id == organization_id)?
            .into_iter()
            .map(|u| u.id)
            .collect())
    }

    fn insert(&self, input: NewUser) -> RepositoryResult<User> {
        let mut rows = self.table.write()?;
        if email_taken(rows.values(), &input.email, None) {
            return Err(RepositoryError::Conflict(format!(
                "email {} already exists",
                input.email
            )));
        }
        let user = input.into_record(self.table.next_id(), Utc::now());
        rows.insert(user.id, user.clone());
        Ok(user)
    }

    fn save(&self, user: User) -> RepositoryResult<User> {
        let mut rows = self.table.write()?;
        if email_taken(rows.values(), &user.email, Some(user.id)) {
            return Err(RepositoryError::Conflict(format!(
                "email {} already exists",
                user.email
            )));
        }
        match rows.get_mut(&user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user)
            }
            None => Err(RepositoryError::Missing(format!("no user with id {}", user.id))),
        }
    }

    fn count_by_organization(&self, organization_id: OrganizationId) -> RepositoryResult<usize> {
        Ok(self
            .table
            .read()?
            .values()
            .filter(|u| u.organization_id == organization_id)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgguard_auth::Role;

    fn new_user(email: &str, org: i64) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Someone".to_string(),
            role: Role::Viewer,
            organization_id: OrganizationId::new(org),
        }
    }

    #[test]
    fn ids_are_assigned_sequentially() {
        let repo = InMemoryUserRepository::new();
        let a = repo.insert(new_user("a@example.com", 1)).unwrap();
        let b = repo.insert(new_user("b@example.com", 1)).unwrap();
        assert_eq!(a.id, UserId::new(1));
        assert_eq!(b.id, UserId::new(2));
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("a@example.com", 1)).unwrap();
        let err = repo.insert(new_user("A@example.com", 2)).unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[test]
    fn save_rejects_email_of_another_user() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("a@example.com", 1)).unwrap();
        let mut b = repo.insert(new_user("b@example.com", 1)).unwrap();
        b.email = "a@example.com".to_string();
        assert!(matches!(repo.save(b), Err(RepositoryError::Conflict(_))));
    }

    #[test]
    fn members_are_grouped_by_organization() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("a@example.com", 1)).unwrap();
        repo.insert(new_user("b@example.com", 2)).unwrap();
        repo.insert(new_user("c@example.com", 2)).unwrap();

        let ids = repo.find_ids_by_organization(OrganizationId::new(2)).unwrap();
        assert_eq!(ids, BTreeSet::from([UserId::new(2), UserId::new(3)]));
        assert_eq!(repo.count_by_organization(OrganizationId::new(1)).unwrap(), 1);
    }
}
