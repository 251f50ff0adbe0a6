use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orgguard_auth::Role;
use orgguard_core::{DomainError, DomainResult, Entity, OrganizationId, OrganizationScoped, UserId};

/// User record (credentials live with the identity collaborator, not here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub organization_id: OrganizationId,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

impl OrganizationScoped for User {
    fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }
}

impl User {
    pub fn apply_profile(&mut self, changes: &ProfileChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name.as_ref().filter(|n| !n.trim().is_empty()) {
            self.name = name.clone();
        }
        if let Some(email) = changes.email.as_ref().filter(|e| !e.trim().is_empty()) {
            self.email = email.clone();
        }
        self.updated_at = now;
    }

    /// Change the role, returning the previous one.
    pub fn assign_role(&mut self, role: Role, now: DateTime<Utc>) -> Role {
        let previous = self.role;
        self.role = role;
        self.updated_at = now;
        previous
    }

    pub fn deactivate(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.active {
            return Err(DomainError::invariant("user is already deactivated"));
        }
        self.active = false;
        self.updated_at = now;
        Ok(())
    }
}

/// Input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub organization_id: OrganizationId,
}

impl NewUser {
    pub fn into_record(self, id: UserId, now: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email,
            name: self.name,
            role: self.role,
            organization_id: self.organization_id,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial profile update. Blank values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        NewUser {
            email: "admin@example.com".to_string(),
            name: "Admin User".to_string(),
            role: Role::Admin,
            organization_id: OrganizationId::new(2),
        }
        .into_record(UserId::new(2), Utc::now())
    }

    #[test]
    fn blank_profile_fields_are_ignored() {
        let mut u = user();
        u.apply_profile(
            &ProfileChanges {
                name: Some("  ".to_string()),
                email: Some("new@example.com".to_string()),
            },
            Utc::now(),
        );
        assert_eq!(u.name, "Admin User");
        assert_eq!(u.email, "new@example.com");
    }

    #[test]
    fn assign_role_returns_previous() {
        let mut u = user();
        assert_eq!(u.assign_role(Role::Viewer, Utc::now()), Role::Admin);
        assert_eq!(u.role, Role::Viewer);
    }

    #[test]
    fn deactivate_twice_is_rejected() {
        let mut u = user();
        u.deactivate(Utc::now()).unwrap();
        assert!(!u.active);
        assert!(matches!(
            u.deactivate(Utc::now()),
            Err(DomainError::InvariantViolation(_))
        ));
    }
}
