use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orgguard_core::{DomainError, DomainResult, Entity, OrganizationId, OrganizationScoped};

/// Organization record.
///
/// `parent_id` is stored and must reference an existing organization, but
/// access control never walks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub parent_id: Option<OrganizationId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Organization {
    type Id = OrganizationId;

    fn id(&self) -> OrganizationId {
        self.id
    }
}

impl OrganizationScoped for Organization {
    fn organization_id(&self) -> OrganizationId {
        self.id
    }
}

/// Input for creating an organization (id assigned by storage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub parent_id: Option<OrganizationId>,
}

impl NewOrganization {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: OrganizationId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("organization name cannot be empty"));
        }
        Ok(())
    }

    pub fn into_record(self, id: OrganizationId, now: DateTime<Utc>) -> Organization {
        Organization {
            id,
            name: self.name,
            parent_id: self.parent_id,
            created_at: now,
            updated_at: now,
        }
    }
}
