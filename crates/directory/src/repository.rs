//! Storage seams for organization-partitioned records.
//!
//! The authorization core is specified against these operations only; any
//! storage engine can sit behind them. Implementations must be safe to call
//! concurrently from independent requests.

use std::collections::BTreeSet;

use thiserror::Error;

use orgguard_core::{OrganizationId, TaskId, UserId};

use crate::{NewOrganization, NewTask, NewUser, Organization, Task, User};

/// Storage operation error.
///
/// These are infrastructure failures, as opposed to authorization outcomes
/// or record validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store could not serve the request.
    #[error("repository unavailable: {0}")]
    Unavailable(String),

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A record targeted by a write does not exist.
    #[error("record missing: {0}")]
    Missing(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

pub trait OrganizationRepository: Send + Sync {
    fn find_by_id(&self, id: OrganizationId) -> RepositoryResult<Option<Organization>>;

    /// Every organization, in id order. Used for OWNER scope expansion.
    fn find_all(&self) -> RepositoryResult<Vec<Organization>>;

    fn find_by_ids(&self, ids: &BTreeSet<OrganizationId>) -> RepositoryResult<Vec<Organization>>;

    fn insert(&self, input: NewOrganization) -> RepositoryResult<Organization>;
}

pub trait UserRepository: Send + Sync {
    fn find_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;

    fn find_by_organization_ids(
        &self,
        organization_ids: &BTreeSet<OrganizationId>,
    ) -> RepositoryResult<Vec<User>>;

    /// Ids of every user belonging to `organization_id`.
    fn find_ids_by_organization(
        &self,
        organization_id: OrganizationId,
    ) -> RepositoryResult<BTreeSet<UserId>>;

    /// Fails with [`RepositoryError::Conflict`] if the email is taken.
    fn insert(&self, input: NewUser) -> RepositoryResult<User>;

    fn save(&self, user: User) -> RepositoryResult<User>;

    fn count_by_organization(&self, organization_id: OrganizationId) -> RepositoryResult<usize>;
}

pub trait TaskRepository: Send + Sync {
    fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>>;

    /// Tasks owned by any of `organization_ids`, newest first.
    fn find_by_organization_ids(
        &self,
        organization_ids: &BTreeSet<OrganizationId>,
    ) -> RepositoryResult<Vec<Task>>;

    fn insert(
        &self,
        input: NewTask,
        created_by: UserId,
        organization_id: OrganizationId,
    ) -> RepositoryResult<Task>;

    fn save(&self, task: Task) -> RepositoryResult<Task>;

    /// Returns whether a record was removed.
    fn delete(&self, id: TaskId) -> RepositoryResult<bool>;

    fn count_by_organization(&self, organization_id: OrganizationId) -> RepositoryResult<usize>;
}
