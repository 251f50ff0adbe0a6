//! Organization-partitioned records and the repository seams they are
//! stored behind.

pub mod access;
pub mod organization;
pub mod repository;
pub mod task;
pub mod user;

pub use access::OrganizationAccessResolver;
pub use organization::{NewOrganization, Organization};
pub use repository::{
    OrganizationRepository, RepositoryError, RepositoryResult, TaskRepository, UserRepository,
};
pub use task::{NewTask, Task, TaskCategory, TaskChanges, TaskStatus};
pub use user::{NewUser, ProfileChanges, User};
