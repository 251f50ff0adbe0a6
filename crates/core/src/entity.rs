//! Record traits shared by every stored shape.

use crate::OrganizationId;

/// A stored record with a stable identifier.
pub trait Entity {
    /// Strongly-typed record identifier.
    type Id: Copy + Ord + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    fn id(&self) -> Self::Id;
}

/// A record owned by exactly one organization.
///
/// Access checks on single records go through this trait, so every
/// organization-partitioned shape (users, tasks, organizations themselves)
/// can be guarded by the same code path.
pub trait OrganizationScoped {
    fn organization_id(&self) -> OrganizationId;
}
