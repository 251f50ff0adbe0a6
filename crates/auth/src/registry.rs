//! Role → permission registry.
//!
//! The single source of truth for what a role may do. Built once at process
//! start and shared by reference; nothing mutates it afterwards.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{Permission, Role};

/// Immutable mapping from each role to the permissions it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionMap {
    grants: BTreeMap<Role, BTreeSet<Permission>>,
}

impl RolePermissionMap {
    /// The production table.
    ///
    /// OWNER ⊇ ADMIN ⊇ VIEWER. ADMIN lacks only `MANAGE_ORGANIZATION`;
    /// VIEWER may only read tasks.
    pub fn standard() -> Self {
        use Permission::*;

        Self::from_grants([
            (
                Role::Owner,
                vec![
                    CreateTask,
                    ReadTask,
                    UpdateTask,
                    DeleteTask,
                    ViewAuditLog,
                    ManageUsers,
                    ManageOrganization,
                ],
            ),
            (
                Role::Admin,
                vec![CreateTask, ReadTask, UpdateTask, DeleteTask, ViewAuditLog, ManageUsers],
            ),
            (Role::Viewer, vec![ReadTask]),
        ])
    }

    /// Build a map from explicit grants (fixtures, alternative deployments).
    ///
    /// Roles that are not listed hold no permissions.
    pub fn from_grants<I, P>(grants: I) -> Self
    where
        I: IntoIterator<Item = (Role, P)>,
        P: IntoIterator<Item = Permission>,
    {
        let grants = grants
            .into_iter()
            .map(|(role, perms)| (role, perms.into_iter().collect()))
            .collect();
        Self { grants }
    }

    /// Permissions held by `role`; empty when the role has no entry.
    pub fn permissions_of(&self, role: Role) -> BTreeSet<Permission> {
        self.grants.get(&role).cloned().unwrap_or_default()
    }

    /// Lookup by role name, as it may arrive from an external claim.
    ///
    /// An unrecognized name yields the empty set rather than an error.
    pub fn permissions_of_name(&self, role: &str) -> BTreeSet<Permission> {
        role.parse::<Role>()
            .map(|r| self.permissions_of(r))
            .unwrap_or_default()
    }

    pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|perms| perms.contains(&permission))
    }

    /// Roles that would satisfy `permission` (used for denial suggestions).
    pub fn roles_granting(&self, permission: Permission) -> Vec<Role> {
        self.grants
            .iter()
            .filter(|(_, perms)| perms.contains(&permission))
            .map(|(role, _)| *role)
            .collect()
    }

    /// Catalogue of every role and its permissions, most privileged first.
    pub fn describe(&self) -> Vec<RoleDefinition> {
        Role::ALL
            .into_iter()
            .map(|role| RoleDefinition {
                role,
                description: role_description(role),
                permissions: self.permissions_of(role).into_iter().collect(),
            })
            .collect()
    }
}

impl Default for RolePermissionMap {
    fn default() -> Self {
        Self::standard()
    }
}

/// Role definition with its granted permissions (for display/audit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub description: &'static str,
    pub permissions: Vec<Permission>,
}

fn role_description(role: Role) -> &'static str {
    match role {
        Role::Owner => "Full access across every organization",
        Role::Admin => "Manages tasks and users within their own organization",
        Role::Viewer => "Read-only access to their organization's tasks",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_role() -> impl Strategy<Value = Role> {
        proptest::sample::select(Role::ALL.to_vec())
    }

    fn any_permission() -> impl Strategy<Value = Permission> {
        proptest::sample::select(Permission::ALL.to_vec())
    }

    #[test]
    fn standard_table_matches_expected_grants() {
        let map = RolePermissionMap::standard();

        assert!(map.has_permission(Role::Owner, Permission::CreateTask));
        assert!(map.has_permission(Role::Admin, Permission::CreateTask));
        assert!(!map.has_permission(Role::Viewer, Permission::CreateTask));
        assert!(map.has_permission(Role::Viewer, Permission::ReadTask));
        assert!(map.has_permission(Role::Owner, Permission::ViewAuditLog));
        assert!(!map.has_permission(Role::Viewer, Permission::ViewAuditLog));
        assert!(map.has_permission(Role::Owner, Permission::ManageOrganization));
        assert!(!map.has_permission(Role::Admin, Permission::ManageOrganization));
    }

    #[test]
    fn permission_counts_and_hierarchy() {
        let map = RolePermissionMap::standard();
        let owner = map.permissions_of(Role::Owner);
        let admin = map.permissions_of(Role::Admin);
        let viewer = map.permissions_of(Role::Viewer);

        assert_eq!(owner.len(), 7);
        assert_eq!(admin.len(), 6);
        assert_eq!(viewer.len(), 1);
        assert!(viewer.contains(&Permission::ReadTask));
        assert!(owner.is_superset(&admin));
        assert!(admin.is_superset(&viewer));
        assert!(!admin.contains(&Permission::ManageOrganization));
    }

    #[test]
    fn every_role_has_a_non_empty_entry() {
        let map = RolePermissionMap::standard();
        for role in Role::ALL {
            assert!(!map.permissions_of(role).is_empty(), "{role} has no permissions");
        }
    }

    #[test]
    fn unknown_role_name_yields_empty_set() {
        let map = RolePermissionMap::standard();
        assert!(map.permissions_of_name("SUPERUSER").is_empty());
        assert_eq!(map.permissions_of_name("viewer").len(), 1);
    }

    #[test]
    fn roles_missing_from_fixture_hold_nothing() {
        let map = RolePermissionMap::from_grants([(Role::Viewer, [Permission::DeleteTask])]);
        assert!(map.permissions_of(Role::Owner).is_empty());
        assert!(!map.has_permission(Role::Owner, Permission::ReadTask));
        assert!(map.has_permission(Role::Viewer, Permission::DeleteTask));
    }

    #[test]
    fn roles_granting_lists_every_holder() {
        let map = RolePermissionMap::standard();
        assert_eq!(map.roles_granting(Permission::ManageOrganization), vec![Role::Owner]);
        assert_eq!(
            map.roles_granting(Permission::ReadTask),
            vec![Role::Owner, Role::Admin, Role::Viewer]
        );
    }

    #[test]
    fn catalogue_lists_roles_in_privilege_order() {
        let defs = RolePermissionMap::standard().describe();
        let roles: Vec<Role> = defs.iter().map(|d| d.role).collect();
        assert_eq!(roles, Role::ALL.to_vec());
        assert_eq!(defs[2].permissions, vec![Permission::ReadTask]);
    }

    proptest! {
        #[test]
        fn has_permission_agrees_with_permissions_of(role in any_role(), perm in any_permission()) {
            let map = RolePermissionMap::standard();
            prop_assert_eq!(map.has_permission(role, perm), map.permissions_of(role).contains(&perm));
        }

        #[test]
        fn permissions_of_is_stable_across_calls(role in any_role()) {
            let map = RolePermissionMap::standard();
            let first = map.permissions_of(role);
            for _ in 0..3 {
                prop_assert_eq!(&map.permissions_of(role), &first);
            }
        }
    }
}
