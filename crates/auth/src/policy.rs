//! Declarative per-operation authorization requirements.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{Permission, Role};

/// Authorization requirement attached to an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum Policy {
    /// No identity needed.
    Public,

    /// The actor's role must be one of these.
    RequireAnyRole(BTreeSet<Role>),

    /// The actor's role must hold every one of these permissions.
    ///
    /// An empty set admits any authenticated actor.
    RequireAllPermissions(BTreeSet<Permission>),
}

impl Policy {
    pub fn any_role(roles: impl IntoIterator<Item = Role>) -> Self {
        Self::RequireAnyRole(roles.into_iter().collect())
    }

    pub fn all_permissions(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self::RequireAllPermissions(permissions.into_iter().collect())
    }

    /// Any authenticated actor, regardless of role.
    pub fn authenticated() -> Self {
        Self::RequireAllPermissions(BTreeSet::new())
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Policy::Public)
    }
}

impl core::fmt::Display for Policy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Policy::Public => f.write_str("public"),
            Policy::RequireAnyRole(roles) => {
                let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
                write!(f, "any role of [{}]", names.join(", "))
            }
            Policy::RequireAllPermissions(perms) if perms.is_empty() => {
                f.write_str("authenticated")
            }
            Policy::RequireAllPermissions(perms) => {
                let names: Vec<&str> = perms.iter().map(Permission::as_str).collect();
                write!(f, "all permissions of [{}]", names.join(", "))
            }
        }
    }
}

/// Operation-side authorization contract.
///
/// Implemented by operation descriptors so the policy is declared once,
/// statically, next to the operation rather than computed per call.
pub trait OperationPolicy {
    /// Stable operation name used in logs and audit details.
    fn operation_name(&self) -> &'static str;

    fn policy(&self) -> Policy;
}
