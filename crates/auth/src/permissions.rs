use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single atomic capability.
///
/// There is no wildcard: a role holds exactly the permissions listed for it
/// in the [`RolePermissionMap`](crate::RolePermissionMap).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    CreateTask,
    ReadTask,
    UpdateTask,
    DeleteTask,
    ViewAuditLog,
    ManageUsers,
    ManageOrganization,
}

impl Permission {
    pub const ALL: [Permission; 7] = [
        Permission::CreateTask,
        Permission::ReadTask,
        Permission::UpdateTask,
        Permission::DeleteTask,
        Permission::ViewAuditLog,
        Permission::ManageUsers,
        Permission::ManageOrganization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::CreateTask => "CREATE_TASK",
            Permission::ReadTask => "READ_TASK",
            Permission::UpdateTask => "UPDATE_TASK",
            Permission::DeleteTask => "DELETE_TASK",
            Permission::ViewAuditLog => "VIEW_AUDIT_LOG",
            Permission::ManageUsers => "MANAGE_USERS",
            Permission::ManageOrganization => "MANAGE_ORGANIZATION",
        }
    }

    /// Human-readable summary, used by the role catalogue.
    pub fn description(&self) -> &'static str {
        match self {
            Permission::CreateTask => "Create new tasks",
            Permission::ReadTask => "View/list tasks",
            Permission::UpdateTask => "Edit existing tasks",
            Permission::DeleteTask => "Delete tasks",
            Permission::ViewAuditLog => "Review the audit trail",
            Permission::ManageUsers => "View and manage users and organizations",
            Permission::ManageOrganization => "Create and administer organizations",
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown permission '{0}'")]
pub struct ParsePermissionError(pub String);

impl FromStr for Permission {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePermissionError(s.to_string()))
    }
}
