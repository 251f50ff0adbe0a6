use orgguard_auth::{OperationPolicy, Permission, Policy, Role};

/// Every operation the services expose, with its declared policy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateTask,
    ListTasks,
    GetTask,
    UpdateTask,
    DeleteTask,
    GetProfile,
    ListUsers,
    GetUser,
    UpdateUser,
    ChangeUserRole,
    DeactivateUser,
    CreateOrganization,
    ListOrganizations,
    GetOrganization,
    ListAuditLog,
}

impl Operation {
    pub const ALL: [Operation; 15] = [
        Operation::CreateTask,
        Operation::ListTasks,
        Operation::GetTask,
        Operation::UpdateTask,
        Operation::DeleteTask,
        Operation::GetProfile,
        Operation::ListUsers,
        Operation::GetUser,
        Operation::UpdateUser,
        Operation::ChangeUserRole,
        Operation::DeactivateUser,
        Operation::CreateOrganization,
        Operation::ListOrganizations,
        Operation::GetOrganization,
        Operation::ListAuditLog,
    ];
}

impl OperationPolicy for Operation {
    fn operation_name(&self) -> &'static str {
        match self {
            Operation::CreateTask => "tasks.create",
            Operation::ListTasks => "tasks.list",
            Operation::GetTask => "tasks.get",
            Operation::UpdateTask => "tasks.update",
            Operation::DeleteTask => "tasks.delete",
            Operation::GetProfile => "users.me",
            Operation::ListUsers => "users.list",
            Operation::GetUser => "users.get",
            Operation::UpdateUser => "users.update",
            Operation::ChangeUserRole => "users.change_role",
            Operation::DeactivateUser => "users.deactivate",
            Operation::CreateOrganization => "organizations.create",
            Operation::ListOrganizations => "organizations.list",
            Operation::GetOrganization => "organizations.get",
            Operation::ListAuditLog => "audit_log.list",
        }
    }

    fn policy(&self) -> Policy {
        match self {
            Operation::CreateTask => Policy::all_permissions([Permission::CreateTask]),
            Operation::ListTasks | Operation::GetTask => {
                Policy::all_permissions([Permission::ReadTask])
            }
            Operation::UpdateTask => Policy::all_permissions([Permission::UpdateTask]),
            Operation::DeleteTask => Policy::all_permissions([Permission::DeleteTask]),
            Operation::GetProfile => Policy::authenticated(),
            Operation::ListUsers
            | Operation::GetUser
            | Operation::UpdateUser
            | Operation::DeactivateUser
            | Operation::ListOrganizations
            | Operation::GetOrganization => Policy::all_permissions([Permission::ManageUsers]),
            Operation::ChangeUserRole => Policy::any_role([Role::Owner]),
            Operation::CreateOrganization => {
                Policy::all_permissions([Permission::ManageOrganization])
            }
            Operation::ListAuditLog => Policy::all_permissions([Permission::ViewAuditLog]),
        }
    }
}
