//! `orgguard-auth`: pure authorization boundary.
//!
//! Consumes an already-verified identity claim and answers policy questions.
//! This crate is intentionally decoupled from transport and storage.

pub mod authorize;
pub mod claims;
pub mod org_access;
pub mod permissions;
pub mod policy;
pub mod registry;
pub mod roles;

pub use authorize::{
    AuthorizationExplanation, AuthzError, Decision, DenialKind, DenialReason, PrincipalState,
    authorize, explain_authorization,
};
pub use claims::IdentityClaim;
pub use org_access::{OrganizationScope, can_access_organization, organization_scope};
pub use permissions::{ParsePermissionError, Permission};
pub use policy::{OperationPolicy, Policy};
pub use registry::{RoleDefinition, RolePermissionMap};
pub use roles::{ParseRoleError, Role};
