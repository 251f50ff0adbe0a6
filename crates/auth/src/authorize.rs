use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use orgguard_core::{OrganizationId, UserId};

use crate::{IdentityClaim, Permission, Policy, Role, RolePermissionMap};

/// Why a policy check was denied.
///
/// `Unauthenticated` ("not logged in") is kept apart from the two
/// forbidden variants ("logged in but not allowed").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("forbidden: role {actual} is not one of {required:?}")]
    InsufficientRole { actual: Role, required: Vec<Role> },

    #[error("forbidden: role {actual} is missing permissions {missing:?}")]
    InsufficientPermission {
        actual: Role,
        missing: Vec<Permission>,
    },
}

/// Outcome of evaluating a claim against a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(AuthzError),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn into_result(self) -> Result<(), AuthzError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(reason),
        }
    }
}

/// Evaluate `claim` against `policy`.
///
/// - No IO
/// - No logging
/// - No panics
pub fn authorize(
    registry: &RolePermissionMap,
    claim: Option<&IdentityClaim>,
    policy: &Policy,
) -> Decision {
    let claim = match (policy, claim) {
        (Policy::Public, _) => return Decision::Allow,
        (_, None) => return Decision::Deny(AuthzError::Unauthenticated),
        (_, Some(claim)) => claim,
    };

    match policy {
        Policy::Public => Decision::Allow,
        Policy::RequireAnyRole(roles) => {
            if roles.contains(&claim.role) {
                Decision::Allow
            } else {
                Decision::Deny(AuthzError::InsufficientRole {
                    actual: claim.role,
                    required: roles.iter().copied().collect(),
                })
            }
        }
        Policy::RequireAllPermissions(required) => {
            let missing = missing_permissions(registry, claim.role, required);
            if missing.is_empty() {
                Decision::Allow
            } else {
                Decision::Deny(AuthzError::InsufficientPermission {
                    actual: claim.role,
                    missing,
                })
            }
        }
    }
}

fn missing_permissions(
    registry: &RolePermissionMap,
    role: Role,
    required: &BTreeSet<Permission>,
) -> Vec<Permission> {
    required
        .iter()
        .copied()
        .filter(|p| !registry.has_permission(role, *p))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
///
/// Answers "why was this request allowed/denied?" in a form that can be
/// logged or returned to an operator.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    /// Rendered policy that was checked.
    pub policy: String,

    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// The actor's state, absent for anonymous callers.
    pub principal: Option<PrincipalState>,

    pub denial_reason: Option<DenialReason>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrincipalState {
    pub subject_id: UserId,
    pub organization_id: OrganizationId,
    pub role: Role,
    pub effective_permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    Unauthenticated,
    InsufficientRole,
    InsufficientPermission,
}

/// Explain why [`authorize`] reaches its decision for this claim and policy.
///
/// Always agrees with `authorize`; it only adds context.
pub fn explain_authorization(
    registry: &RolePermissionMap,
    claim: Option<&IdentityClaim>,
    policy: &Policy,
) -> AuthorizationExplanation {
    let principal = claim.map(|c| PrincipalState {
        subject_id: c.subject_id,
        organization_id: c.organization_id,
        role: c.role,
        effective_permissions: registry.permissions_of(c.role).into_iter().collect(),
    });

    let decision = authorize(registry, claim, policy);
    let (reason, denial_reason) = match &decision {
        Decision::Allow => (allow_reason(claim, policy), None),
        Decision::Deny(err) => {
            let denial = denial_for(registry, err);
            (denial.message.clone(), Some(denial))
        }
    };

    AuthorizationExplanation {
        policy: policy.to_string(),
        granted: decision.is_allowed(),
        reason,
        principal,
        denial_reason,
    }
}

fn allow_reason(claim: Option<&IdentityClaim>, policy: &Policy) -> String {
    match (policy, claim) {
        (Policy::Public, _) => "Operation is public".to_string(),
        (Policy::RequireAnyRole(_), Some(c)) => format!("Role {} is accepted", c.role),
        (Policy::RequireAllPermissions(perms), Some(c)) if perms.is_empty() => {
            format!("Actor {} is authenticated", c.subject_id)
        }
        (Policy::RequireAllPermissions(_), Some(c)) => {
            format!("Role {} holds every required permission", c.role)
        }
        (_, None) => "Operation is public".to_string(),
    }
}

fn denial_for(registry: &RolePermissionMap, err: &AuthzError) -> DenialReason {
    match err {
        AuthzError::Unauthenticated => DenialReason {
            kind: DenialKind::Unauthenticated,
            message: "No identity claim was presented".to_string(),
            suggestions: vec!["Authenticate and retry with a valid token".to_string()],
        },
        AuthzError::InsufficientRole { actual, required } => {
            let names: Vec<&str> = required.iter().map(Role::as_str).collect();
            DenialReason {
                kind: DenialKind::InsufficientRole,
                message: format!("Role {actual} is not one of: {}", names.join(", ")),
                suggestions: vec![format!(
                    "Ask an owner to assign one of the roles: {}",
                    names.join(", ")
                )],
            }
        }
        AuthzError::InsufficientPermission { actual, missing } => {
            let names: Vec<&str> = missing.iter().map(Permission::as_str).collect();
            let mut suggestions = Vec::new();
            for perm in missing {
                let roles: Vec<&str> = registry
                    .roles_granting(*perm)
                    .iter()
                    .map(Role::as_str)
                    .collect();
                if !roles.is_empty() {
                    suggestions.push(format!("{perm} is granted to: {}", roles.join(", ")));
                }
            }
            DenialReason {
                kind: DenialKind::InsufficientPermission,
                message: format!("Role {actual} is missing: {}", names.join(", ")),
                suggestions,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn claim(role: Role) -> IdentityClaim {
        IdentityClaim::new(UserId::new(10), role, OrganizationId::new(1))
    }

    #[test]
    fn public_allows_anyone() {
        let registry = RolePermissionMap::standard();
        assert_eq!(authorize(&registry, None, &Policy::Public), Decision::Allow);
        assert_eq!(
            authorize(&registry, Some(&claim(Role::Viewer)), &Policy::Public),
            Decision::Allow
        );
    }

    #[test]
    fn missing_claim_is_unauthenticated_not_forbidden() {
        let registry = RolePermissionMap::standard();
        for policy in [
            Policy::authenticated(),
            Policy::any_role([Role::Owner]),
            Policy::all_permissions([Permission::ReadTask]),
        ] {
            assert_eq!(
                authorize(&registry, None, &policy),
                Decision::Deny(AuthzError::Unauthenticated)
            );
        }
    }

    #[test]
    fn role_policy_requires_membership() {
        let registry = RolePermissionMap::standard();
        let policy = Policy::any_role([Role::Owner]);

        assert!(authorize(&registry, Some(&claim(Role::Owner)), &policy).is_allowed());
        assert_eq!(
            authorize(&registry, Some(&claim(Role::Admin)), &policy),
            Decision::Deny(AuthzError::InsufficientRole {
                actual: Role::Admin,
                required: vec![Role::Owner],
            })
        );
    }

    #[test]
    fn viewer_cannot_create_tasks() {
        let registry = RolePermissionMap::standard();
        let policy = Policy::all_permissions([Permission::CreateTask]);

        let decision = authorize(&registry, Some(&claim(Role::Viewer)), &policy);
        assert_eq!(
            decision.into_result(),
            Err(AuthzError::InsufficientPermission {
                actual: Role::Viewer,
                missing: vec![Permission::CreateTask],
            })
        );
    }

    #[test]
    fn all_permissions_must_be_held() {
        let registry = RolePermissionMap::standard();
        let policy = Policy::all_permissions([Permission::ManageUsers, Permission::ManageOrganization]);

        assert!(authorize(&registry, Some(&claim(Role::Owner)), &policy).is_allowed());
        let Decision::Deny(AuthzError::InsufficientPermission { missing, .. }) =
            authorize(&registry, Some(&claim(Role::Admin)), &policy)
        else {
            panic!("expected permission denial");
        };
        assert_eq!(missing, vec![Permission::ManageOrganization]);
    }

    #[test]
    fn empty_permission_set_admits_any_authenticated_actor() {
        let registry = RolePermissionMap::from_grants(Vec::<(Role, Vec<Permission>)>::new());
        assert!(authorize(&registry, Some(&claim(Role::Viewer)), &Policy::authenticated()).is_allowed());
    }

    #[test]
    fn explanation_names_granting_roles() {
        let registry = RolePermissionMap::standard();
        let policy = Policy::all_permissions([Permission::ViewAuditLog]);
        let explanation = explain_authorization(&registry, Some(&claim(Role::Viewer)), &policy);

        assert!(!explanation.granted);
        let denial = explanation.denial_reason.unwrap();
        assert_eq!(denial.kind, DenialKind::InsufficientPermission);
        assert_eq!(denial.suggestions, vec!["VIEW_AUDIT_LOG is granted to: OWNER, ADMIN"]);
        assert_eq!(
            explanation.principal.unwrap().effective_permissions,
            vec![Permission::ReadTask]
        );
    }

    #[test]
    fn explanation_for_anonymous_caller() {
        let registry = RolePermissionMap::standard();
        let explanation = explain_authorization(&registry, None, &Policy::authenticated());
        assert!(explanation.principal.is_none());
        assert_eq!(explanation.policy, "authenticated");
        assert_eq!(
            explanation.denial_reason.map(|d| d.kind),
            Some(DenialKind::Unauthenticated)
        );
    }

    proptest! {
        #[test]
        fn explanation_agrees_with_decision(
            role in proptest::sample::select(Role::ALL.to_vec()),
            perms in proptest::sample::subsequence(Permission::ALL.to_vec(), 0..=7),
        ) {
            let registry = RolePermissionMap::standard();
            let policy = Policy::all_permissions(perms.clone());
            let c = claim(role);
            let decision = authorize(&registry, Some(&c), &policy);
            let explanation = explain_authorization(&registry, Some(&c), &policy);
            prop_assert_eq!(decision.is_allowed(), explanation.granted);
            let expected = perms.iter().all(|p| registry.has_permission(role, *p));
            prop_assert_eq!(decision.is_allowed(), expected);
        }
    }
}
