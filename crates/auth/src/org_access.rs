//! Flat organization-scope rule.
//!
//! OWNER sees every organization; every other role sees only its own.
//! Parent/child links between organizations are deliberately not consulted.

use orgguard_core::OrganizationId;

use crate::Role;

/// Which organizations an actor may see.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrganizationScope {
    /// Every organization known to the system.
    All,
    /// Exactly one organization.
    Only(OrganizationId),
}

impl OrganizationScope {
    pub fn contains(&self, organization_id: OrganizationId) -> bool {
        match self {
            OrganizationScope::All => true,
            OrganizationScope::Only(own) => *own == organization_id,
        }
    }
}

/// The scope an actor holds, before it is expanded against storage.
pub fn organization_scope(actor_org: OrganizationId, actor_role: Role) -> OrganizationScope {
    match actor_role {
        Role::Owner => OrganizationScope::All,
        Role::Admin | Role::Viewer => OrganizationScope::Only(actor_org),
    }
}

/// Point check for a single record's owning organization.
pub fn can_access_organization(
    actor_org: OrganizationId,
    target_org: OrganizationId,
    actor_role: Role,
) -> bool {
    organization_scope(actor_org, actor_role).contains(target_org)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn owner_crosses_organizations() {
        let a = OrganizationId::new(1);
        let b = OrganizationId::new(2);
        assert!(can_access_organization(a, b, Role::Owner));
        assert!(can_access_organization(a, a, Role::Owner));
    }

    #[test]
    fn admin_and_viewer_stay_home() {
        let a = OrganizationId::new(1);
        let b = OrganizationId::new(2);
        for role in [Role::Admin, Role::Viewer] {
            assert!(can_access_organization(a, a, role));
            assert!(!can_access_organization(a, b, role));
        }
    }

    proptest! {
        #[test]
        fn owner_always_allowed(a in any::<i64>(), b in any::<i64>()) {
            prop_assert!(can_access_organization(
                OrganizationId::new(a),
                OrganizationId::new(b),
                Role::Owner,
            ));
        }

        #[test]
        fn non_owner_requires_equality(a in 0i64..50, b in 0i64..50) {
            for role in [Role::Admin, Role::Viewer] {
                prop_assert_eq!(
                    can_access_organization(OrganizationId::new(a), OrganizationId::new(b), role),
                    a == b
                );
            }
        }
    }
}
