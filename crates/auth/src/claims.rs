use serde::{Deserialize, Serialize};

use orgguard_core::{OrganizationId, UserId};

use crate::Role;

/// Identity claim for one request.
///
/// Produced by whatever transport/security layer authenticated the caller
/// (token verification is outside this crate) and trusted as-is for the
/// duration of a single operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityClaim {
    /// Subject / actor identifier.
    pub subject_id: UserId,

    /// Role the actor holds.
    pub role: Role,

    /// Organization the actor belongs to.
    pub organization_id: OrganizationId,
}

impl IdentityClaim {
    pub fn new(subject_id: UserId, role: Role, organization_id: OrganizationId) -> Self {
        Self {
            subject_id,
            role,
            organization_id,
        }
    }
}
