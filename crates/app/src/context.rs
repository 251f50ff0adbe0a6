use uuid::Uuid;

use orgguard_auth::IdentityClaim;

/// Per-request context handed to every operation.
///
/// The identity is passed explicitly; there is no ambient "current user".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    claim: Option<IdentityClaim>,
    request_id: Uuid,
    ip_address: Option<String>,
}

impl RequestContext {
    pub fn new(claim: Option<IdentityClaim>) -> Self {
        Self {
            claim,
            request_id: Uuid::now_v7(),
            ip_address: None,
        }
    }

    pub fn authenticated(claim: IdentityClaim) -> Self {
        Self::new(Some(claim))
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn with_ip_address(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    pub fn claim(&self) -> Option<&IdentityClaim> {
        self.claim.as_ref()
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }
}
