use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orgguard_core::{AuditLogId, Entity, UserId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Read,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Read => "READ",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
        }
    }
}

impl core::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of one audited action.
///
/// Field names are part of the persisted contract and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: AuditLogId,
    pub actor_id: UserId,
    pub action: AuditAction,
    pub resource_kind: String,
    pub resource_id: Option<i64>,
    pub details: Option<String>,
    pub ip_address: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Entity for AuditLogEntry {
    type Id = AuditLogId;

    fn id(&self) -> AuditLogId {
        self.id
    }
}

/// An entry ready to be appended (id and timestamp assigned by the store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuditEntry {
    pub actor_id: UserId,
    pub action: AuditAction,
    pub resource_kind: String,
    pub resource_id: Option<i64>,
    pub details: Option<String>,
    pub ip_address: Option<String>,
}

impl NewAuditEntry {
    pub fn new(actor_id: UserId, action: AuditAction, resource_kind: impl Into<String>) -> Self {
        Self {
            actor_id,
            action,
            resource_kind: resource_kind.into(),
            resource_id: None,
            details: None,
            ip_address: None,
        }
    }

    pub fn resource_id(mut self, id: impl Into<i64>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn ip_address(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    pub fn into_entry(self, id: AuditLogId, timestamp: DateTime<Utc>) -> AuditLogEntry {
        AuditLogEntry {
            id,
            actor_id: self.actor_id,
            action: self.action,
            resource_kind: self.resource_kind,
            resource_id: self.resource_id,
            details: self.details,
            ip_address: self.ip_address,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_field_names_are_stable() {
        let entry = NewAuditEntry::new(UserId::new(3), AuditAction::Delete, "Task")
            .resource_id(9)
            .details("Deleted task: Ship")
            .into_entry(AuditLogId::new(1), Utc::now());

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["actor_id"], 3);
        assert_eq!(json["action"], "DELETE");
        assert_eq!(json["resource_kind"], "Task");
        assert_eq!(json["resource_id"], 9);
        assert_eq!(json["details"], "Deleted task: Ship");
        assert!(json["ip_address"].is_null());
        assert!(json.get("timestamp").is_some());
    }
}
