use thiserror::Error;

use orgguard_audit::AuditError;
use orgguard_auth::{AuthzError, Permission, Role};
use orgguard_core::DomainError;
use orgguard_directory::RepositoryError;

/// Error surfaced by an operation.
///
/// Authorization failures abort before any mutation and are never retried.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("access denied: role {actual} is not one of {required:?}")]
    InsufficientRole { actual: Role, required: Vec<Role> },

    #[error("access denied: role {actual} lacks {missing:?}")]
    InsufficientPermission {
        actual: Role,
        missing: Vec<Permission>,
    },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl AccessError {
    pub fn not_found(kind: &'static str, id: impl core::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AccessError::Unauthenticated => ErrorKind::Unauthenticated,
            AccessError::InsufficientRole { .. }
            | AccessError::InsufficientPermission { .. }
            | AccessError::Forbidden(_) => ErrorKind::Forbidden,
            AccessError::NotFound { .. } => ErrorKind::NotFound,
            AccessError::Domain(_) => ErrorKind::Invalid,
            AccessError::Repository(RepositoryError::Conflict(_)) => ErrorKind::Conflict,
            AccessError::Repository(_) | AccessError::Audit(_) => ErrorKind::Internal,
        }
    }
}

impl From<AuthzError> for AccessError {
    fn from(value: AuthzError) -> Self {
        match value {
            AuthzError::Unauthenticated => AccessError::Unauthenticated,
            AuthzError::InsufficientRole { actual, required } => {
                AccessError::InsufficientRole { actual, required }
            }
            AuthzError::InsufficientPermission { actual, missing } => {
                AccessError::InsufficientPermission { actual, missing }
            }
        }
    }
}

/// Coarse outcome class for transport mapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    Forbidden,
    NotFound,
    Invalid,
    Conflict,
    Internal,
}

impl ErrorKind {
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::Unauthenticated => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Invalid => 400,
            ErrorKind::Conflict => 409,
            ErrorKind::Internal => 500,
        }
    }
}

/// Result of an operation that ran to completion.
///
/// `audit_failure` is set when the business operation succeeded but its
/// audit entry could not be written. The value is still valid.
#[derive(Debug)]
pub struct Completed<T> {
    pub value: T,
    pub audit_failure: Option<AuditError>,
}

impl<T> Completed<T> {
    pub fn into_value(self) -> T {
        self.value
    }

    pub fn audit_written(&self) -> bool {
        self.audit_failure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_and_authorization_map_to_distinct_statuses() {
        assert_eq!(AccessError::from(AuthzError::Unauthenticated).kind().http_status(), 401);
        let denied = AccessError::from(AuthzError::InsufficientPermission {
            actual: Role::Viewer,
            missing: vec![Permission::CreateTask],
        });
        assert_eq!(denied.kind(), ErrorKind::Forbidden);
        assert_eq!(AccessError::not_found("Task", 9).kind().http_status(), 404);
        assert_eq!(AccessError::forbidden("nope").kind().http_status(), 403);
    }

    #[test]
    fn storage_conflicts_are_not_internal_errors() {
        let err = AccessError::from(RepositoryError::Conflict("email".to_string()));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        let err = AccessError::from(RepositoryError::Unavailable("down".to_string()));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn not_found_message_names_the_record() {
        assert_eq!(AccessError::not_found("Task", 9).to_string(), "Task 9 not found");
    }
}
