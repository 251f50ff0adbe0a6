//! Record-level error model.

use thiserror::Error;

/// Result type used for record construction and validation.
pub type DomainResult<T> = Result<T, DomainError>;

/// Record-level error.
///
/// Covers deterministic failures when building or changing records
/// (validation, invariants, identifier parsing). Authorization and storage
/// failures have their own error types in the crates that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty name, priority out of range).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A record invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
