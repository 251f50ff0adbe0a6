use thiserror::Error;

use orgguard_directory::RepositoryError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// The append failed. The operation being described may already have
    /// committed, so callers report this next to their result.
    #[error("audit write failed: {0}")]
    WriteFailed(#[source] RepositoryError),

    #[error("audit read failed: {0}")]
    ReadFailed(#[source] RepositoryError),
}
