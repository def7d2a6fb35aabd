//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("state repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    /// A change set would break a uniqueness rule of the store.
    #[error("unique constraint '{constraint}' violated: {detail}")]
    UniqueViolation {
        constraint: &'static str,
        detail: String,
    },

    /// A change set references a row that does not exist.
    #[error("missing {entity}: {detail}")]
    MissingReference {
        entity: &'static str,
        detail: String,
    },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
