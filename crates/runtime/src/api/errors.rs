//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the rules engine, repositories and lookups so callers
//! can pick a response from [`RuntimeError::kind`] without matching on every
//! variant.

use thiserror::Error;

use progression_core::{
    CharacterError, EngineError, EquipmentError, ErrorKind, ExternalId, GameError, InventoryError,
    ItemHandle, ProgressionError, SkillError,
};

pub use crate::repository::RepositoryError;
use crate::repository::{CHARACTER_NAME, CHARACTER_OWNER};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("player {0} is not registered")]
    PlayerNotFound(ExternalId),

    #[error("player {0} has no character")]
    CharacterNotFound(ExternalId),

    #[error("{0} is not in the catalog")]
    ItemNotFound(ItemHandle),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Repository(RepositoryError),

    #[error("runtime requires an item catalog to be configured before building")]
    MissingOracles,

    #[error("failed to load content: {0}")]
    Content(String),
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PlayerNotFound(_) | Self::CharacterNotFound(_) | Self::ItemNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Engine(err) => err.kind(),
            Self::Repository(RepositoryError::UniqueViolation { .. }) => ErrorKind::Conflict,
            Self::Repository(_) | Self::MissingOracles | Self::Content(_) => ErrorKind::Internal,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind().is_recoverable()
    }
}

impl GameError for RuntimeError {
    fn kind(&self) -> ErrorKind {
        RuntimeError::kind(self)
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PlayerNotFound(_) => "PLAYER_NOT_FOUND",
            Self::CharacterNotFound(_) => "CHARACTER_NOT_FOUND",
            Self::ItemNotFound(_) => "ITEM_NOT_FOUND",
            Self::Engine(err) => err.error_code(),
            Self::Repository(RepositoryError::UniqueViolation { .. }) => "STORE_CONFLICT",
            Self::Repository(_) => "STORE_FAILURE",
            Self::MissingOracles => "MISSING_ORACLES",
            Self::Content(_) => "CONTENT_INVALID",
        }
    }
}

impl From<RepositoryError> for RuntimeError {
    /// Store constraint violations that mirror directory rules become the
    /// matching domain error; anything else is an internal failure and is
    /// logged here.
    fn from(err: RepositoryError) -> Self {
        match &err {
            RepositoryError::UniqueViolation {
                constraint: CHARACTER_OWNER,
                ..
            } => return CharacterError::AlreadyHasCharacter.into(),
            RepositoryError::UniqueViolation {
                constraint: CHARACTER_NAME,
                detail,
            } => {
                return CharacterError::DuplicateName {
                    name: detail.clone(),
                }
                .into();
            }
            RepositoryError::UniqueViolation { .. } => {}
            _ => tracing::error!(error = %err, "storage failure"),
        }
        Self::Repository(err)
    }
}

macro_rules! engine_error_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for RuntimeError {
                fn from(err: $source) -> Self {
                    Self::Engine(err.into())
                }
            }
        )*
    };
}

engine_error_from!(
    InventoryError,
    EquipmentError,
    CharacterError,
    SkillError,
    ProgressionError,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_are_internal() {
        let err = RuntimeError::from(RepositoryError::LockPoisoned);
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn owner_violation_maps_to_directory_conflict() {
        let err = RuntimeError::from(RepositoryError::UniqueViolation {
            constraint: CHARACTER_OWNER,
            detail: String::new(),
        });
        assert!(matches!(
            err,
            RuntimeError::Engine(EngineError::Character(CharacterError::AlreadyHasCharacter))
        ));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn lookups_are_not_found() {
        assert_eq!(RuntimeError::PlayerNotFound(ExternalId(1)).kind(), ErrorKind::NotFound);
        assert_eq!(
            RuntimeError::from(EquipmentError::UnknownSlot { name: "head".into() }).kind(),
            ErrorKind::InvalidInput
        );
    }
}
