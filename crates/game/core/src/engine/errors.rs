//! Error types for engine operations.

use crate::error::{ErrorKind, GameError};
use crate::progression::ProgressionError;
use crate::state::{CharacterError, EquipmentError, InventoryError};
use crate::stats::SkillError;

/// Errors surfaced by [`super::ProgressionEngine`] operations.
///
/// Every variant leaves the sheet it was called on untouched.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    #[error("inventory operation failed: {0}")]
    Inventory(#[from] InventoryError),

    #[error("equipment operation failed: {0}")]
    Equipment(#[from] EquipmentError),

    #[error("character operation failed: {0}")]
    Character(#[from] CharacterError),

    #[error("skill allocation failed: {0}")]
    Skill(#[from] SkillError),

    #[error("progression update failed: {0}")]
    Progression(#[from] ProgressionError),
}

impl GameError for EngineError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Inventory(err) => err.kind(),
            Self::Equipment(err) => err.kind(),
            Self::Character(err) => err.kind(),
            Self::Skill(err) => err.kind(),
            Self::Progression(err) => err.kind(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Inventory(err) => err.error_code(),
            Self::Equipment(err) => err.error_code(),
            Self::Character(err) => err.error_code(),
            Self::Skill(err) => err.error_code(),
            Self::Progression(err) => err.error_code(),
        }
    }
}
