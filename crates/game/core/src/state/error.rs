//! State management errors.
//!
//! Errors raised by the inventory ledger, the equipment board and the
//! character directory rules. None of them leave partial state behind.

use crate::catalog::EquipTag;
use crate::error::{ErrorKind, GameError};
use crate::state::{EquipSlot, ItemHandle};
use crate::stats::SkillError;

/// Errors from inventory ledger operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    #[error("quantity for {item} must be positive")]
    ZeroQuantity { item: ItemHandle },

    #[error("stack of {item} cannot grow any further")]
    StackOverflow { item: ItemHandle },

    #[error("{item} is not in the inventory")]
    NotHeld { item: ItemHandle },

    #[error("requested {requested} of {item} but only {available} held")]
    InsufficientQuantity {
        item: ItemHandle,
        requested: u32,
        available: u32,
    },
}

impl GameError for InventoryError {
    fn kind(&self) -> ErrorKind {
        use InventoryError::*;
        match self {
            ZeroQuantity { .. } => ErrorKind::InvalidInput,
            StackOverflow { .. } => ErrorKind::InvalidInput,
            NotHeld { .. } | InsufficientQuantity { .. } => ErrorKind::InsufficientResource,
        }
    }

    fn error_code(&self) -> &'static str {
        use InventoryError::*;
        match self {
            ZeroQuantity { .. } => "INVENTORY_ZERO_QUANTITY",
            StackOverflow { .. } => "INVENTORY_STACK_OVERFLOW",
            NotHeld { .. } => "INVENTORY_NOT_HELD",
            InsufficientQuantity { .. } => "INVENTORY_INSUFFICIENT_QUANTITY",
        }
    }
}

/// Errors from equip and unequip.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentError {
    /// Slot name is not one of the fixed board slots.
    #[error("unknown equipment slot '{name}'")]
    UnknownSlot { name: String },

    /// The catalog tags the item for a different slot (or none at all).
    #[error("{item} is tagged '{tag}' and cannot be placed in the {slot} slot")]
    SlotMismatch {
        item: ItemHandle,
        slot: EquipSlot,
        tag: EquipTag,
    },

    #[error("{item} is not in the catalog")]
    UnknownItem { item: ItemHandle },

    #[error("{item} is not available in the inventory")]
    ItemNotInInventory { item: ItemHandle },

    /// Returning the previous item to the inventory failed.
    #[error("could not return {item} to the inventory: {source}")]
    ReturnFailed {
        item: ItemHandle,
        #[source]
        source: InventoryError,
    },
}

impl GameError for EquipmentError {
    fn kind(&self) -> ErrorKind {
        use EquipmentError::*;
        match self {
            UnknownSlot { .. } | SlotMismatch { .. } => ErrorKind::InvalidInput,
            UnknownItem { .. } => ErrorKind::NotFound,
            ItemNotInInventory { .. } => ErrorKind::InsufficientResource,
            ReturnFailed { source, .. } => source.kind(),
        }
    }

    fn error_code(&self) -> &'static str {
        use EquipmentError::*;
        match self {
            UnknownSlot { .. } => "EQUIP_UNKNOWN_SLOT",
            SlotMismatch { .. } => "EQUIP_INVALID_SLOT",
            UnknownItem { .. } => "EQUIP_UNKNOWN_ITEM",
            ItemNotInInventory { .. } => "EQUIP_ITEM_NOT_IN_INVENTORY",
            ReturnFailed { .. } => "EQUIP_RETURN_FAILED",
        }
    }
}

/// Errors from character creation and the character directory.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterError {
    #[error("player already owns a character")]
    AlreadyHasCharacter,

    #[error("a character named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("character name must be 1 to {max} characters, got {len}")]
    InvalidName { len: usize, max: usize },

    #[error("invalid skill allocation: {0}")]
    Skill(#[from] SkillError),
}

impl GameError for CharacterError {
    fn kind(&self) -> ErrorKind {
        use CharacterError::*;
        match self {
            AlreadyHasCharacter | DuplicateName { .. } => ErrorKind::Conflict,
            InvalidName { .. } => ErrorKind::InvalidInput,
            Skill(err) => err.kind(),
        }
    }

    fn error_code(&self) -> &'static str {
        use CharacterError::*;
        match self {
            AlreadyHasCharacter => "CHARACTER_ALREADY_EXISTS",
            DuplicateName { .. } => "CHARACTER_DUPLICATE_NAME",
            InvalidName { .. } => "CHARACTER_INVALID_NAME",
            Skill(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_caller_response() {
        let shortage = InventoryError::InsufficientQuantity {
            item: ItemHandle(1),
            requested: 3,
            available: 1,
        };
        assert_eq!(shortage.kind(), ErrorKind::InsufficientResource);

        let mismatch = EquipmentError::SlotMismatch {
            item: ItemHandle(2),
            slot: EquipSlot::Weapon,
            tag: EquipTag::Torso,
        };
        assert_eq!(mismatch.kind(), ErrorKind::InvalidInput);
        assert_eq!(mismatch.error_code(), "EQUIP_INVALID_SLOT");

        assert_eq!(CharacterError::AlreadyHasCharacter.kind(), ErrorKind::Conflict);
        let skill = CharacterError::from(SkillError::NothingToSpend);
        assert_eq!(skill.kind(), ErrorKind::InvalidInput);
        assert_eq!(skill.error_code(), "SKILL_NOTHING_TO_SPEND");
    }
}
