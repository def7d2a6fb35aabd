//! Authoritative player and character state.
//!
//! This module owns the records the engine mutates: players, characters,
//! inventories and equipment boards. Runtime layers load and store them but
//! mutate characters only through [`crate::engine::ProgressionEngine`].
pub mod error;
pub mod types;

pub use error::{CharacterError, EquipmentError, InventoryError};
pub use types::{
    Character, CharacterId, EquipSlot, EquipmentBoard, ExternalId, ExternalIdentity, Inventory,
    InventoryEntry, ItemHandle, LinkedIdentity, MAX_NAME_LEN, Player, PlayerId, RepairedSlots,
    SlotRow, SlotRowId, Timestamp, name_key,
};
