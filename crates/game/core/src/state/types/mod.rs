pub mod character;
pub mod common;
pub mod equipment;
pub mod inventory;
pub mod player;

// Re-export common types
pub use common::{CharacterId, ExternalId, ItemHandle, PlayerId, SlotRowId, Timestamp};

pub use character::{Character, MAX_NAME_LEN, name_key};
pub use equipment::{EquipSlot, EquipmentBoard, RepairedSlots, SlotRow};
pub use inventory::{Inventory, InventoryEntry};
pub use player::{ExternalIdentity, LinkedIdentity, Player};
