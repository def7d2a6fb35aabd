//! Read models returned by the runtime API.

use serde::{Deserialize, Serialize};

use progression_core::{
    Character, DerivedStats, EquipSlot, InventoryEntry, ItemDefinition, ItemHandle, ItemOracle,
    Player, PlayerProfile, Timestamp,
};

/// Outcome of [`crate::RuntimeHandle::register_player`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub player: Player,
    pub profile: PlayerProfile,
    /// `false` when the identity was already known.
    pub created: bool,
}

/// One inventory stack resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLine {
    pub item: ItemHandle,
    /// `None` when the catalog no longer knows the item.
    pub definition: Option<ItemDefinition>,
    pub quantity: u32,
    pub obtained_at: Timestamp,
    /// Catalog value times quantity.
    pub total_value: u64,
}

impl InventoryLine {
    pub(crate) fn resolve(entry: &InventoryEntry, items: &dyn ItemOracle) -> Self {
        let definition = items.definition(entry.item);
        let total_value = definition
            .as_ref()
            .map_or(0, |def| def.value.saturating_mul(u64::from(entry.quantity)));
        Self {
            item: entry.item,
            definition,
            quantity: entry.quantity,
            obtained_at: entry.obtained_at,
            total_value,
        }
    }

    pub fn name(&self) -> &str {
        self.definition
            .as_ref()
            .map_or("<unknown item>", |def| def.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub slot: EquipSlot,
    pub item: ItemHandle,
    pub definition: Option<ItemDefinition>,
    pub equipped_at: Timestamp,
}

/// Everything a client shows for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterView {
    pub character: Character,
    /// Cached stats with percentages rounded for display.
    pub stats: DerivedStats,
    pub equipment: Vec<EquippedItem>,
    pub inventory: Vec<InventoryLine>,
}

/// Result of a [`crate::RuntimeHandle::repair_equipment`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairReport {
    pub characters_scanned: usize,
    pub characters_repaired: usize,
    pub rows_removed: usize,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.rows_removed == 0
    }
}
