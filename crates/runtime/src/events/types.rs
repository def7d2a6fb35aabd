//! Event types for different topics.

use progression_core::{
    CharacterId, DerivedStats, EquipSlot, ExperienceGain, ExternalId, GameOutcome, GameRecord,
    ItemHandle, Skill,
};
use serde::{Deserialize, Serialize};

/// Character lifecycle, equipment and stat changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CharacterEvent {
    Created {
        player: ExternalId,
        character: CharacterId,
        name: String,
    },
    Equipped {
        player: ExternalId,
        slot: EquipSlot,
        item: ItemHandle,
        replaced: Option<ItemHandle>,
    },
    Unequipped {
        player: ExternalId,
        slot: EquipSlot,
        item: ItemHandle,
    },
    SkillAllocated {
        player: ExternalId,
        skill: Skill,
        points: u32,
    },
    /// Emitted once per committed unit of work that changed derived stats.
    StatsRecomputed {
        player: ExternalId,
        stats: DerivedStats,
    },
}

/// Inventory stack changes made outside equip/unequip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemAdded {
        player: ExternalId,
        item: ItemHandle,
        quantity: u32,
        total: u32,
    },
    ItemRemoved {
        player: ExternalId,
        item: ItemHandle,
        quantity: u32,
        remaining: u32,
    },
}

/// Player registration, experience, gold and game results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProgressionEvent {
    PlayerRegistered {
        player: ExternalId,
    },
    ExperienceGranted {
        player: ExternalId,
        amount: u64,
        gain: ExperienceGain,
    },
    LevelUp {
        player: ExternalId,
        level: u32,
        levels_gained: u32,
    },
    GameRecorded {
        player: ExternalId,
        outcome: GameOutcome,
        record: GameRecord,
    },
    GoldAdjusted {
        player: ExternalId,
        delta: i64,
        balance: u64,
    },
}

/// Maintenance passes over stored data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceEvent {
    EquipmentRepaired {
        character: CharacterId,
        rows_removed: usize,
    },
}
