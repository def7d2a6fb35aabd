//! Deterministic progression rules and data types.
//!
//! `progression-core` defines the canonical rules (stat derivation, inventory
//! ledger, equipment board, progression bookkeeping) and exposes pure APIs that
//! the runtime wraps in transactions. All character mutations flow through
//! [`engine::ProgressionEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod progression;
pub mod state;
pub mod stats;

pub use catalog::{EquipTag, ItemDefinition, ItemOracle, ItemType, Rarity};
pub use config::ProgressionConfig;
pub use engine::{CharacterSheet, EngineError, EquipOutcome, ProgressionEngine};
pub use error::{ErrorKind, GameError};
pub use progression::{
    ExperienceGain, GameOutcome, GameRecord, PlayerProfile, ProgressionError, level_for_experience,
};
pub use state::{
    Character, CharacterError, CharacterId, EquipSlot, EquipmentBoard, EquipmentError, ExternalId,
    ExternalIdentity, Inventory, InventoryEntry, InventoryError, ItemHandle, LinkedIdentity,
    MAX_NAME_LEN, Player, PlayerId, RepairedSlots, SlotRow, SlotRowId, Timestamp, name_key,
};
pub use stats::{DerivedStats, MAX_SKILL, Skill, SkillAllocation, SkillError, StatBonuses, derive};
