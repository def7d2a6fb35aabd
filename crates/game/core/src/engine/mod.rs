//! Character-scoped operations and the single recompute step.
//!
//! The [`ProgressionEngine`] stages mutations on a [`CharacterSheet`] and
//! never persists anything. Each operation validates before it mutates, so a
//! failed call leaves the sheet exactly as it was. Derived stats are brought
//! up to date by [`ProgressionEngine::commit`], once per unit of work.

mod errors;
mod sheet;

pub use errors::EngineError;
pub use sheet::CharacterSheet;

use crate::catalog::ItemOracle;
use crate::config::ProgressionConfig;
use crate::progression::ExperienceGain;
use crate::state::{
    Character, CharacterError, CharacterId, EquipSlot, EquipmentBoard, EquipmentError, ItemHandle,
    MAX_NAME_LEN, PlayerId, Timestamp,
};
use crate::stats::{DerivedStats, Skill, SkillAllocation, StatBonuses, derive};

/// Result of a successful equip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipOutcome {
    /// The item now occupies the slot. `replaced` went back to the inventory.
    Equipped { replaced: Option<ItemHandle> },
    /// The slot already held this item and another unit is in the
    /// inventory; nothing changed.
    AlreadyEquipped,
}

/// Pure rules engine over character sheets.
pub struct ProgressionEngine<'a> {
    config: &'a ProgressionConfig,
    items: &'a dyn ItemOracle,
}

impl<'a> ProgressionEngine<'a> {
    pub fn new(config: &'a ProgressionConfig, items: &'a dyn ItemOracle) -> Self {
        Self { config, items }
    }

    pub fn config(&self) -> &ProgressionConfig {
        self.config
    }

    /// Validates a creation request and builds the level-1 character with its
    /// initial stat block.
    ///
    /// Ownership and name uniqueness are directory concerns and are checked by
    /// the caller against the store.
    pub fn create_character(
        &self,
        id: CharacterId,
        owner: PlayerId,
        name: &str,
        skills: SkillAllocation,
        now: Timestamp,
    ) -> Result<Character, CharacterError> {
        let name = name.trim();
        let len = name.chars().count();
        if len == 0 || len > MAX_NAME_LEN {
            return Err(CharacterError::InvalidName {
                len,
                max: MAX_NAME_LEN,
            });
        }

        skills.validate_for_creation(self.config)?;

        let derived = derive(&skills, []);
        Ok(Character::new(id, owner, name.to_string(), skills, derived, now))
    }

    /// Moves one unit of `item` from the inventory into `slot`, returning any
    /// previous occupant to the inventory.
    pub fn equip(
        &self,
        sheet: &mut CharacterSheet,
        slot: EquipSlot,
        item: ItemHandle,
        now: Timestamp,
    ) -> Result<EquipOutcome, EngineError> {
        let definition = self
            .items
            .definition(item)
            .ok_or(EquipmentError::UnknownItem { item })?;
        if !definition.fits(slot) {
            return Err(EquipmentError::SlotMismatch {
                item,
                slot,
                tag: definition.equip_tag,
            }
            .into());
        }

        sheet.repair_board();

        if !sheet.inventory().contains(item) {
            return Err(EquipmentError::ItemNotInInventory { item }.into());
        }
        let previous = sheet.board().item_in(slot);
        if previous == Some(item) {
            return Ok(EquipOutcome::AlreadyEquipped);
        }

        let mut inventory = sheet.inventory().clone();
        inventory.remove(item, 1)?;
        if let Some(previous) = previous {
            inventory
                .add(previous, 1, now)
                .map_err(|source| EquipmentError::ReturnFailed {
                    item: previous,
                    source,
                })?;
        }

        sheet.board_mut().place(slot, item, now);
        sheet.replace_inventory(inventory);
        sheet.character_mut().touch(now);
        sheet.mark_dirty();

        Ok(EquipOutcome::Equipped { replaced: previous })
    }

    /// Clears `slot` and returns its item to the inventory. An empty slot is
    /// a no-op and yields `None`.
    pub fn unequip(
        &self,
        sheet: &mut CharacterSheet,
        slot: EquipSlot,
        now: Timestamp,
    ) -> Result<Option<ItemHandle>, EngineError> {
        sheet.repair_board();

        let Some(item) = sheet.board().item_in(slot) else {
            return Ok(None);
        };

        let mut inventory = sheet.inventory().clone();
        inventory
            .add(item, 1, now)
            .map_err(|source| EquipmentError::ReturnFailed { item, source })?;

        sheet.board_mut().clear(slot);
        sheet.replace_inventory(inventory);
        sheet.character_mut().touch(now);
        sheet.mark_dirty();

        Ok(Some(item))
    }

    /// Spends free skill points on one skill.
    pub fn allocate_skill(
        &self,
        sheet: &mut CharacterSheet,
        skill: Skill,
        points: u32,
        now: Timestamp,
    ) -> Result<(), EngineError> {
        let character = sheet.character_mut();
        character.spend_skill_points(skill, points)?;
        character.touch(now);
        sheet.mark_dirty();
        Ok(())
    }

    /// Adds experience; levels gained also grant free skill points.
    ///
    /// Skills and equipment are unchanged, so the stat cache stays valid.
    pub fn grant_experience(
        &self,
        character: &mut Character,
        amount: u64,
        now: Timestamp,
    ) -> ExperienceGain {
        let gain = character.gain_experience(amount, self.config);
        if amount > 0 {
            character.touch(now);
        }
        gain
    }

    /// Derived stats for a skill allocation and board.
    ///
    /// Items missing from the catalog contribute nothing.
    pub fn stats_for(&self, skills: &SkillAllocation, board: &EquipmentBoard) -> DerivedStats {
        let bonuses: Vec<StatBonuses> = board
            .equipped()
            .values()
            .filter_map(|item| self.items.bonuses(*item))
            .collect();
        derive(skills, bonuses.iter())
    }

    /// Recomputes and overwrites the character's stat cache unconditionally.
    pub fn recompute(&self, sheet: &mut CharacterSheet) -> DerivedStats {
        let stats = self.stats_for(sheet.character().skills(), sheet.board());
        sheet.character_mut().apply_derived(stats);
        sheet.clear_dirty();
        stats
    }

    /// Finishes a unit of work: recomputes if anything staged requires it.
    ///
    /// Returns the new stats when a recompute ran.
    pub fn commit(&self, sheet: &mut CharacterSheet) -> Option<DerivedStats> {
        sheet.is_dirty().then(|| self.recompute(sheet))
    }
}
