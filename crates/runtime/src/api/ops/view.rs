//! Read-only views. Reads never repair or otherwise write.

use progression_core::{Character, ExternalId, ItemOracle};

use crate::api::errors::{Result, RuntimeError};
use crate::api::handle::RuntimeHandle;
use crate::api::views::{CharacterView, EquippedItem, InventoryLine};

impl RuntimeHandle {
    pub fn character(&self, external: ExternalId) -> Result<Character> {
        let player = self.resolve(external)?;
        self.repo()
            .character_of(player.id)?
            .ok_or(RuntimeError::CharacterNotFound(external))
    }

    /// Character, display stats, equipment and inventory from one snapshot.
    ///
    /// Slots with duplicate rows show the earliest-created row.
    pub fn character_view(&self, external: ExternalId) -> Result<CharacterView> {
        let player = self.resolve(external)?;
        let (character, board, inventory) = self
            .repo()
            .sheet(player.id)?
            .ok_or(RuntimeError::CharacterNotFound(external))?;
        let items = self.oracles().items();

        let equipment = board
            .equipped()
            .into_keys()
            .filter_map(|slot| board.row(slot))
            .map(|row| EquippedItem {
                slot: row.slot,
                item: row.item,
                definition: items.definition(row.item),
                equipped_at: row.equipped_at,
            })
            .collect();
        let inventory = inventory
            .newest_first()
            .iter()
            .map(|entry| InventoryLine::resolve(entry, items))
            .collect();

        Ok(CharacterView {
            stats: character.derived().rounded(),
            character,
            equipment,
            inventory,
        })
    }
}
