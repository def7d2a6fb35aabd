//! Equip, unequip and skill allocation.

use progression_core::{Character, EquipOutcome, EquipSlot, ExternalId, ItemHandle, Skill};

use crate::api::errors::Result;
use crate::api::handle::RuntimeHandle;
use crate::events::CharacterEvent;

impl RuntimeHandle {
    /// Moves one unit of `item` from the player's inventory into `slot`.
    ///
    /// Any previous occupant goes back to the inventory. The item must be
    /// held even when it already occupies the slot; in that case nothing
    /// changes.
    pub async fn equip(
        &self,
        external: ExternalId,
        slot: EquipSlot,
        item: ItemHandle,
    ) -> Result<EquipOutcome> {
        let commit = self
            .with_sheet(external, |engine, sheet, now| {
                Ok(engine.equip(sheet, slot, item, now)?)
            })
            .await?;
        let outcome = commit.value;

        if let EquipOutcome::Equipped { replaced } = outcome {
            tracing::debug!(player = %external, %slot, %item, ?replaced, "equipped item");
            self.publish(CharacterEvent::Equipped {
                player: external,
                slot,
                item,
                replaced,
            });
        }
        self.publish_stats(external, commit.stats);

        Ok(outcome)
    }

    /// Empties `slot`, returning its item to the inventory.
    ///
    /// Returns the item that was removed; an empty slot yields `None`.
    pub async fn unequip(&self, external: ExternalId, slot: EquipSlot) -> Result<Option<ItemHandle>> {
        let commit = self
            .with_sheet(external, |engine, sheet, now| {
                Ok(engine.unequip(sheet, slot, now)?)
            })
            .await?;
        let removed = commit.value;

        if let Some(item) = removed {
            tracing::debug!(player = %external, %slot, %item, "unequipped item");
            self.publish(CharacterEvent::Unequipped {
                player: external,
                slot,
                item,
            });
        }
        self.publish_stats(external, commit.stats);

        Ok(removed)
    }

    /// Spends free skill points on one skill and recomputes stats.
    pub async fn allocate_skill(
        &self,
        external: ExternalId,
        skill: Skill,
        points: u32,
    ) -> Result<Character> {
        let commit = self
            .with_sheet(external, |engine, sheet, now| {
                Ok(engine.allocate_skill(sheet, skill, points, now)?)
            })
            .await?;

        self.publish(CharacterEvent::SkillAllocated {
            player: external,
            skill,
            points,
        });
        self.publish_stats(external, commit.stats);

        Ok(commit.character)
    }
}
