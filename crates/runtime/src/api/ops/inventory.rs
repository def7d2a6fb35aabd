//! Inventory stack changes outside of equip and unequip.

use progression_core::{ExternalId, Inventory, ItemHandle, ItemOracle, Timestamp};

use crate::api::errors::{Result, RuntimeError};
use crate::api::handle::RuntimeHandle;
use crate::api::views::InventoryLine;
use crate::events::InventoryEvent;
use crate::repository::ChangeSet;

impl RuntimeHandle {
    /// Grants `quantity` units of a catalog item. Returns the new stack size.
    pub async fn add_item(&self, external: ExternalId, item: ItemHandle, quantity: u32) -> Result<u32> {
        if self.oracles().items().definition(item).is_none() {
            return Err(RuntimeError::ItemNotFound(item));
        }

        let total = self
            .with_inventory(external, |inventory, now| {
                Ok(inventory.add(item, quantity, now)?)
            })
            .await?;

        self.publish(InventoryEvent::ItemAdded {
            player: external,
            item,
            quantity,
            total,
        });
        Ok(total)
    }

    /// Takes `quantity` units away. Returns what is left of the stack.
    pub async fn remove_item(
        &self,
        external: ExternalId,
        item: ItemHandle,
        quantity: u32,
    ) -> Result<u32> {
        let remaining = self
            .with_inventory(external, |inventory, _| Ok(inventory.remove(item, quantity)?))
            .await?;

        self.publish(InventoryEvent::ItemRemoved {
            player: external,
            item,
            quantity,
            remaining,
        });
        Ok(remaining)
    }

    /// Held stacks, most recently obtained first.
    pub fn inventory(&self, external: ExternalId) -> Result<Vec<InventoryLine>> {
        let player = self.resolve(external)?;
        let inventory = self.repo().inventory(player.id)?;
        let items = self.oracles().items();
        Ok(inventory
            .newest_first()
            .iter()
            .map(|entry| InventoryLine::resolve(entry, items))
            .collect())
    }

    async fn with_inventory<T>(
        &self,
        external: ExternalId,
        op: impl FnOnce(&mut Inventory, Timestamp) -> Result<T>,
    ) -> Result<T> {
        let player = self.resolve(external)?;
        let _guard = self.inner.locks.player(player.id).await;

        let mut inventory = self.repo().inventory(player.id)?;
        let value = op(&mut inventory, self.now())?;
        self.repo().commit(ChangeSet::new().inventory(inventory))?;
        Ok(value)
    }
}
