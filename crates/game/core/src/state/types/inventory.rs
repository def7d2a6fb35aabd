//! Inventory ledger for a single player.
//!
//! Holds at most one entry per item. Quantities are always positive: adding
//! merges into the existing entry and an entry that reaches zero is removed,
//! never kept.

use std::collections::BTreeMap;

use crate::state::error::InventoryError;
use crate::state::types::{ItemHandle, PlayerId, Timestamp};

/// A stack of one item held by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryEntry {
    pub item: ItemHandle,
    pub quantity: u32,
    /// When the stack was first created. Merging keeps the original value.
    pub obtained_at: Timestamp,
}

/// All stacks owned by one player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    owner: PlayerId,
    entries: BTreeMap<ItemHandle, InventoryEntry>,
}

impl Inventory {
    pub fn empty(owner: PlayerId) -> Self {
        Self {
            owner,
            entries: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Adds `quantity` units, merging into the existing stack if present.
    ///
    /// Returns the new stack size.
    pub fn add(
        &mut self,
        item: ItemHandle,
        quantity: u32,
        now: Timestamp,
    ) -> Result<u32, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::ZeroQuantity { item });
        }

        let entry = self.entries.entry(item).or_insert(InventoryEntry {
            item,
            quantity: 0,
            obtained_at: now,
        });
        entry.quantity = entry
            .quantity
            .checked_add(quantity)
            .ok_or(InventoryError::StackOverflow { item })?;
        Ok(entry.quantity)
    }

    /// Removes `quantity` units. Exhausting the stack deletes the entry.
    ///
    /// Returns the remaining stack size (0 when the entry was deleted).
    pub fn remove(&mut self, item: ItemHandle, quantity: u32) -> Result<u32, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::ZeroQuantity { item });
        }

        let held = self.quantity(item);
        if held == 0 {
            return Err(InventoryError::NotHeld { item });
        }
        if quantity > held {
            return Err(InventoryError::InsufficientQuantity {
                item,
                requested: quantity,
                available: held,
            });
        }

        let remaining = held - quantity;
        if remaining == 0 {
            self.entries.remove(&item);
        } else if let Some(entry) = self.entries.get_mut(&item) {
            entry.quantity = remaining;
        }
        Ok(remaining)
    }

    /// Current stack size, 0 when the item is not held.
    pub fn quantity(&self, item: ItemHandle) -> u32 {
        self.entries.get(&item).map_or(0, |entry| entry.quantity)
    }

    pub fn contains(&self, item: ItemHandle) -> bool {
        self.entries.contains_key(&item)
    }

    pub fn get(&self, item: ItemHandle) -> Option<&InventoryEntry> {
        self.entries.get(&item)
    }

    /// Entries ordered by item handle.
    pub fn entries(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.entries.values()
    }

    /// Entries ordered most recently obtained first, ties by handle.
    pub fn newest_first(&self) -> Vec<InventoryEntry> {
        let mut entries: Vec<InventoryEntry> = self.entries.values().copied().collect();
        entries.sort_by(|a, b| b.obtained_at.cmp(&a.obtained_at).then(a.item.cmp(&b.item)));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
