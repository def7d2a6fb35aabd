//! Equipment board for characters.
//!
//! The board is stored as rows, one per occupied (character, slot) pair, the
//! way a relational store keeps them. A healthy board never has two rows for
//! the same slot. Boards imported from older data may; reads then resolve to
//! the earliest-created row without touching anything, and [`EquipmentBoard::repair`]
//! removes the extras.

use std::collections::BTreeMap;

use crate::state::error::EquipmentError;
use crate::state::types::{CharacterId, ItemHandle, SlotRowId, Timestamp};

/// Fixed equip positions on the board.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipSlot {
    Weapon,
    Torso,
}

impl EquipSlot {
    /// Parses a slot name as sent by callers ("weapon", "Torso", ...).
    pub fn parse(name: &str) -> Result<Self, EquipmentError> {
        name.trim()
            .parse()
            .map_err(|_| EquipmentError::UnknownSlot {
                name: name.to_string(),
            })
    }
}

/// One stored equipment row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotRow {
    pub id: SlotRowId,
    pub slot: EquipSlot,
    pub item: ItemHandle,
    pub equipped_at: Timestamp,
}

/// Equipment state of one character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentBoard {
    character: CharacterId,
    rows: Vec<SlotRow>,
}

/// Rows dropped by [`EquipmentBoard::repair`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepairedSlots {
    pub removed: Vec<SlotRow>,
}

impl RepairedSlots {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.removed.len()
    }
}

impl EquipmentBoard {
    /// Creates an empty board (no rows).
    pub fn empty(character: CharacterId) -> Self {
        Self {
            character,
            rows: Vec::new(),
        }
    }

    /// Rebuilds a board from stored rows, exactly as stored.
    pub fn from_rows(character: CharacterId, rows: impl IntoIterator<Item = SlotRow>) -> Self {
        let mut rows: Vec<SlotRow> = rows.into_iter().collect();
        rows.sort_by_key(|row| row.id);
        Self { character, rows }
    }

    pub fn character(&self) -> CharacterId {
        self.character
    }

    pub fn rows(&self) -> &[SlotRow] {
        &self.rows
    }

    /// The authoritative row for a slot: the earliest-created one.
    pub fn row(&self, slot: EquipSlot) -> Option<&SlotRow> {
        // rows are kept sorted by id
        self.rows.iter().find(|row| row.slot == slot)
    }

    /// Item currently occupying a slot.
    pub fn item_in(&self, slot: EquipSlot) -> Option<ItemHandle> {
        self.row(slot).map(|row| row.item)
    }

    /// Occupied slots and their items, one per slot.
    pub fn equipped(&self) -> BTreeMap<EquipSlot, ItemHandle> {
        let mut equipped = BTreeMap::new();
        for row in &self.rows {
            equipped.entry(row.slot).or_insert(row.item);
        }
        equipped
    }

    /// Rows that shadow an earlier row for the same slot.
    pub fn duplicate_rows(&self) -> Vec<SlotRow> {
        let mut seen = Vec::with_capacity(self.rows.len());
        let mut duplicates = Vec::new();
        for row in &self.rows {
            if seen.contains(&row.slot) {
                duplicates.push(*row);
            } else {
                seen.push(row.slot);
            }
        }
        duplicates
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicate_rows().is_empty()
    }

    /// Keeps the earliest row per slot and drops the rest.
    ///
    /// Idempotent: a second call removes nothing.
    pub fn repair(&mut self) -> RepairedSlots {
        let removed = self.duplicate_rows();
        if !removed.is_empty() {
            self.rows.retain(|row| !removed.contains(row));
        }
        RepairedSlots { removed }
    }

    /// Puts `item` into `slot`, updating the existing row in place or creating
    /// one. Returns the item previously in the slot.
    ///
    /// Callers must [`repair`](Self::repair) first; this only ever touches the
    /// earliest row.
    pub fn place(&mut self, slot: EquipSlot, item: ItemHandle, now: Timestamp) -> Option<ItemHandle> {
        if let Some(row) = self.rows.iter_mut().find(|row| row.slot == slot) {
            let previous = row.item;
            row.item = item;
            row.equipped_at = now;
            return Some(previous);
        }

        let id = self.next_row_id();
        self.rows.push(SlotRow {
            id,
            slot,
            item,
            equipped_at: now,
        });
        None
    }

    /// Empties a slot, deleting its row. Returns the removed item, if any.
    pub fn clear(&mut self, slot: EquipSlot) -> Option<ItemHandle> {
        let index = self.rows.iter().position(|row| row.slot == slot)?;
        Some(self.rows.remove(index).item)
    }

    fn next_row_id(&self) -> SlotRowId {
        SlotRowId(self.rows.iter().map(|row| row.id.0).max().map_or(1, |max| max + 1))
    }
}
