use crate::state::{Character, EquipmentBoard, Inventory, RepairedSlots};

/// Working copy of everything a character-scoped operation may touch.
///
/// The runtime loads a sheet, lets the engine stage mutations on it and
/// persists it as one unit. Derived stats are recomputed once, in
/// [`super::ProgressionEngine::commit`], no matter how many mutations were
/// staged.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterSheet {
    character: Character,
    board: EquipmentBoard,
    inventory: Inventory,
    dirty: bool,
    /// Set by the first staged mutation; survives the recompute.
    staged: bool,
    repaired: RepairedSlots,
}

impl CharacterSheet {
    pub fn new(character: Character, board: EquipmentBoard, inventory: Inventory) -> Self {
        Self {
            character,
            board,
            inventory,
            dirty: false,
            staged: false,
            repaired: RepairedSlots::default(),
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn board(&self) -> &EquipmentBoard {
        &self.board
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Whether skills or equipment changed since the last commit.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Duplicate rows dropped while staging mutations.
    pub fn repaired(&self) -> &RepairedSlots {
        &self.repaired
    }

    /// Whether the sheet differs from what was loaded, before or after the
    /// recompute.
    pub fn has_changes(&self) -> bool {
        self.staged || !self.repaired.is_empty()
    }

    pub fn into_parts(self) -> (Character, EquipmentBoard, Inventory) {
        (self.character, self.board, self.inventory)
    }

    pub(crate) fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    pub(crate) fn board_mut(&mut self) -> &mut EquipmentBoard {
        &mut self.board
    }

    pub(crate) fn replace_inventory(&mut self, inventory: Inventory) {
        self.inventory = inventory;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
        self.staged = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn repair_board(&mut self) {
        let repaired = self.board.repair();
        self.repaired.removed.extend(repaired.removed);
    }
}
