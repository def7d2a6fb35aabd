//! Row storage shared by the repository implementations.
//!
//! [`Tables`] is the whole persistent state: players, profiles, characters,
//! equipment boards and inventories. Writers never touch it directly; they
//! hand a [`ChangeSet`] to [`Tables::apply`], which checks every constraint
//! before changing anything.

use std::collections::BTreeMap;

use progression_core::{
    Character, CharacterId, EquipmentBoard, ExternalId, Inventory, Player, PlayerId,
    PlayerProfile, name_key,
};
use serde::{Deserialize, Serialize};

use crate::repository::{RepositoryError, Result};

/// Constraint: one player per external identity.
pub const PLAYER_EXTERNAL_ID: &str = "player_external_id";
/// Constraint: a player owns at most one character.
pub const CHARACTER_OWNER: &str = "character_owner";
/// Constraint: character names are unique, ignoring case.
pub const CHARACTER_NAME: &str = "character_name";

/// Whole-row replacements committed as one unit.
///
/// Rows are upserted by primary key. A change set is applied entirely or not
/// at all.
#[derive(Clone, Debug, Default)]
pub struct ChangeSet {
    pub players: Vec<Player>,
    pub profiles: Vec<PlayerProfile>,
    pub characters: Vec<Character>,
    pub boards: Vec<EquipmentBoard>,
    pub inventories: Vec<Inventory>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    pub fn profile(mut self, profile: PlayerProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    pub fn character(mut self, character: Character) -> Self {
        self.characters.push(character);
        self
    }

    pub fn board(mut self, board: EquipmentBoard) -> Self {
        self.boards.push(board);
        self
    }

    pub fn inventory(mut self, inventory: Inventory) -> Self {
        self.inventories.push(inventory);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
            && self.profiles.is_empty()
            && self.characters.is_empty()
            && self.boards.is_empty()
            && self.inventories.is_empty()
    }
}

/// Stored rows for one character: the character, its board and its owner's
/// inventory, read at the same instant.
pub type StoredSheet = (Character, EquipmentBoard, Inventory);

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Tables {
    players: BTreeMap<PlayerId, Player>,
    profiles: BTreeMap<PlayerId, PlayerProfile>,
    characters: BTreeMap<CharacterId, Character>,
    boards: BTreeMap<CharacterId, EquipmentBoard>,
    inventories: BTreeMap<PlayerId, Inventory>,
    last_player_id: u64,
    last_character_id: u64,
}

impl Tables {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn player_by_external(&self, external: ExternalId) -> Option<&Player> {
        self.players
            .values()
            .find(|player| player.external_id == external)
    }

    pub fn profile(&self, player: PlayerId) -> Option<&PlayerProfile> {
        self.profiles.get(&player)
    }

    pub fn character_of(&self, owner: PlayerId) -> Option<&Character> {
        self.characters
            .values()
            .find(|character| character.owner == owner)
    }

    pub fn character_named(&self, name: &str) -> Option<&Character> {
        let key = name_key(name);
        self.characters
            .values()
            .find(|character| character.name_key() == key)
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    /// Stored board, or an empty one if the character never equipped anything.
    pub fn board(&self, character: CharacterId) -> EquipmentBoard {
        self.boards
            .get(&character)
            .cloned()
            .unwrap_or_else(|| EquipmentBoard::empty(character))
    }

    /// Stored inventory, or an empty one.
    pub fn inventory(&self, owner: PlayerId) -> Inventory {
        self.inventories
            .get(&owner)
            .cloned()
            .unwrap_or_else(|| Inventory::empty(owner))
    }

    pub fn sheet(&self, owner: PlayerId) -> Option<StoredSheet> {
        let character = self.character_of(owner)?.clone();
        let board = self.board(character.id);
        Some((character, board, self.inventory(owner)))
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn allocate_player_id(&mut self) -> PlayerId {
        self.last_player_id += 1;
        PlayerId(self.last_player_id)
    }

    pub fn allocate_character_id(&mut self) -> CharacterId {
        self.last_character_id += 1;
        CharacterId(self.last_character_id)
    }

    /// Validates `changes` against the current rows, then applies them.
    pub fn apply(&mut self, changes: ChangeSet) -> Result<()> {
        self.validate(&changes)?;

        for player in changes.players {
            self.last_player_id = self.last_player_id.max(player.id.0);
            self.players.insert(player.id, player);
        }
        for profile in changes.profiles {
            self.profiles.insert(profile.player, profile);
        }
        for character in changes.characters {
            self.last_character_id = self.last_character_id.max(character.id.0);
            self.characters.insert(character.id, character);
        }
        for board in changes.boards {
            if board.rows().is_empty() {
                self.boards.remove(&board.character());
            } else {
                self.boards.insert(board.character(), board);
            }
        }
        for inventory in changes.inventories {
            if inventory.is_empty() {
                self.inventories.remove(&inventory.owner());
            } else {
                self.inventories.insert(inventory.owner(), inventory);
            }
        }

        Ok(())
    }

    fn validate(&self, changes: &ChangeSet) -> Result<()> {
        let player_exists = |id: PlayerId| {
            self.players.contains_key(&id) || changes.players.iter().any(|p| p.id == id)
        };
        let character_exists = |id: CharacterId| {
            self.characters.contains_key(&id) || changes.characters.iter().any(|c| c.id == id)
        };

        for (index, player) in changes.players.iter().enumerate() {
            let clash_stored = self
                .players
                .values()
                .any(|other| other.id != player.id && other.external_id == player.external_id);
            let clash_batch = changes.players[..index]
                .iter()
                .any(|other| other.id != player.id && other.external_id == player.external_id);
            if clash_stored || clash_batch {
                return Err(RepositoryError::UniqueViolation {
                    constraint: PLAYER_EXTERNAL_ID,
                    detail: format!("external id {} already registered", player.external_id),
                });
            }
        }

        for profile in &changes.profiles {
            if !player_exists(profile.player) {
                return Err(missing("player", profile.player));
            }
        }

        for (index, character) in changes.characters.iter().enumerate() {
            if !player_exists(character.owner) {
                return Err(missing("player", character.owner));
            }

            let earlier = &changes.characters[..index];
            let stored = self
                .characters
                .values()
                .filter(|other| !changes.characters.iter().any(|c| c.id == other.id));
            let others = || stored.clone().chain(earlier.iter()).filter(|o| o.id != character.id);

            if others().any(|other| other.owner == character.owner) {
                return Err(RepositoryError::UniqueViolation {
                    constraint: CHARACTER_OWNER,
                    detail: format!("{} already owns a character", character.owner),
                });
            }
            let key = character.name_key();
            if others().any(|other| other.name_key() == key) {
                return Err(RepositoryError::UniqueViolation {
                    constraint: CHARACTER_NAME,
                    detail: character.name.clone(),
                });
            }
        }

        for board in &changes.boards {
            if !character_exists(board.character()) {
                return Err(missing("character", board.character()));
            }
        }
        for inventory in &changes.inventories {
            if !player_exists(inventory.owner()) {
                return Err(missing("player", inventory.owner()));
            }
        }

        Ok(())
    }
}

fn missing(entity: &'static str, id: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::MissingReference {
        entity,
        detail: id.to_string(),
    }
}
