//! In-memory StateRepository implementation for tests and local runs.

use std::sync::RwLock;

use progression_core::{
    Character, CharacterId, EquipmentBoard, ExternalId, Inventory, Player, PlayerId,
    PlayerProfile,
};

use crate::repository::{
    ChangeSet, RepositoryError, Result, StateRepository, StoredSheet, Tables,
};

/// In-memory implementation of StateRepository.
pub struct InMemoryStateRepo {
    tables: RwLock<Tables>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::with_tables(Tables::default())
    }

    /// Create with pre-populated rows.
    pub fn with_tables(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    pub(crate) fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> Result<T> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(f(&tables))
    }

    pub(crate) fn write<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> Result<T> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(f(&mut tables))
    }
}

impl Default for InMemoryStateRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn player(&self, id: PlayerId) -> Result<Option<Player>> {
        self.read(|t| t.player(id).cloned())
    }

    fn player_by_external(&self, external: ExternalId) -> Result<Option<Player>> {
        self.read(|t| t.player_by_external(external).cloned())
    }

    fn profile(&self, player: PlayerId) -> Result<Option<PlayerProfile>> {
        self.read(|t| t.profile(player).cloned())
    }

    fn character_of(&self, owner: PlayerId) -> Result<Option<Character>> {
        self.read(|t| t.character_of(owner).cloned())
    }

    fn name_taken(&self, name: &str) -> Result<bool> {
        self.read(|t| t.character_named(name).is_some())
    }

    fn inventory(&self, owner: PlayerId) -> Result<Inventory> {
        self.read(|t| t.inventory(owner))
    }

    fn board(&self, character: CharacterId) -> Result<EquipmentBoard> {
        self.read(|t| t.board(character))
    }

    fn sheet(&self, owner: PlayerId) -> Result<Option<StoredSheet>> {
        self.read(|t| t.sheet(owner))
    }

    fn characters(&self) -> Result<Vec<(CharacterId, PlayerId)>> {
        self.read(|t| t.characters().map(|c| (c.id, c.owner)).collect())
    }

    fn next_player_id(&self) -> Result<PlayerId> {
        self.write(|t| t.allocate_player_id())
    }

    fn next_character_id(&self) -> Result<CharacterId> {
        self.write(|t| t.allocate_character_id())
    }

    fn commit(&self, changes: ChangeSet) -> Result<()> {
        self.write(|t| t.apply(changes))?
    }
}
