//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use progression_core::{
    Character, CharacterId, EquipmentBoard, ExternalId, Inventory, Player, PlayerId,
    PlayerProfile,
};

use crate::repository::{
    ChangeSet, InMemoryStateRepo, RepositoryError, Result, StateRepository, StoredSheet, Tables,
};

/// File-based implementation of StateRepository.
///
/// Keeps all rows in memory and rewrites a single bincode snapshot on every
/// commit.
///
/// # File Format
///
/// Rows are stored as `state.bin` in bincode format. A commit serializes the
/// post-commit tables to `state.bin.tmp` and renames it over the snapshot, so
/// a crash leaves either the old or the new state on disk. In-memory rows are
/// swapped only after the rename succeeded.
pub struct FileStateRepository {
    path: PathBuf,
    rows: InMemoryStateRepo,
}

impl FileStateRepository {
    /// Opens the repository in `base_dir`, loading the snapshot if present.
    pub fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).map_err(RepositoryError::Io)?;
        let path = base_dir.join("state.bin");

        let tables = if path.exists() {
            let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
            let tables: Tables = bincode::deserialize(&bytes)
                .map_err(|e| RepositoryError::CorruptedData(e.to_string()))?;
            tracing::debug!(
                players = tables.player_count(),
                "Loaded state from {}",
                path.display()
            );
            tables
        } else {
            Tables::default()
        };

        Ok(Self {
            path,
            rows: InMemoryStateRepo::with_tables(tables),
        })
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, tables: &Tables) -> Result<()> {
        let temp_path = self.path.with_extension("bin.tmp");

        let bytes = bincode::serialize(tables)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved state to {}", self.path.display());
        Ok(())
    }
}

impl StateRepository for FileStateRepository {
    fn player(&self, id: PlayerId) -> Result<Option<Player>> {
        self.rows.player(id)
    }

    fn player_by_external(&self, external: ExternalId) -> Result<Option<Player>> {
        self.rows.player_by_external(external)
    }

    fn profile(&self, player: PlayerId) -> Result<Option<PlayerProfile>> {
        self.rows.profile(player)
    }

    fn character_of(&self, owner: PlayerId) -> Result<Option<Character>> {
        self.rows.character_of(owner)
    }

    fn name_taken(&self, name: &str) -> Result<bool> {
        self.rows.name_taken(name)
    }

    fn inventory(&self, owner: PlayerId) -> Result<Inventory> {
        self.rows.inventory(owner)
    }

    fn board(&self, character: CharacterId) -> Result<EquipmentBoard> {
        self.rows.board(character)
    }

    fn sheet(&self, owner: PlayerId) -> Result<Option<StoredSheet>> {
        self.rows.sheet(owner)
    }

    fn characters(&self) -> Result<Vec<(CharacterId, PlayerId)>> {
        self.rows.characters()
    }

    fn next_player_id(&self) -> Result<PlayerId> {
        self.rows.next_player_id()
    }

    fn next_character_id(&self) -> Result<CharacterId> {
        self.rows.next_character_id()
    }

    fn commit(&self, changes: ChangeSet) -> Result<()> {
        self.rows.write(|tables| -> Result<()> {
            let mut next = tables.clone();
            next.apply(changes)?;
            self.persist(&next)?;
            *tables = next;
            Ok(())
        })?
    }
}
