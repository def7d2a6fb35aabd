//! Repository contract for loading and committing player state.

use progression_core::{
    Character, CharacterId, EquipmentBoard, ExternalId, Inventory, Player, PlayerId,
    PlayerProfile,
};

use super::Result;
use super::tables::{ChangeSet, StoredSheet};

/// Repository for player, character, inventory and equipment rows.
///
/// Reads return owned copies; each call observes one consistent snapshot.
/// Writes go through [`StateRepository::commit`], which applies a whole
/// [`ChangeSet`] atomically or fails without changing anything.
pub trait StateRepository: Send + Sync {
    fn player(&self, id: PlayerId) -> Result<Option<Player>>;

    fn player_by_external(&self, external: ExternalId) -> Result<Option<Player>>;

    fn profile(&self, player: PlayerId) -> Result<Option<PlayerProfile>>;

    fn character_of(&self, owner: PlayerId) -> Result<Option<Character>>;

    /// Whether any character already uses `name`, ignoring case.
    fn name_taken(&self, name: &str) -> Result<bool>;

    fn inventory(&self, owner: PlayerId) -> Result<Inventory>;

    fn board(&self, character: CharacterId) -> Result<EquipmentBoard>;

    /// Character, board and inventory of `owner`, read together.
    fn sheet(&self, owner: PlayerId) -> Result<Option<StoredSheet>>;

    /// Every character id with its owner.
    fn characters(&self) -> Result<Vec<(CharacterId, PlayerId)>>;

    fn next_player_id(&self) -> Result<PlayerId>;

    fn next_character_id(&self) -> Result<CharacterId>;

    /// Applies all rows in `changes` or none of them.
    fn commit(&self, changes: ChangeSet) -> Result<()>;
}
