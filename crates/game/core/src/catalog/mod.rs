//! Static item catalog.
//!
//! Definitions are immutable at runtime and reached through [`ItemOracle`];
//! the core never stores item templates in player state, only handles.

mod item;

pub use item::{EquipTag, ItemDefinition, ItemType, Rarity};

use crate::state::ItemHandle;
use crate::stats::StatBonuses;

pub trait ItemOracle: Send + Sync {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition>;

    /// Returns all item definitions available in this oracle.
    fn all_definitions(&self) -> Vec<ItemDefinition>;

    /// Bonus block of an item, if the catalog knows it.
    fn bonuses(&self, handle: ItemHandle) -> Option<StatBonuses> {
        self.definition(handle).map(|def| def.bonuses)
    }
}
