//! [`progression_core::ItemOracle`] backed by an in-memory map.
use progression_core::{ItemDefinition, ItemHandle, ItemOracle};
use std::collections::BTreeMap;

/// ItemOracle implementation with static item definitions
pub struct ItemOracleImpl {
    definitions: BTreeMap<ItemHandle, ItemDefinition>,
}

impl ItemOracleImpl {
    pub fn new() -> Self {
        Self {
            definitions: BTreeMap::new(),
        }
    }

    /// Builds the oracle from loaded definitions. Later duplicates win.
    pub fn from_definitions(definitions: impl IntoIterator<Item = ItemDefinition>) -> Self {
        let mut oracle = Self::new();
        for def in definitions {
            oracle.add_definition(def);
        }
        oracle
    }

    /// Add an item definition
    pub fn add_definition(&mut self, def: ItemDefinition) {
        self.definitions.insert(def.handle, def);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for ItemOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemOracle for ItemOracleImpl {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition> {
        self.definitions.get(&handle).cloned()
    }

    /// Sorted by handle.
    fn all_definitions(&self) -> Vec<ItemDefinition> {
        self.definitions.values().cloned().collect()
    }
}
