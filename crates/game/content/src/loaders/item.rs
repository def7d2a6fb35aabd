//! Item catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, bail};
use progression_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in item catalog {}", path.display()))
    }

    /// Parse and validate catalog RON text.
    ///
    /// Rejects duplicate handles, empty names and a zero `max_stack`.
    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for item in &catalog.items {
            if !seen.insert(item.handle) {
                bail!("duplicate item handle {}", item.handle);
            }
            if item.name.trim().is_empty() {
                bail!("{} has an empty name", item.handle);
            }
            if item.max_stack == 0 {
                bail!("{} ({}) has max_stack 0", item.handle, item.name);
            }
        }

        Ok(catalog.items)
    }
}
