//! Content factory for loading everything from a data directory.

use std::path::{Path, PathBuf};

use progression_core::{ItemDefinition, ProgressionConfig};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult};

/// Content factory that loads all progression content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── progression.toml
/// └── items.ron
/// ```
///
/// A missing file falls back to the content shipped with this crate.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load progression configuration from `progression.toml`.
    pub fn load_config(&self) -> LoadResult<ProgressionConfig> {
        let path = self.data_dir.join("progression.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            ConfigLoader::parse(crate::DEFAULT_CONFIG)
        }
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        let path = self.data_dir.join("items.ron");
        if path.exists() {
            ItemLoader::load(&path)
        } else {
            ItemLoader::parse(crate::DEFAULT_ITEMS)
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_uses_shipped_content() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_items().unwrap().len(), 5);
        assert_eq!(factory.load_config().unwrap(), ProgressionConfig::default());
    }
}
