//! Admin configuration loaded from the environment.
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use progression_content::{ConfigLoader, ContentFactory, ItemLoader};
use progression_core::{ItemDefinition, ProgressionConfig};

/// Where the admin tool finds its store and content.
#[derive(Clone, Debug)]
pub struct AdminConfig {
    pub data_dir: PathBuf,
    /// RON item catalog. Defaults to `items.ron` in the data dir, then to the
    /// shipped catalog.
    pub catalog: Option<PathBuf>,
    /// TOML progression rules, resolved the same way.
    pub progression: Option<PathBuf>,
}

impl AdminConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PROGRESSION_DATA_DIR` - Directory of the state file (default: platform-specific)
    /// - `PROGRESSION_CATALOG` - Item catalog file (optional)
    /// - `PROGRESSION_CONFIG` - Progression rules file (optional)
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var_os("PROGRESSION_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            catalog: env::var_os("PROGRESSION_CATALOG").map(PathBuf::from),
            progression: env::var_os("PROGRESSION_CONFIG").map(PathBuf::from),
        }
    }

    /// Applies `--data-dir` from the command line over the environment.
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }

    pub fn load_items(&self) -> Result<Vec<ItemDefinition>> {
        match &self.catalog {
            Some(path) => ItemLoader::load(path)
                .with_context(|| format!("Failed to load catalog {}", path.display())),
            None => self.factory().load_items(),
        }
    }

    pub fn load_progression(&self) -> Result<ProgressionConfig> {
        match &self.progression {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            None => self.factory().load_config(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn factory(&self) -> ContentFactory {
        ContentFactory::new(&self.data_dir)
    }
}

/// Get the platform-specific data directory
///
/// - macOS: `~/Library/Application Support/progression`
/// - Linux: `~/.local/share/progression` (or `$XDG_DATA_HOME/progression`)
/// - Windows: `%APPDATA%\progression`
/// - Fallback: `./progression_data`
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "progression")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./progression_data"))
}
