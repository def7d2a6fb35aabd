//! Progression configuration loader.

use std::path::Path;

use anyhow::bail;
use progression_core::ProgressionConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for progression configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<ProgressionConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config TOML text. Missing keys keep their defaults.
    pub fn parse(content: &str) -> LoadResult<ProgressionConfig> {
        let config: ProgressionConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.experience_per_level == 0 {
            bail!("experience_per_level must be positive");
        }
        if config.creation_budget() < config.skill_floor.saturating_mul(3) {
            bail!(
                "creation budget {} is below three times the skill floor {}",
                config.creation_budget(),
                config.skill_floor
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_config_matches_defaults() {
        let config = ConfigLoader::parse(crate::DEFAULT_CONFIG).unwrap();
        assert_eq!(config, ProgressionConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = ConfigLoader::parse("creation_bonus_points = 3\n").unwrap();
        assert_eq!(config.creation_budget(), 18);
        assert_eq!(config.experience_per_level, 100);
    }

    #[test]
    fn rejects_unreachable_budget() {
        assert!(ConfigLoader::parse("skill_floor = 10\n").is_err());
        assert!(ConfigLoader::parse("experience_per_level = 0\n").is_err());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progression.toml");
        std::fs::write(&path, "starting_gold = 250\n").unwrap();
        assert_eq!(ConfigLoader::load(&path).unwrap().starting_gold, 250);
    }
}
