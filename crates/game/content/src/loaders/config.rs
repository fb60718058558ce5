//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

const BUILTIN_CONFIG: &str = include_str!("../../data/game.toml");

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse config from TOML text. Missing keys keep their defaults.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if config.max_level_difference == 0 {
            anyhow::bail!("max_level_difference must be positive");
        }
        Ok(config)
    }

    /// Configuration embedded in the binary.
    pub fn builtin() -> LoadResult<GameConfig> {
        Self::parse(BUILTIN_CONFIG)
    }
}
