//! Content factory for loading everything a host needs from one directory.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, SkillRegistry, SkillTemplate};

use crate::loaders::{ConfigLoader, LoadResult, SkillLoader};

/// Loaded game content: configuration plus the skill template registry.
#[derive(Debug, Clone)]
pub struct Content {
    pub config: GameConfig,
    pub registry: SkillRegistry,
}

impl Content {
    /// Content embedded in the binary.
    pub fn builtin() -> LoadResult<Self> {
        Ok(Self {
            config: ConfigLoader::builtin()?,
            registry: SkillLoader::registry(SkillLoader::builtin()?)?,
        })
    }
}

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── game.toml
/// └── skills.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `game.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("game.toml"))
    }

    /// Load skill templates from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillTemplate>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load configuration and skills.
    pub fn load(&self) -> LoadResult<Content> {
        Ok(Content {
            config: self.load_config()?,
            registry: SkillLoader::registry(self.load_skills()?)?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
