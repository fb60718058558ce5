//! Content loaders for reading game data from files.
//!
//! Loaders parse RON/TOML straight into game-core types through serde.

pub mod config;
pub mod factory;
pub mod skills;

pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use skills::{SkillCatalog, SkillLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
