//! Skill catalog loader.

use std::path::Path;

use game_core::{SkillRegistry, SkillTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const BUILTIN_SKILLS: &str = include_str!("../../data/skills.ron");

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillTemplate>,
}

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<SkillTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse a skill catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<SkillTemplate>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;
        Ok(catalog.skills)
    }

    /// Skill catalog embedded in the binary.
    pub fn builtin() -> LoadResult<Vec<SkillTemplate>> {
        Self::parse(BUILTIN_SKILLS)
    }

    /// Builds a registry, failing on duplicate names.
    pub fn registry(templates: Vec<SkillTemplate>) -> LoadResult<SkillRegistry> {
        Ok(SkillRegistry::from_templates(templates)?)
    }
}
