use super::registry::RegistryError;
use crate::error::{ErrorSeverity, GameError};

/// Errors from operations on an entity's skill collection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("skill index {index} out of range (have {len})")]
    InvalidIndex { index: usize, len: usize },

    #[error("skill `{name}` is already at max level {max_level}")]
    MaxLevelReached { name: String, max_level: u32 },

    #[error("skill `{name}` requires caster level {required}, have {actual}")]
    LevelTooLow {
        name: String,
        required: i32,
        actual: u32,
    },
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Registry(err) => err.severity(),
            Self::InvalidIndex { .. } | Self::MaxLevelReached { .. } | Self::LevelTooLow { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Registry(err) => err.error_code(),
            Self::InvalidIndex { .. } => "SKILL_INVALID_INDEX",
            Self::MaxLevelReached { .. } => "SKILL_MAX_LEVEL_REACHED",
            Self::LevelTooLow { .. } => "SKILL_LEVEL_TOO_LOW",
        }
    }
}
