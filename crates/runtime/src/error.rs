//! Unified error type surfaced by the simulation API.
//!
//! Wraps failures from the skill rules, the template registry and the
//! experience accumulator so hosts can bubble them up with one type.
use game_core::{
    EntityId, ErrorSeverity, ExperienceError, GameError, RegistryError, SkillError,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("no actor with id {0}")]
    UnknownActor(EntityId),

    #[error("actor {0} is dead")]
    ActorDead(EntityId),

    #[error(transparent)]
    Skill(#[from] SkillError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Experience(#[from] ExperienceError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownActor(_) | Self::ActorDead(_) => ErrorSeverity::Validation,
            Self::Skill(err) => err.severity(),
            Self::Registry(err) => err.severity(),
            Self::Experience(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownActor(_) => "RUNTIME_UNKNOWN_ACTOR",
            Self::ActorDead(_) => "RUNTIME_ACTOR_DEAD",
            Self::Skill(err) => err.error_code(),
            Self::Registry(err) => err.error_code(),
            Self::Experience(err) => err.error_code(),
        }
    }
}
