//! Deterministic skill, buff and progression rules shared by every host.
//!
//! `game-core` owns no world state. Hosts describe their entities through
//! [`skill::Caster`], drive the cast controller with a monotonic [`Tick`]
//! clock and drain the queued events after each update.
pub mod aggro;
pub mod config;
pub mod error;
pub mod faction;
pub mod hotbar;
pub mod progression;
pub mod skill;
pub mod state;

pub use aggro::AggroArea;
pub use config::GameConfig;
pub use error::{ErrorSeverity, GameError};
pub use faction::Faction;
pub use hotbar::{Skillbar, SkillbarSlot};
pub use progression::{Experience, ExperienceError, Level, LevelUp, balance_experience_reward};
pub use skill::{
    Buff, BuffSpec, CastProgress, CastRejection, CastRequest, CastState, Caster, ExponentialLong,
    LinearFloat, LinearInt, RegistryError, Skill, SkillError, SkillEvent, SkillHash, SkillKind,
    SkillRegistry, SkillTemplate, Skills, StatBonuses, StatCurves, Target, TargetEntity,
};
pub use state::{EntityId, Position, ResourcePool, Tick};
