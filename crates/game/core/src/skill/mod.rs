//! Skills, buffs and the cast controller.
//!
//! Templates ([`SkillTemplate`]) are shared and immutable; each entity owns a
//! [`Skills`] collection of [`Skill`] instances and active [`Buff`]s that
//! reference templates by [`SkillHash`].
mod bonus;
mod buff;
mod cast;
mod caster;
mod checks;
mod curve;
mod error;
mod event;
mod hash;
mod instance;
pub mod registry;
mod skills;
mod template;

#[cfg(test)]
pub(crate) mod test_utils;

pub use bonus::StatBonuses;
pub use buff::Buff;
pub use cast::{CastProgress, CastRequest, CastState};
pub use caster::{Caster, Target, TargetEntity};
pub use checks::CastRejection;
pub use curve::{ExponentialLong, LinearFloat, LinearInt};
pub use error::SkillError;
pub use event::SkillEvent;
pub use hash::SkillHash;
pub use instance::Skill;
pub use registry::{RegistryError, SkillRegistry};
pub use skills::Skills;
pub use template::{BuffSpec, SkillKind, SkillTemplate, StatCurves};
