//! Per-entity skill record.
//!
//! Only the dynamic part lives here: level and two absolute end points.
//! Everything else is derived from the template on demand, so the record is
//! `Copy` and cheap to persist or replicate.

use super::caster::Caster;
use super::checks::CastRejection;
use super::hash::SkillHash;
use super::registry::{RegistryError, SkillRegistry};
use super::template::SkillTemplate;
use crate::state::Tick;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub hash: SkillHash,
    /// 0 while unlearned.
    pub level: u32,
    pub cast_time_end: Tick,
    pub cooldown_end: Tick,
}

impl Skill {
    /// Fresh instance, ready immediately.
    pub fn new(template: &SkillTemplate, now: Tick) -> Self {
        Self {
            hash: template.hash(),
            level: u32::from(template.learn_default),
            cast_time_end: now,
            cooldown_end: now,
        }
    }

    pub fn template<'r>(&self, registry: &'r SkillRegistry) -> Result<&'r SkillTemplate, RegistryError> {
        registry.get(self.hash)
    }

    pub fn name<'r>(&self, registry: &'r SkillRegistry) -> Result<&'r str, RegistryError> {
        Ok(self.template(registry)?.name.as_str())
    }

    pub fn cast_time_ms(&self, registry: &SkillRegistry) -> Result<u64, RegistryError> {
        Ok(self.template(registry)?.cast_time_ms(self.level))
    }

    pub fn is_learned(&self) -> bool {
        self.level > 0
    }

    // ===== readiness, derived from the clock only =====

    pub fn cast_time_remaining(&self, now: Tick) -> u64 {
        now.millis_until(self.cast_time_end)
    }

    pub fn is_casting(&self, now: Tick) -> bool {
        self.cast_time_remaining(now) > 0
    }

    pub fn cooldown_remaining(&self, now: Tick) -> u64 {
        now.millis_until(self.cooldown_end)
    }

    pub fn is_on_cooldown(&self, now: Tick) -> bool {
        self.cooldown_remaining(now) > 0
    }

    pub fn is_ready(&self, now: Tick) -> bool {
        !self.is_casting(now) && !self.is_on_cooldown(now)
    }

    /// Earliest tick at which the skill is ready again.
    pub fn ready_at(&self) -> Tick {
        self.cast_time_end.max(self.cooldown_end)
    }

    pub fn set_on_cooldown(&mut self, now: Tick, cooldown_ms: u64) {
        self.cooldown_end = now + cooldown_ms;
    }

    /// Readiness (optional) plus the template's own caster requirements.
    ///
    /// Readiness is skipped when resolving a cast, since a skill is never
    /// ready while it is being cast.
    pub fn check_self<C: Caster + ?Sized>(
        &self,
        template: &SkillTemplate,
        caster: &C,
        now: Tick,
        check_ready: bool,
    ) -> Result<(), CastRejection> {
        if check_ready && !self.is_ready(now) {
            return Err(CastRejection::NotReady);
        }
        template.check_self(caster, self.level)
    }
}
