//! Cast validation and effect resolution for a template at a given level.
//!
//! Checks run in a fixed order: self, target, distance, field of view. A
//! failed check is an ordinary outcome reported as [`CastRejection`], never
//! an error.

use super::buff::Buff;
use super::caster::{Caster, Target};
use super::template::{SkillKind, SkillTemplate};
use crate::state::{Position, Tick};

/// Reason a cast request or a cast resolution did not go through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CastRejection {
    /// Another skill is being cast.
    Busy,
    /// The skill is casting or cooling down.
    NotReady,
    NotLearned,
    /// Passive skills are never cast.
    Passive,
    Dead,
    InsufficientMana,
    MissingWeapon,
    NoTarget,
    InvalidTarget,
    OutOfRange,
    OutsideFieldOfView,
}

impl SkillTemplate {
    /// Requirements on the caster itself (readiness is checked by the instance).
    pub fn check_self<C: Caster + ?Sized>(
        &self,
        caster: &C,
        level: u32,
    ) -> Result<(), CastRejection> {
        if self.is_passive() {
            return Err(CastRejection::Passive);
        }
        if level == 0 {
            return Err(CastRejection::NotLearned);
        }
        if !caster.is_alive() {
            return Err(CastRejection::Dead);
        }
        if caster.mana().current < self.mana_cost(level) {
            return Err(CastRejection::InsufficientMana);
        }
        if self.requires_weapon && !caster.has_weapon() {
            return Err(CastRejection::MissingWeapon);
        }
        Ok(())
    }

    /// Validates the caster's target and corrects it where the skill allows.
    ///
    /// Heals fall back to the caster when the target is missing, dead or
    /// hostile. Buffs always target the caster.
    pub fn check_target<C: Caster + ?Sized>(&self, caster: &mut C) -> Result<(), CastRejection> {
        match &self.kind {
            SkillKind::TargetDamage { .. } => match caster.target() {
                Some(Target::Entity(entity)) if entity.alive && entity.hostile => Ok(()),
                Some(_) => Err(CastRejection::InvalidTarget),
                None => Err(CastRejection::NoTarget),
            },
            SkillKind::AreaDamage { .. } => {
                if caster.target().is_some() {
                    Ok(())
                } else {
                    Err(CastRejection::NoTarget)
                }
            }
            SkillKind::TargetHeal { .. } => {
                let healable = matches!(
                    caster.target(),
                    Some(Target::Entity(entity)) if entity.alive && !entity.hostile
                );
                if !healable {
                    let own = caster.as_target();
                    caster.set_target(Some(own));
                }
                Ok(())
            }
            SkillKind::Buff(_) => {
                let own = caster.as_target();
                caster.set_target(Some(own));
                Ok(())
            }
            SkillKind::Passive(_) => Err(CastRejection::Passive),
        }
    }

    /// Range test against the per-level cast range.
    ///
    /// Returns the destination for positional effects.
    pub fn check_distance<C: Caster + ?Sized>(
        &self,
        caster: &C,
        level: u32,
    ) -> Result<Position, CastRejection> {
        if let SkillKind::Buff(_) = self.kind {
            return Ok(caster.position());
        }
        let target = caster.target().ok_or(CastRejection::NoTarget)?;
        let destination = target.position();
        if caster.position().distance(destination) <= self.cast_range(level) {
            Ok(destination)
        } else {
            Err(CastRejection::OutOfRange)
        }
    }

    /// Facing cone gate. Templates without a cone always pass, as do
    /// self-targeted casts and targets standing on the caster.
    pub fn check_fov<C: Caster + ?Sized>(&self, caster: &C) -> Result<(), CastRejection> {
        let Some(fov) = self.fov_degrees else {
            return Ok(());
        };
        if let SkillKind::Buff(_) = self.kind {
            return Ok(());
        }
        let Some(target) = caster.target() else {
            return Err(CastRejection::NoTarget);
        };
        if target.entity().is_some_and(|entity| entity.id == caster.id()) {
            return Ok(());
        }

        let direction = caster.position().towards(target.position());
        match caster.forward().angle_to(direction) {
            Some(angle) if angle > fov * 0.5 => Err(CastRejection::OutsideFieldOfView),
            _ => Ok(()),
        }
    }

    /// Resolves the skill's effect against the caster's current target.
    ///
    /// Buff skills produce the buff for the caster to keep; every other
    /// effect goes through the caster's effect requests.
    pub fn apply<C: Caster + ?Sized>(&self, caster: &mut C, level: u32, now: Tick) -> Option<Buff> {
        let target = caster.target();
        match &self.kind {
            SkillKind::TargetDamage { damage } => {
                if let Some(entity) = target.as_ref().and_then(Target::entity) {
                    let amount = caster.base_damage().saturating_add(damage.get(level));
                    caster.deal_damage(entity.id, amount);
                }
                None
            }
            SkillKind::AreaDamage { damage, radius } => {
                if let Some(target) = target {
                    let amount = caster.base_damage().saturating_add(damage.get(level));
                    caster.deal_area_damage(target.position(), radius.get(level), amount);
                }
                None
            }
            SkillKind::TargetHeal {
                heals_health,
                heals_mana,
            } => {
                if let Some(entity) = target.as_ref().and_then(Target::entity) {
                    caster.heal(entity.id, heals_health.get(level), heals_mana.get(level));
                }
                None
            }
            SkillKind::Buff(spec) => Some(Buff::from_spec(self.hash(), spec, level, now)),
            SkillKind::Passive(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::curve::{LinearFloat, LinearInt};
    use crate::skill::template::{BuffSpec, StatCurves};
    use crate::skill::test_utils::TestCaster;
    use crate::state::EntityId;

    fn bolt() -> SkillTemplate {
        SkillTemplate::new(
            "bolt",
            SkillKind::TargetDamage {
                damage: LinearInt::new(20, 5),
            },
        )
        .with_cast_range(LinearFloat::constant(10.0))
        .with_mana_costs(LinearInt::constant(10))
    }

    fn mend() -> SkillTemplate {
        SkillTemplate::new(
            "mend",
            SkillKind::TargetHeal {
                heals_health: LinearInt::constant(40),
                heals_mana: LinearInt::constant(0),
            },
        )
        .with_cast_range(LinearFloat::constant(5.0))
    }

    #[test]
    fn check_self_rejections_in_order() {
        let template = bolt().requiring_weapon();
        let mut caster = TestCaster::new();
        assert_eq!(template.check_self(&caster, 0), Err(CastRejection::NotLearned));

        caster.mana.current = 5;
        assert_eq!(
            template.check_self(&caster, 1),
            Err(CastRejection::InsufficientMana)
        );

        caster.mana.current = 50;
        caster.weapon = false;
        assert_eq!(template.check_self(&caster, 1), Err(CastRejection::MissingWeapon));

        caster.weapon = true;
        assert_eq!(template.check_self(&caster, 1), Ok(()));

        caster.alive = false;
        assert_eq!(template.check_self(&caster, 1), Err(CastRejection::Dead));
    }

    #[test]
    fn passive_skills_never_pass() {
        let template = SkillTemplate::new("toughness", SkillKind::Passive(StatCurves::default()));
        let caster = TestCaster::new();
        assert_eq!(template.check_self(&caster, 1), Err(CastRejection::Passive));
    }

    #[test]
    fn damage_needs_living_hostile_target() {
        let template = bolt();
        let mut caster = TestCaster::new();
        assert_eq!(template.check_target(&mut caster), Err(CastRejection::NoTarget));

        caster.target = Some(TestCaster::enemy(EntityId(7), Position::new(0.0, 0.0, 3.0)));
        assert_eq!(template.check_target(&mut caster), Ok(()));

        caster.kill_target();
        assert_eq!(
            template.check_target(&mut caster),
            Err(CastRejection::InvalidTarget)
        );
    }

    #[test]
    fn heal_on_hostile_target_redirects_to_caster() {
        let template = mend();
        let mut caster = TestCaster::new();
        caster.target = Some(TestCaster::enemy(EntityId(7), Position::new(0.0, 0.0, 3.0)));

        assert_eq!(template.check_target(&mut caster), Ok(()));
        let target = caster.target.and_then(|t| t.entity().copied()).unwrap();
        assert_eq!(target.id, caster.id);
    }

    #[test]
    fn distance_uses_cast_range() {
        let template = bolt();
        let mut caster = TestCaster::new();
        caster.target = Some(TestCaster::enemy(EntityId(7), Position::new(0.0, 0.0, 9.5)));
        assert_eq!(
            template.check_distance(&caster, 1),
            Ok(Position::new(0.0, 0.0, 9.5))
        );

        caster.target = Some(TestCaster::enemy(EntityId(7), Position::new(0.0, 0.0, 12.0)));
        assert_eq!(template.check_distance(&caster, 1), Err(CastRejection::OutOfRange));
    }

    #[test]
    fn fov_cone_is_centered_on_facing() {
        let template = bolt().with_fov(90.0);
        let mut caster = TestCaster::new();

        caster.target = Some(TestCaster::enemy(EntityId(7), Position::new(1.0, 0.0, 2.0)));
        assert_eq!(template.check_fov(&caster), Ok(()));

        caster.target = Some(TestCaster::enemy(EntityId(7), Position::new(0.0, 0.0, -2.0)));
        assert_eq!(
            template.check_fov(&caster),
            Err(CastRejection::OutsideFieldOfView)
        );

        assert_eq!(bolt().check_fov(&caster), Ok(()));
    }

    #[test]
    fn apply_adds_base_damage_and_returns_buffs() {
        let mut caster = TestCaster::new();
        caster.base_damage = 3;
        caster.target = Some(TestCaster::enemy(EntityId(7), Position::new(0.0, 0.0, 3.0)));

        assert!(bolt().apply(&mut caster, 2, Tick(0)).is_none());
        assert_eq!(caster.damage_dealt, vec![(EntityId(7), 28)]);

        let ward = SkillTemplate::new(
            "ward",
            SkillKind::Buff(BuffSpec {
                buff_time: LinearInt::constant(4_000),
                ..BuffSpec::default()
            }),
        );
        let buff = ward.apply(&mut caster, 1, Tick(1_000)).unwrap();
        assert_eq!(buff.buff_time_end, Tick(5_000));
    }
}
