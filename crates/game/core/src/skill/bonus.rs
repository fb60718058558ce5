//! Additive stat bonuses from learned passives and active buffs.

use std::ops::AddAssign;

use super::buff::Buff;
use super::instance::Skill;
use super::registry::{RegistryError, SkillRegistry};
use super::template::SkillKind;

/// Relative slack for the `f32` rounding error carried by a percentage,
/// e.g. `0.1_f32` is slightly above one tenth.
const RECOVERY_TOLERANCE: f64 = f32::EPSILON as f64 * 4.0;

/// Summed bonuses for every stat a skill or buff can modify.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBonuses {
    pub health_max: i32,
    /// Fraction of max health recovered per second.
    pub health_percent_per_second: f32,
    pub mana_max: i32,
    /// Fraction of max mana recovered per second.
    pub mana_percent_per_second: f32,
    pub damage: i32,
    pub defense: i32,
    pub critical_chance: f32,
    pub block_chance: f32,
}

impl AddAssign for StatBonuses {
    fn add_assign(&mut self, rhs: Self) {
        self.health_max = self.health_max.saturating_add(rhs.health_max);
        self.health_percent_per_second += rhs.health_percent_per_second;
        self.mana_max = self.mana_max.saturating_add(rhs.mana_max);
        self.mana_percent_per_second += rhs.mana_percent_per_second;
        self.damage = self.damage.saturating_add(rhs.damage);
        self.defense = self.defense.saturating_add(rhs.defense);
        self.critical_chance += rhs.critical_chance;
        self.block_chance += rhs.block_chance;
    }
}

impl StatBonuses {
    /// Sums learned passive skills at their level and every active buff.
    pub fn aggregate(
        skills: &[Skill],
        buffs: &[Buff],
        registry: &SkillRegistry,
    ) -> Result<Self, RegistryError> {
        let mut total = StatBonuses::default();
        for skill in skills.iter().filter(|skill| skill.level > 0) {
            if let SkillKind::Passive(curves) = &registry.get(skill.hash)?.kind {
                total += curves.at(skill.level);
            }
        }
        for buff in buffs {
            total += buff.bonuses;
        }
        Ok(total)
    }

    /// Health recovered per second for a pool of size `max`.
    pub fn health_recovery(&self, max: i32) -> i32 {
        recovery(self.health_percent_per_second, max)
    }

    /// Mana recovered per second for a pool of size `max`.
    pub fn mana_recovery(&self, max: i32) -> i32 {
        recovery(self.mana_percent_per_second, max)
    }
}

/// `ceil(percent × max)`, at least 1 whenever `percent` is positive.
fn recovery(percent: f32, max: i32) -> i32 {
    if percent <= 0.0 {
        return 0;
    }
    let exact = f64::from(percent) * f64::from(max.max(0));
    let amount = (exact - exact * RECOVERY_TOLERANCE).ceil() as i32;
    amount.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::curve::{LinearFloat, LinearInt};
    use crate::skill::hash::SkillHash;
    use crate::skill::template::{SkillTemplate, StatCurves};
    use crate::state::Tick;

    fn registry() -> SkillRegistry {
        let vitality = SkillTemplate::new(
            "vitality",
            SkillKind::Passive(StatCurves {
                health_max: LinearInt::new(10, 10),
                health_percent_per_second: LinearFloat::constant(0.01),
                ..StatCurves::default()
            }),
        )
        .with_max_level(5);
        let strike = SkillTemplate::new(
            "strike",
            SkillKind::TargetDamage {
                damage: LinearInt::constant(10),
            },
        );
        SkillRegistry::from_templates([vitality, strike]).unwrap()
    }

    fn skill(name: &str, level: u32) -> Skill {
        Skill {
            hash: SkillHash::of(name),
            level,
            cast_time_end: Tick::ZERO,
            cooldown_end: Tick::ZERO,
        }
    }

    #[test]
    fn sums_learned_passives_and_buffs() {
        let registry = registry();
        let skills = [skill("vitality", 2), skill("strike", 1)];
        let buff = Buff {
            hash: SkillHash::of("ward"),
            level: 1,
            buff_time_end: Tick(10_000),
            remain_after_death: false,
            bonuses: StatBonuses {
                health_max: 5,
                defense: 4,
                ..StatBonuses::default()
            },
        };

        let total = StatBonuses::aggregate(&skills, &[buff], &registry).unwrap();
        assert_eq!(total.health_max, 25);
        assert_eq!(total.defense, 4);
        assert_eq!(total.damage, 0);
    }

    #[test]
    fn unlearned_passives_contribute_nothing() {
        let registry = registry();
        let total = StatBonuses::aggregate(&[skill("vitality", 0)], &[], &registry).unwrap();
        assert_eq!(total, StatBonuses::default());
    }

    #[test]
    fn unknown_skill_fails_lookup() {
        let registry = registry();
        let result = StatBonuses::aggregate(&[skill("missing", 1)], &[], &registry);
        assert!(matches!(result, Err(RegistryError::MissingTemplate(_))));
    }

    #[test]
    fn recovery_rounds_up() {
        let bonuses = StatBonuses {
            health_percent_per_second: 0.015,
            ..StatBonuses::default()
        };
        assert_eq!(bonuses.health_recovery(100), 2);
        assert_eq!(bonuses.health_recovery(1_000), 15);
    }

    #[test]
    fn recovery_rounds_up_small_fractions() {
        let bonuses = StatBonuses {
            health_percent_per_second: 0.010_000_5,
            mana_percent_per_second: 0.1,
            ..StatBonuses::default()
        };
        assert_eq!(bonuses.health_recovery(100), 2);
        assert_eq!(bonuses.mana_recovery(150), 15);
    }

    #[test]
    fn recovery_is_exact_on_whole_amounts() {
        let bonuses = StatBonuses {
            mana_percent_per_second: 0.01,
            ..StatBonuses::default()
        };
        assert_eq!(bonuses.mana_recovery(100), 1);
        assert_eq!(bonuses.mana_recovery(300), 3);
    }

    #[test]
    fn recovery_floor_is_one_point() {
        let bonuses = StatBonuses {
            health_percent_per_second: 0.0001,
            mana_percent_per_second: 0.0,
            ..StatBonuses::default()
        };
        assert_eq!(bonuses.health_recovery(50), 1);
        assert_eq!(bonuses.mana_recovery(50), 0);
    }
}
