//! Immutable skill definitions shared by every entity.
//!
//! A template holds per-level curves and flags; what the skill *does* is the
//! [`SkillKind`] payload. Instances look templates up by [`SkillHash`] and
//! never copy them.

use super::bonus::StatBonuses;
use super::curve::{LinearFloat, LinearInt};
use super::hash::SkillHash;

/// Static definition of a skill, buff or passive.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillTemplate {
    /// Unique name. The stable hash of this name identifies the template.
    pub name: String,
    pub kind: SkillKind,
    pub max_level: u32,
    /// Learned (level 1) as soon as an entity receives the skill.
    pub learn_default: bool,
    /// Cast time in milliseconds.
    pub cast_time: LinearInt,
    /// Cooldown in milliseconds, started when the cast resolves.
    pub cooldown: LinearInt,
    pub cast_range: LinearFloat,
    pub mana_costs: LinearInt,
    /// Caster level needed to reach a given skill level.
    pub required_level: LinearInt,
    pub requires_weapon: bool,
    pub can_cancel_cast: bool,
    pub cancel_cast_if_target_died: bool,
    pub allow_movement: bool,
    pub show_cast_bar: bool,
    /// Full opening angle of the facing cone. `None` disables the FOV gate.
    pub fov_degrees: Option<f32>,
}

impl SkillTemplate {
    pub fn new(name: impl Into<String>, kind: SkillKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn hash(&self) -> SkillHash {
        SkillHash::of(&self.name)
    }

    pub fn is_passive(&self) -> bool {
        self.kind.is_passive()
    }

    pub fn cast_time_ms(&self, level: u32) -> u64 {
        self.cast_time.get(level).max(0) as u64
    }

    pub fn cooldown_ms(&self, level: u32) -> u64 {
        self.cooldown.get(level).max(0) as u64
    }

    pub fn cast_range(&self, level: u32) -> f32 {
        self.cast_range.get(level)
    }

    pub fn mana_cost(&self, level: u32) -> i32 {
        self.mana_costs.get(level)
    }

    /// Caster level needed to raise the skill from `level` to `level + 1`.
    pub fn upgrade_required_level(&self, level: u32) -> i32 {
        self.required_level.get(level.saturating_add(1))
    }

    // ===== builder helpers =====

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn learned_by_default(mut self) -> Self {
        self.learn_default = true;
        self
    }

    pub fn with_cast_time(mut self, cast_time: LinearInt) -> Self {
        self.cast_time = cast_time;
        self
    }

    pub fn with_cooldown(mut self, cooldown: LinearInt) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_cast_range(mut self, cast_range: LinearFloat) -> Self {
        self.cast_range = cast_range;
        self
    }

    pub fn with_mana_costs(mut self, mana_costs: LinearInt) -> Self {
        self.mana_costs = mana_costs;
        self
    }

    pub fn with_required_level(mut self, required_level: LinearInt) -> Self {
        self.required_level = required_level;
        self
    }

    pub fn with_fov(mut self, degrees: f32) -> Self {
        self.fov_degrees = Some(degrees);
        self
    }

    pub fn requiring_weapon(mut self) -> Self {
        self.requires_weapon = true;
        self
    }

    pub fn cancelable(mut self) -> Self {
        self.can_cancel_cast = true;
        self
    }

    pub fn canceled_if_target_died(mut self) -> Self {
        self.cancel_cast_if_target_died = true;
        self
    }
}

impl Default for SkillTemplate {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: SkillKind::Passive(StatCurves::default()),
            max_level: 1,
            learn_default: false,
            cast_time: LinearInt::default(),
            cooldown: LinearInt::default(),
            cast_range: LinearFloat::default(),
            mana_costs: LinearInt::default(),
            required_level: LinearInt::constant(1),
            requires_weapon: false,
            can_cancel_cast: false,
            cancel_cast_if_target_died: false,
            allow_movement: false,
            show_cast_bar: true,
            fov_degrees: None,
        }
    }
}

/// What a skill does when its cast resolves.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    /// Damages one hostile, living entity.
    TargetDamage { damage: LinearInt },
    /// Damages every hostile entity within `radius` of the target point.
    AreaDamage {
        damage: LinearInt,
        radius: LinearFloat,
    },
    /// Restores health and mana of a friendly target, or of the caster when
    /// the current target cannot be healed.
    TargetHeal {
        heals_health: LinearInt,
        heals_mana: LinearInt,
    },
    /// Timed stat modifier applied to the caster.
    Buff(BuffSpec),
    /// Permanent stat bonus while learned. Never cast.
    Passive(StatCurves),
}

impl SkillKind {
    pub fn is_passive(&self) -> bool {
        matches!(self, SkillKind::Passive(_))
    }
}

/// Buff parameters carried by [`SkillKind::Buff`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuffSpec {
    /// Buff duration in milliseconds.
    pub buff_time: LinearInt,
    pub remain_after_death: bool,
    pub bonuses: StatCurves,
}

/// Per-level stat contributions of a passive skill or a buff.
///
/// Regeneration bonuses are fractions of the pool maximum per second
/// (`0.01` = 1%).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatCurves {
    pub health_max: LinearInt,
    pub health_percent_per_second: LinearFloat,
    pub mana_max: LinearInt,
    pub mana_percent_per_second: LinearFloat,
    pub damage: LinearInt,
    pub defense: LinearInt,
    pub critical_chance: LinearFloat,
    pub block_chance: LinearFloat,
}

impl StatCurves {
    /// Evaluates every curve at `level`.
    pub fn at(&self, level: u32) -> StatBonuses {
        StatBonuses {
            health_max: self.health_max.get(level),
            health_percent_per_second: self.health_percent_per_second.get(level),
            mana_max: self.mana_max.get(level),
            mana_percent_per_second: self.mana_percent_per_second.get(level),
            damage: self.damage.get(level),
            defense: self.defense.get(level),
            critical_chance: self.critical_chance.get(level),
            block_chance: self.block_chance.get(level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_values_follow_curves() {
        let template = SkillTemplate::new(
            "fireball",
            SkillKind::TargetDamage {
                damage: LinearInt::new(30, 10),
            },
        )
        .with_max_level(3)
        .with_cast_time(LinearInt::new(2_000, -250))
        .with_cooldown(LinearInt::constant(5_000))
        .with_mana_costs(LinearInt::new(10, 5))
        .with_required_level(LinearInt::new(1, 2));

        assert_eq!(template.cast_time_ms(1), 2_000);
        assert_eq!(template.cast_time_ms(3), 1_500);
        assert_eq!(template.cooldown_ms(2), 5_000);
        assert_eq!(template.mana_cost(2), 15);
        assert_eq!(template.upgrade_required_level(1), 3);
        assert_eq!(template.hash(), SkillHash::of("fireball"));
    }

    #[test]
    fn negative_durations_clamp_to_zero() {
        let template = SkillTemplate::new("instant", SkillKind::Passive(StatCurves::default()))
            .with_cast_time(LinearInt::constant(-100));
        assert_eq!(template.cast_time_ms(1), 0);
    }

    #[test]
    fn stat_curves_evaluate_all_fields() {
        let curves = StatCurves {
            health_max: LinearInt::new(10, 10),
            critical_chance: LinearFloat::new(0.01, 0.01),
            ..StatCurves::default()
        };
        let bonuses = curves.at(3);
        assert_eq!(bonuses.health_max, 30);
        assert!((bonuses.critical_chance - 0.03).abs() < 1e-6);
        assert_eq!(bonuses.damage, 0);
    }
}
