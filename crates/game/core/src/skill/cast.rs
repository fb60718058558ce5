//! Cast lifecycle: request, per-tick resolution, cancellation and death.
//!
//! ```text
//! Idle ──request_cast──▶ Casting ──(now ≥ end)──▶ CastComplete ──tick──▶ Idle
//!                          │
//!                          └──cancel_cast──▶ Idle
//! ```
//!
//! Casting is state, not a blocking call. The host polls [`Skills::tick`]
//! with the same clock it used for the request.

use super::caster::{Caster, Target};
use super::checks::CastRejection;
use super::error::SkillError;
use super::event::SkillEvent;
use super::instance::Skill;
use super::registry::SkillRegistry;
use super::skills::{ActiveCast, Skills};
use crate::state::{Position, Tick};

/// Outcome of [`Skills::request_cast`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CastRequest {
    /// Cast timer started; `destination` is where positional effects land.
    Started { destination: Position },
    /// A check failed. Nothing changed.
    Rejected(CastRejection),
}

impl CastRequest {
    pub fn is_started(&self) -> bool {
        matches!(self, CastRequest::Started { .. })
    }
}

/// What one [`Skills::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastProgress {
    Idle,
    Casting { index: usize, remaining_ms: u64 },
    Finished { index: usize },
    /// Resolution checks failed; dropped without an event.
    Abandoned { index: usize, reason: CastRejection },
    /// Canceled because the target died mid-cast.
    Canceled { index: usize },
}

/// Controller state derived from the selection and the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastState {
    Idle,
    Casting { index: usize },
    /// Cast time elapsed; resolves on the next tick.
    CastComplete { index: usize },
}

impl Skills {
    pub fn state(&self, now: Tick) -> CastState {
        match self.active {
            Some(ActiveCast {
                index,
                canceled: false,
            }) => match self.skills.get(index) {
                Some(skill) if skill.is_casting(now) => CastState::Casting { index },
                Some(_) => CastState::CastComplete { index },
                None => CastState::Idle,
            },
            _ => CastState::Idle,
        }
    }

    /// Validates and starts casting the skill at `index`.
    ///
    /// Checks run in order (self, target, distance, field of view) and may
    /// correct the caster's target. A rejection is not an error.
    pub fn request_cast<C: Caster + ?Sized>(
        &mut self,
        index: usize,
        caster: &mut C,
        registry: &SkillRegistry,
        now: Tick,
    ) -> Result<CastRequest, SkillError> {
        let mut skill = *self.get(index)?;
        if self.state(now) != CastState::Idle {
            return Ok(CastRequest::Rejected(CastRejection::Busy));
        }
        let template = skill.template(registry)?;

        let checks = skill
            .check_self(template, &*caster, now, true)
            .and_then(|()| template.check_target(caster))
            .and_then(|()| template.check_distance(&*caster, skill.level))
            .and_then(|destination| template.check_fov(&*caster).map(|()| destination));
        let destination = match checks {
            Ok(destination) => destination,
            Err(reason) => return Ok(CastRequest::Rejected(reason)),
        };

        skill.cast_time_end = now + template.cast_time_ms(skill.level);
        self.skills[index] = skill;
        self.active = Some(ActiveCast {
            index,
            canceled: false,
        });
        self.emit(caster.is_alive(), SkillEvent::CastStarted(skill));
        Ok(CastRequest::Started { destination })
    }

    /// Advances the current cast.
    ///
    /// Once the cast time has elapsed the self and target checks run again.
    /// Distance and facing are not re-checked: a target that moved during
    /// the cast is still hit.
    pub fn tick<C: Caster + ?Sized>(
        &mut self,
        caster: &mut C,
        registry: &SkillRegistry,
        now: Tick,
    ) -> Result<CastProgress, SkillError> {
        let index = match self.active {
            Some(ActiveCast {
                index,
                canceled: false,
            }) => index,
            _ => return Ok(CastProgress::Idle),
        };
        let mut skill = *self.get(index)?;
        let template = skill.template(registry)?;

        if skill.is_casting(now) {
            let target_died = matches!(
                caster.target(),
                Some(Target::Entity(entity)) if !entity.alive
            );
            if template.cancel_cast_if_target_died && target_died {
                self.cancel_cast(&*caster, registry, now, true)?;
                return Ok(CastProgress::Canceled { index });
            }
            return Ok(CastProgress::Casting {
                index,
                remaining_ms: skill.cast_time_remaining(now),
            });
        }

        let checks = skill
            .check_self(template, &*caster, now, false)
            .and_then(|()| template.check_target(caster));
        if let Err(reason) = checks {
            self.active = None;
            return Ok(CastProgress::Abandoned { index, reason });
        }

        if let Some(buff) = template.apply(caster, skill.level, now) {
            self.add_or_refresh_buff(buff);
        }
        caster.spend_mana(template.mana_cost(skill.level));
        skill.set_on_cooldown(now, template.cooldown_ms(skill.level));
        self.skills[index] = skill;
        self.emit(caster.is_alive(), SkillEvent::CastFinished(skill));
        self.active = None;
        Ok(CastProgress::Finished { index })
    }

    /// Whether a cast is in progress and its skill allows manual
    /// cancellation. A cast whose time has elapsed can no longer be canceled.
    pub fn can_cancel_current_cast(
        &self,
        registry: &SkillRegistry,
        now: Tick,
    ) -> Result<bool, SkillError> {
        match self.state(now) {
            CastState::Casting { index } => Ok(self.get(index)?.template(registry)?.can_cancel_cast),
            _ => Ok(false),
        }
    }

    /// Cancels the current cast and makes the skill ready again at once.
    ///
    /// Only applies while casting: a complete cast is left to resolve on the
    /// next tick. Does not consult the template's cancel flag; callers that
    /// honor it check [`Skills::can_cancel_current_cast`] first. With
    /// `reset_current == false` the skill stays selected but never resolves.
    pub fn cancel_cast<C: Caster + ?Sized>(
        &mut self,
        caster: &C,
        registry: &SkillRegistry,
        now: Tick,
        reset_current: bool,
    ) -> Result<Option<Skill>, SkillError> {
        match self.state(now) {
            CastState::Casting { .. } => self.abort_cast(caster, registry, now, reset_current),
            CastState::CastComplete { .. } => Ok(None),
            CastState::Idle => {
                if reset_current {
                    self.active = None;
                }
                Ok(None)
            }
        }
    }

    /// Cancels whatever is selected, casting or complete.
    fn abort_cast<C: Caster + ?Sized>(
        &mut self,
        caster: &C,
        registry: &SkillRegistry,
        now: Tick,
        reset_current: bool,
    ) -> Result<Option<Skill>, SkillError> {
        let Some(active) = self.active else {
            return Ok(None);
        };
        if active.canceled {
            if reset_current {
                self.active = None;
            }
            return Ok(None);
        }
        let mut skill = *self.get(active.index)?;
        skill.cast_time_end = now.saturating_sub(skill.cast_time_ms(registry)?);
        self.skills[active.index] = skill;
        self.emit(caster.is_alive(), SkillEvent::CastCanceled(skill));

        self.active = if reset_current {
            None
        } else {
            Some(ActiveCast {
                index: active.index,
                canceled: true,
            })
        };
        Ok(Some(skill))
    }

    /// Drops buffs that do not survive death and cancels any cast.
    pub fn on_death<C: Caster + ?Sized>(
        &mut self,
        caster: &C,
        registry: &SkillRegistry,
        now: Tick,
    ) -> Result<(), SkillError> {
        self.buffs.retain(|buff| buff.remain_after_death);
        self.abort_cast(caster, registry, now, true)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::bonus::StatBonuses;
    use crate::skill::buff::Buff;
    use crate::skill::curve::{LinearFloat, LinearInt};
    use crate::skill::hash::SkillHash;
    use crate::skill::template::{BuffSpec, SkillKind, SkillTemplate, StatCurves};
    use crate::skill::test_utils::TestCaster;
    use crate::state::EntityId;

    const FIREBALL: usize = 0;
    const WARD: usize = 1;
    const MEND: usize = 2;

    fn registry() -> SkillRegistry {
        SkillRegistry::from_templates([
            SkillTemplate::new(
                "fireball",
                SkillKind::TargetDamage {
                    damage: LinearInt::new(30, 10),
                },
            )
            .learned_by_default()
            .with_cast_time(LinearInt::constant(2_000))
            .with_cooldown(LinearInt::constant(5_000))
            .with_cast_range(LinearFloat::constant(10.0))
            .with_mana_costs(LinearInt::constant(20))
            .cancelable()
            .canceled_if_target_died(),
            SkillTemplate::new(
                "ward",
                SkillKind::Buff(BuffSpec {
                    buff_time: LinearInt::constant(10_000),
                    remain_after_death: false,
                    bonuses: StatCurves {
                        defense: LinearInt::constant(5),
                        ..StatCurves::default()
                    },
                }),
            )
            .learned_by_default()
            .with_cast_time(LinearInt::constant(500)),
            SkillTemplate::new(
                "mend",
                SkillKind::TargetHeal {
                    heals_health: LinearInt::constant(25),
                    heals_mana: LinearInt::constant(0),
                },
            )
            .learned_by_default()
            .with_cast_range(LinearFloat::constant(5.0)),
        ])
        .unwrap()
    }

    fn setup() -> (SkillRegistry, Skills, TestCaster) {
        let registry = registry();
        let skills = Skills::from_names(["fireball", "ward", "mend"], &registry, Tick::ZERO).unwrap();
        let mut caster = TestCaster::new();
        caster.target = Some(TestCaster::enemy(EntityId(9), Position::new(0.0, 0.0, 6.0)));
        (registry, skills, caster)
    }

    #[test]
    fn full_cast_lifecycle() {
        let (registry, mut skills, mut caster) = setup();

        let request = skills
            .request_cast(FIREBALL, &mut caster, &registry, Tick(1_000))
            .unwrap();
        assert_eq!(
            request,
            CastRequest::Started {
                destination: Position::new(0.0, 0.0, 6.0)
            }
        );
        assert_eq!(skills.state(Tick(1_500)), CastState::Casting { index: FIREBALL });
        assert_eq!(
            skills.tick(&mut caster, &registry, Tick(1_500)).unwrap(),
            CastProgress::Casting {
                index: FIREBALL,
                remaining_ms: 1_500
            }
        );

        assert_eq!(skills.state(Tick(3_000)), CastState::CastComplete { index: FIREBALL });
        assert_eq!(
            skills.tick(&mut caster, &registry, Tick(3_000)).unwrap(),
            CastProgress::Finished { index: FIREBALL }
        );
        assert_eq!(skills.current(), None);
        assert_eq!(caster.damage_dealt, vec![(EntityId(9), 30)]);
        assert_eq!(caster.mana.current, 80);
        assert_eq!(skills.get(FIREBALL).unwrap().cooldown_end, Tick(8_000));

        let events = skills.drain_events();
        assert!(matches!(
            events.as_slice(),
            [SkillEvent::CastStarted(_), SkillEvent::CastFinished(_)]
        ));
        assert!(skills.drain_events().is_empty());
    }

    #[test]
    fn readiness_is_false_during_cast_then_waits_for_cooldown() {
        let (registry, mut skills, mut caster) = setup();
        skills
            .request_cast(FIREBALL, &mut caster, &registry, Tick(0))
            .unwrap();

        for now in [1, 500, 1_999] {
            assert!(!skills.get(FIREBALL).unwrap().is_ready(Tick(now)));
        }
        assert!(skills.get(FIREBALL).unwrap().is_ready(Tick(2_000)));

        skills.tick(&mut caster, &registry, Tick(2_000)).unwrap();
        let skill = *skills.get(FIREBALL).unwrap();
        assert!(!skill.is_ready(Tick(6_999)));
        assert!(skill.is_ready(Tick(7_000)));
        assert_eq!(skill.ready_at(), Tick(7_000));
    }

    #[test]
    fn second_request_while_casting_is_busy() {
        let (registry, mut skills, mut caster) = setup();
        skills
            .request_cast(FIREBALL, &mut caster, &registry, Tick(0))
            .unwrap();
        assert_eq!(
            skills
                .request_cast(WARD, &mut caster, &registry, Tick(100))
                .unwrap(),
            CastRequest::Rejected(CastRejection::Busy)
        );
        assert_eq!(skills.get(WARD).unwrap().cast_time_end, Tick::ZERO);
    }

    #[test]
    fn rejection_leaves_state_untouched() {
        let (registry, mut skills, mut caster) = setup();
        caster.target = Some(TestCaster::enemy(EntityId(9), Position::new(0.0, 0.0, 50.0)));
        let before = *skills.get(FIREBALL).unwrap();

        let request = skills
            .request_cast(FIREBALL, &mut caster, &registry, Tick(0))
            .unwrap();
        assert_eq!(request, CastRequest::Rejected(CastRejection::OutOfRange));
        assert_eq!(*skills.get(FIREBALL).unwrap(), before);
        assert_eq!(skills.current(), None);
        assert!(skills.drain_events().is_empty());
    }

    #[test]
    fn invalid_index_is_an_error() {
        let (registry, mut skills, mut caster) = setup();
        let err = skills
            .request_cast(7, &mut caster, &registry, Tick(0))
            .unwrap_err();
        assert_eq!(err, SkillError::InvalidIndex { index: 7, len: 3 });
    }

    #[test]
    fn cancel_restores_readiness_immediately() {
        let (registry, mut skills, mut caster) = setup();
        skills
            .request_cast(FIREBALL, &mut caster, &registry, Tick(10_000))
            .unwrap();
        assert!(skills.can_cancel_current_cast(&registry, Tick(10_500)).unwrap());

        let canceled = skills
            .cancel_cast(&caster, &registry, Tick(10_500), true)
            .unwrap()
            .unwrap();
        assert_eq!(canceled.cast_time_end, Tick(8_500));
        let skill = skills.get(FIREBALL).unwrap();
        assert!(!skill.is_casting(Tick(10_500)));
        assert!(skill.is_ready(Tick(10_500)));
        assert_eq!(skills.current(), None);
        assert_eq!(caster.mana.current, 100);

        let events = skills.drain_events();
        assert!(matches!(events.last(), Some(SkillEvent::CastCanceled(_))));
    }

    #[test]
    fn cancel_without_reset_keeps_selection_but_never_resolves() {
        let (registry, mut skills, mut caster) = setup();
        skills
            .request_cast(FIREBALL, &mut caster, &registry, Tick(0))
            .unwrap();
        skills
            .cancel_cast(&caster, &registry, Tick(100), false)
            .unwrap();

        assert_eq!(skills.current(), Some(FIREBALL));
        assert_eq!(skills.state(Tick(5_000)), CastState::Idle);
        assert_eq!(
            skills.tick(&mut caster, &registry, Tick(5_000)).unwrap(),
            CastProgress::Idle
        );
        assert!(caster.damage_dealt.is_empty());
        assert!(
            skills
                .request_cast(WARD, &mut caster, &registry, Tick(5_000))
                .unwrap()
                .is_started()
        );
    }

    #[test]
    fn complete_cast_cannot_be_canceled() {
        let (registry, mut skills, mut caster) = setup();
        skills
            .request_cast(FIREBALL, &mut caster, &registry, Tick(0))
            .unwrap();

        assert!(!skills.can_cancel_current_cast(&registry, Tick(2_000)).unwrap());
        assert_eq!(
            skills
                .cancel_cast(&caster, &registry, Tick(2_000), true)
                .unwrap(),
            None
        );
        assert_eq!(skills.current(), Some(FIREBALL));

        assert_eq!(
            skills.tick(&mut caster, &registry, Tick(2_000)).unwrap(),
            CastProgress::Finished { index: FIREBALL }
        );
        assert_eq!(caster.damage_dealt, vec![(EntityId(9), 30)]);
        assert_eq!(caster.mana.current, 80);
        assert!(matches!(
            skills.drain_events().as_slice(),
            [SkillEvent::CastStarted(_), SkillEvent::CastFinished(_)]
        ));
    }

    #[test]
    fn resolution_rechecks_mana_before_deducting() {
        let (registry, mut skills, mut caster) = setup();
        assert!(
            skills
                .request_cast(FIREBALL, &mut caster, &registry, Tick(0))
                .unwrap()
                .is_started()
        );
        // drained mid-cast below the cost
        caster.mana.current = 5;
        assert_eq!(
            skills.tick(&mut caster, &registry, Tick(2_000)).unwrap(),
            CastProgress::Abandoned {
                index: FIREBALL,
                reason: CastRejection::InsufficientMana
            }
        );
        assert_eq!(caster.mana.current, 5);
        assert!(caster.damage_dealt.is_empty());

        // exactly the cost: the whole pool goes, nothing is withheld
        caster.mana.current = 20;
        skills
            .request_cast(FIREBALL, &mut caster, &registry, Tick(2_000))
            .unwrap();
        skills.tick(&mut caster, &registry, Tick(4_000)).unwrap();
        assert_eq!(caster.mana.current, 0);
        assert_eq!(caster.damage_dealt.len(), 1);
    }

    #[test]
    fn resolution_abandons_silently_when_target_invalid() {
        let (registry, mut skills, mut caster) = setup();
        skills
            .request_cast(MEND, &mut caster, &registry, Tick(0))
            .unwrap();
        skills.drain_events();

        // mend redirected to the caster; a dead caster fails the self check
        caster.alive = false;
        let progress = skills.tick(&mut caster, &registry, Tick(0)).unwrap();
        assert_eq!(
            progress,
            CastProgress::Abandoned {
                index: MEND,
                reason: CastRejection::Dead
            }
        );
        assert_eq!(skills.current(), None);
        assert!(skills.drain_events().is_empty());
        assert!(caster.heals.is_empty());
    }

    #[test]
    fn moved_target_is_still_hit() {
        let (registry, mut skills, mut caster) = setup();
        skills
            .request_cast(FIREBALL, &mut caster, &registry, Tick(0))
            .unwrap();
        caster.target = Some(TestCaster::enemy(EntityId(9), Position::new(0.0, 0.0, 40.0)));

        assert_eq!(
            skills.tick(&mut caster, &registry, Tick(2_000)).unwrap(),
            CastProgress::Finished { index: FIREBALL }
        );
        assert_eq!(caster.damage_dealt.len(), 1);
    }

    #[test]
    fn target_death_cancels_flagged_casts() {
        let (registry, mut skills, mut caster) = setup();
        skills
            .request_cast(FIREBALL, &mut caster, &registry, Tick(0))
            .unwrap();
        caster.kill_target();

        assert_eq!(
            skills.tick(&mut caster, &registry, Tick(1_000)).unwrap(),
            CastProgress::Canceled { index: FIREBALL }
        );
        assert!(skills.get(FIREBALL).unwrap().is_ready(Tick(1_000)));
    }

    #[test]
    fn heal_on_enemy_lands_on_caster() {
        let (registry, mut skills, mut caster) = setup();
        assert!(
            skills
                .request_cast(MEND, &mut caster, &registry, Tick(0))
                .unwrap()
                .is_started()
        );
        skills.tick(&mut caster, &registry, Tick(0)).unwrap();
        assert_eq!(caster.heals, vec![(EntityId::PLAYER, 25, 0)]);
    }

    #[test]
    fn buff_cast_refreshes_existing_buff() {
        let (registry, mut skills, mut caster) = setup();
        for start in [0, 1_000] {
            skills
                .request_cast(WARD, &mut caster, &registry, Tick(start))
                .unwrap();
            skills
                .tick(&mut caster, &registry, Tick(start + 500))
                .unwrap();
        }

        assert_eq!(skills.buffs().len(), 1);
        assert_eq!(skills.buffs()[0].buff_time_end, Tick(11_500));
        assert_eq!(skills.bonuses(&registry).unwrap().defense, 5);
    }

    #[test]
    fn death_purges_buffs_and_cancels_cast() {
        let (registry, mut skills, mut caster) = setup();
        skills.add_or_refresh_buff(Buff {
            hash: SkillHash::of("blessing"),
            level: 1,
            buff_time_end: Tick(60_000),
            remain_after_death: true,
            bonuses: StatBonuses::default(),
        });
        skills
            .request_cast(WARD, &mut caster, &registry, Tick(0))
            .unwrap();
        skills.tick(&mut caster, &registry, Tick(500)).unwrap();
        caster.target = Some(TestCaster::enemy(EntityId(9), Position::new(0.0, 0.0, 6.0)));
        assert!(
            skills
                .request_cast(FIREBALL, &mut caster, &registry, Tick(600))
                .unwrap()
                .is_started()
        );
        skills.drain_events();

        caster.alive = false;
        skills.on_death(&caster, &registry, Tick(700)).unwrap();

        assert_eq!(skills.buffs().len(), 1);
        assert_eq!(skills.buff_index_by_name("blessing"), Some(0));
        assert_eq!(skills.current(), None);
        assert!(skills.get(FIREBALL).unwrap().is_ready(Tick(700)));
        // dead casters emit nothing
        assert!(skills.drain_events().is_empty());
    }
}
