//! Per-tick host loop over every actor.
//!
//! One call to [`Simulation::tick`] runs, in order:
//! 1. each living actor's own update (buff expiry, aggro targeting, cast
//!    controller, AI casts, regeneration), against a snapshot of the world
//!    taken at the start of the tick
//! 2. effect resolution: damage and heals queued by casters land on their
//!    targets
//! 3. death handling: buff purge, cast cancel, killer reward
//!
//! No actor mutates another actor during its own update; cross-entity
//! effects only travel through the effect queue.

use std::collections::BTreeMap;
use std::sync::Arc;

use game_content::Content;
use game_core::{
    CastProgress, CastRequest, EntityId, GameConfig, Position, RegistryError, SkillEvent,
    SkillRegistry, Skills, Target, Tick, balance_experience_reward,
};
use tracing::{debug, info, trace};

use crate::actor::{Actor, ActorSpec, TargetRef};
use crate::caster::{ActorCaster, Effect, WorldView};
use crate::error::{Result, RuntimeError};
use crate::events::{CombatEvent, Event, EventBus, ProgressionEvent, SkillNotification};

/// What happened during one [`Simulation::tick`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub clock: Tick,
    /// Cast controller outcomes other than idle.
    pub casts: Vec<(EntityId, CastProgress)>,
    pub deaths: Vec<EntityId>,
    /// New level reached, once per level gained.
    pub level_ups: Vec<(EntityId, u32)>,
}

pub struct Simulation {
    config: GameConfig,
    registry: Arc<SkillRegistry>,
    bus: EventBus,
    actors: BTreeMap<EntityId, Actor>,
    /// Effects queued outside a tick (or by the current one), applied next.
    pending: Vec<Effect>,
    next_id: u32,
}

impl Simulation {
    pub fn new(config: GameConfig, registry: Arc<SkillRegistry>, bus: EventBus) -> Self {
        Self {
            config,
            registry,
            bus,
            actors: BTreeMap::new(),
            pending: Vec::new(),
            next_id: EntityId::PLAYER.0,
        }
    }

    pub fn from_content(content: Content, bus: EventBus) -> Self {
        Self::new(content.config, Arc::new(content.registry), bus)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &SkillRegistry {
        &self.registry
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Adds an actor. The first actor spawned is [`EntityId::PLAYER`].
    pub fn spawn(&mut self, spec: ActorSpec, now: Tick) -> Result<EntityId> {
        let id = EntityId(self.next_id);
        let actor = Actor::spawn(id, spec, &self.config, &self.registry, now)?;
        debug!(entity = %id, name = %actor.state.name, "spawned actor");
        self.actors.insert(id, actor);
        self.next_id += 1;
        Ok(id)
    }

    pub fn actor(&self, id: EntityId) -> Result<&Actor> {
        self.actors.get(&id).ok_or(RuntimeError::UnknownActor(id))
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    fn actor_mut(&mut self, id: EntityId) -> Result<&mut Actor> {
        self.actors.get_mut(&id).ok_or(RuntimeError::UnknownActor(id))
    }

    pub fn set_target(&mut self, id: EntityId, target: Option<TargetRef>) -> Result<()> {
        self.actor_mut(id)?.state.target = target;
        Ok(())
    }

    pub fn move_to(&mut self, id: EntityId, position: Position) -> Result<()> {
        self.actor_mut(id)?.state.position = position;
        Ok(())
    }

    pub fn face(&mut self, id: EntityId, forward: Position) -> Result<()> {
        self.actor_mut(id)?.state.forward = forward;
        Ok(())
    }

    /// Requests a cast of the skill at `index` for actor `id`.
    pub fn request_cast(&mut self, id: EntityId, index: usize, now: Tick) -> Result<CastRequest> {
        let world = WorldView::capture(self.actors.values());
        let actor = self.actors.get_mut(&id).ok_or(RuntimeError::UnknownActor(id))?;
        let bonuses = actor.skills.bonuses(&self.registry)?;
        let mut caster =
            ActorCaster::new(&mut actor.state, &world, &mut self.pending, bonuses.damage);
        let request = actor
            .skills
            .request_cast(index, &mut caster, &self.registry, now)?;
        if let CastRequest::Rejected(reason) = request {
            trace!(entity = %id, index, %reason, "cast rejected");
        }
        publish_skill_events(&self.bus, &self.registry, id, &mut actor.skills, now);
        Ok(request)
    }

    pub fn cast_by_name(&mut self, id: EntityId, name: &str, now: Tick) -> Result<CastRequest> {
        let index = self
            .actor(id)?
            .skills
            .skill_index_by_name(name)
            .ok_or_else(|| RegistryError::UnknownSkill(name.to_owned()))?;
        self.request_cast(id, index, now)
    }

    /// Cancels the current cast if its skill allows it. Returns whether a
    /// cast was canceled.
    pub fn cancel_cast(&mut self, id: EntityId, now: Tick) -> Result<bool> {
        let world = WorldView::capture(self.actors.values());
        let actor = self.actors.get_mut(&id).ok_or(RuntimeError::UnknownActor(id))?;
        if !actor.skills.can_cancel_current_cast(&self.registry, now)? {
            return Ok(false);
        }
        let caster = ActorCaster::new(&mut actor.state, &world, &mut self.pending, 0);
        let canceled = actor
            .skills
            .cancel_cast(&caster, &self.registry, now, true)?;
        publish_skill_events(&self.bus, &self.registry, id, &mut actor.skills, now);
        Ok(canceled.is_some())
    }

    /// Selects a hotbar slot by key.
    pub fn press_hotkey(&mut self, id: EntityId, key: char) -> Result<bool> {
        Ok(self
            .actor_mut(id)?
            .hotbar
            .as_mut()
            .is_some_and(|bar| bar.press_hotkey(key)))
    }

    /// Casts the skill in the selected hotbar slot.
    pub fn use_hotbar(&mut self, id: EntityId, now: Tick) -> Result<Option<CastRequest>> {
        let world = WorldView::capture(self.actors.values());
        let actor = self.actors.get_mut(&id).ok_or(RuntimeError::UnknownActor(id))?;
        let Some(bar) = actor.hotbar.as_ref() else {
            return Ok(None);
        };
        let bonuses = actor.skills.bonuses(&self.registry)?;
        let mut caster =
            ActorCaster::new(&mut actor.state, &world, &mut self.pending, bonuses.damage);
        let request = bar.use_selected(&mut actor.skills, &mut caster, &self.registry, now)?;
        publish_skill_events(&self.bus, &self.registry, id, &mut actor.skills, now);
        Ok(request)
    }

    /// Learns or levels the skill at `index` using the actor's level.
    pub fn upgrade_skill(&mut self, id: EntityId, index: usize) -> Result<u32> {
        let actor = self.actors.get_mut(&id).ok_or(RuntimeError::UnknownActor(id))?;
        let level = actor.level();
        let new_level = actor.skills.upgrade_skill(index, level, &self.registry)?;
        if let Some(bar) = actor.hotbar.as_mut() {
            bar.load(&actor.skills, &self.registry)?;
        }
        actor.refresh_maximums(&self.registry)?;
        Ok(new_level)
    }

    /// Adds experience and publishes progression events.
    ///
    /// Returns the levels reached, in order. Dead actors gain nothing.
    pub fn grant_experience(&mut self, id: EntityId, amount: i64, now: Tick) -> Result<Vec<u32>> {
        let actor = self.actors.get_mut(&id).ok_or(RuntimeError::UnknownActor(id))?;
        if !actor.is_alive() {
            return Err(RuntimeError::ActorDead(id));
        }
        let gained = actor.experience.gain(amount);
        let level = actor.level();
        let levels: Vec<u32> = (level + 1 - gained..=level).collect();
        actor.experience.drain_events();

        self.bus.publish(Event::Progression(ProgressionEvent::ExperienceGained {
            entity: id,
            amount,
            clock: now,
        }));
        for &level in &levels {
            info!(entity = %id, level, "level up");
            self.bus.publish(Event::Progression(ProgressionEvent::LevelUp {
                entity: id,
                level,
                clock: now,
            }));
        }
        Ok(levels)
    }

    /// Runs one update of every actor, then resolves effects and deaths.
    pub fn tick(&mut self, now: Tick) -> Result<TickReport> {
        let mut report = TickReport {
            clock: now,
            ..TickReport::default()
        };
        let world = WorldView::capture(self.actors.values());
        let registry = Arc::clone(&self.registry);

        for actor in self.actors.values_mut() {
            if !actor.is_alive() {
                continue;
            }
            let id = actor.id();

            let expired = actor.skills.cleanup_buffs(now);
            if expired > 0 {
                trace!(entity = %id, expired, "buffs expired");
            }
            actor.refresh_maximums(&registry)?;

            if let Some(target) = acquire_target(actor, &world) {
                debug!(entity = %id, target = %target, "aggro");
                self.bus.publish(Event::Combat(CombatEvent::Aggro {
                    entity: id,
                    target,
                    clock: now,
                }));
            }

            let bonuses = actor.skills.bonuses(&registry)?;
            let mut caster =
                ActorCaster::new(&mut actor.state, &world, &mut self.pending, bonuses.damage);
            let progress = actor.skills.tick(&mut caster, &registry, now)?;
            if let CastProgress::Abandoned { index, reason } = progress {
                trace!(entity = %id, index, %reason, "cast abandoned");
            }
            if progress != CastProgress::Idle {
                report.casts.push((id, progress));
            }
            if actor.aggro.is_some() {
                auto_cast(&mut actor.skills, &mut caster, &registry, now)?;
            }

            if now >= actor.next_regen_at {
                let state = &mut actor.state;
                state
                    .health
                    .restore(bonuses.health_recovery(state.health.maximum));
                state.mana.restore(bonuses.mana_recovery(state.mana.maximum));
                actor.next_regen_at = now + self.config.regen_interval_ms;
            }

            publish_skill_events(&self.bus, &registry, id, &mut actor.skills, now);
        }

        self.resolve_effects(now)?;
        self.process_deaths(now, &mut report)?;
        Ok(report)
    }

    fn resolve_effects(&mut self, now: Tick) -> Result<()> {
        for effect in std::mem::take(&mut self.pending) {
            match effect {
                Effect::Damage {
                    source,
                    target,
                    amount,
                } => self.apply_damage(source, target, amount, now)?,
                Effect::AreaDamage {
                    source,
                    center,
                    radius,
                    amount,
                } => {
                    let Some(faction) = self.actors.get(&source).map(|a| a.state.faction) else {
                        continue;
                    };
                    let victims: Vec<EntityId> = self
                        .actors
                        .values()
                        .filter(|victim| {
                            victim.is_alive()
                                && faction.is_hostile_to(&victim.state.faction)
                                && victim.state.position.distance(center) <= radius
                        })
                        .map(Actor::id)
                        .collect();
                    for victim in victims {
                        self.apply_damage(source, victim, amount, now)?;
                    }
                }
                Effect::Heal {
                    source,
                    target,
                    health,
                    mana,
                } => {
                    let Some(actor) = self.actors.get_mut(&target).filter(|a| a.is_alive()) else {
                        continue;
                    };
                    let health = actor.state.health.restore(health);
                    let mana = actor.state.mana.restore(mana);
                    debug!(%source, %target, health, mana, "healed");
                    self.bus.publish(Event::Combat(CombatEvent::Healed {
                        source,
                        target,
                        health,
                        mana,
                        clock: now,
                    }));
                }
            }
        }
        Ok(())
    }

    fn apply_damage(
        &mut self,
        source: EntityId,
        target: EntityId,
        amount: i32,
        now: Tick,
    ) -> Result<()> {
        let Some(actor) = self.actors.get_mut(&target).filter(|a| a.is_alive()) else {
            return Ok(());
        };
        let defense = actor.skills.bonuses(&self.registry)?.defense;
        let dealt = actor.state.health.spend(amount.saturating_sub(defense));
        actor.state.last_attacker = Some(source);
        debug!(%source, %target, dealt, remaining = actor.state.health.current, "damaged");
        self.bus.publish(Event::Combat(CombatEvent::Damaged {
            source,
            target,
            amount: dealt,
            clock: now,
        }));
        Ok(())
    }

    fn process_deaths(&mut self, now: Tick, report: &mut TickReport) -> Result<()> {
        let world = WorldView::capture(self.actors.values());
        let fallen: Vec<EntityId> = self
            .actors
            .values()
            .filter(|actor| !actor.is_alive() && !actor.dead)
            .map(Actor::id)
            .collect();

        for id in fallen {
            let actor = self.actors.get_mut(&id).ok_or(RuntimeError::UnknownActor(id))?;
            actor.dead = true;
            let killer = actor.state.last_attacker;
            let victim_level = actor.level();
            let reward = actor.state.experience_reward;

            let caster = ActorCaster::new(&mut actor.state, &world, &mut self.pending, 0);
            actor.skills.on_death(&caster, &self.registry, now)?;
            actor.state.target = None;
            publish_skill_events(&self.bus, &self.registry, id, &mut actor.skills, now);

            info!(entity = %id, killer = ?killer, "died");
            self.bus.publish(Event::Combat(CombatEvent::Died {
                entity: id,
                killer,
                clock: now,
            }));
            report.deaths.push(id);

            let Some(killer) = killer else { continue };
            let Some(killer_level) = self
                .actors
                .get(&killer)
                .filter(|k| k.is_alive())
                .map(Actor::level)
            else {
                continue;
            };
            let balanced = balance_experience_reward(
                reward,
                killer_level,
                victim_level,
                self.config.max_level_difference,
            )?;
            if balanced > 0 {
                let levels = self.grant_experience(killer, balanced, now)?;
                report
                    .level_ups
                    .extend(levels.into_iter().map(|level| (killer, level)));
            }
        }
        Ok(())
    }
}

/// Points an idle aggro-enabled actor at the nearest living hostile.
///
/// Keeps the current target while it is a living hostile entity.
fn acquire_target(actor: &mut Actor, world: &WorldView) -> Option<EntityId> {
    let area = actor.aggro?;
    let state = &actor.state;
    let keeps_target = match state.target {
        Some(TargetRef::Entity(id)) => world
            .get(id)
            .is_some_and(|t| t.alive && state.faction.is_hostile_to(&t.faction)),
        _ => false,
    };
    if keeps_target || actor.skills.current().is_some() {
        return None;
    }

    let candidates = world
        .iter()
        .filter(|(_, t)| t.alive && state.faction.is_hostile_to(&t.faction))
        .map(|(id, t)| (id, t.position));
    let target = area.nearest(state.id, state.position, candidates)?;
    actor.state.target = Some(TargetRef::Entity(target));
    Some(target)
}

/// Casts the first castable skill, in list order, that passes every check.
fn auto_cast(
    skills: &mut Skills,
    caster: &mut ActorCaster<'_>,
    registry: &SkillRegistry,
    now: Tick,
) -> Result<()> {
    use game_core::Caster;

    if skills.current().is_some() || !matches!(caster.target(), Some(Target::Entity(_))) {
        return Ok(());
    }
    for index in 0..skills.len() {
        let skill = *skills.get(index)?;
        if !skill.is_learned() || skill.template(registry)?.is_passive() {
            continue;
        }
        let target = caster.target();
        if skills.request_cast(index, caster, registry, now)?.is_started() {
            break;
        }
        // a failed attempt may have redirected the target to the caster
        caster.set_target(target);
    }
    Ok(())
}

fn publish_skill_events(
    bus: &EventBus,
    registry: &SkillRegistry,
    entity: EntityId,
    skills: &mut Skills,
    now: Tick,
) {
    for event in skills.drain_events() {
        let name = event.skill().name(registry).unwrap_or("<unknown>");
        match event {
            SkillEvent::CastStarted(_) => debug!(%entity, skill = name, "cast started"),
            SkillEvent::CastFinished(_) => debug!(%entity, skill = name, "cast finished"),
            SkillEvent::CastCanceled(_) => debug!(%entity, skill = name, "cast canceled"),
        }
        bus.publish(Event::Skill(SkillNotification {
            entity,
            event,
            clock: now,
        }));
    }
}
