//! Actors hosted by the simulation.
//!
//! An actor bundles the host-owned world state (position, faction, resource
//! meters, target) with the per-entity rule state from game-core (skills,
//! experience, hotbar).

use game_core::{
    AggroArea, EntityId, Experience, Faction, GameConfig, Level, Position, ResourcePool,
    SkillRegistry, Skillbar, Skills, Tick,
};

use crate::error::Result;

/// Resource meter owned by the host. Never drops below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceMeter {
    pub current: i32,
    pub maximum: i32,
}

impl ResourceMeter {
    pub fn new(current: i32, maximum: i32) -> Self {
        let maximum = maximum.max(0);
        Self {
            current: current.clamp(0, maximum),
            maximum,
        }
    }

    pub fn full(maximum: i32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn pool(&self) -> ResourcePool {
        ResourcePool::new(self.current, self.maximum)
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0
    }

    /// Removes `amount`, saturating at zero. Returns what was removed.
    pub fn spend(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount.max(0)).max(0);
        before - self.current
    }

    /// Adds `amount`, capped at the maximum. Returns what was added.
    pub fn restore(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount.max(0)).min(self.maximum);
        self.current - before
    }

    pub fn set_maximum(&mut self, maximum: i32) {
        self.maximum = maximum.max(0);
        self.current = self.current.min(self.maximum);
    }
}

/// What an actor aims at, by reference. Resolved against the world each time
/// the rules ask.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TargetRef {
    Entity(EntityId),
    Point(Position),
}

/// Blueprint for spawning an actor.
#[derive(Clone, Debug)]
pub struct ActorSpec {
    pub name: String,
    pub faction: Faction,
    pub position: Position,
    pub forward: Position,
    pub health: i32,
    pub mana: i32,
    pub level: u32,
    pub base_damage: i32,
    pub has_weapon: bool,
    pub skills: Vec<String>,
    /// Experience granted to the killer before level balancing.
    pub experience_reward: i64,
    /// NPCs with an aggro radius pick targets and cast on their own.
    pub aggro_radius: Option<f32>,
    pub hotbar: bool,
}

impl ActorSpec {
    pub fn new(name: impl Into<String>, faction: Faction) -> Self {
        Self {
            name: name.into(),
            faction,
            position: Position::ORIGIN,
            forward: Position::FORWARD,
            health: 100,
            mana: 0,
            level: 1,
            base_damage: 0,
            has_weapon: true,
            skills: Vec::new(),
            experience_reward: 0,
            aggro_radius: None,
            hotbar: false,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn facing(mut self, forward: Position) -> Self {
        self.forward = forward;
        self
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    pub fn with_mana(mut self, mana: i32) -> Self {
        self.mana = mana;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_base_damage(mut self, damage: i32) -> Self {
        self.base_damage = damage;
        self
    }

    pub fn unarmed(mut self) -> Self {
        self.has_weapon = false;
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_reward(mut self, experience: i64) -> Self {
        self.experience_reward = experience;
        self
    }

    pub fn with_aggro(mut self, radius: f32) -> Self {
        self.aggro_radius = Some(radius);
        self
    }

    pub fn with_hotbar(mut self) -> Self {
        self.hotbar = true;
        self
    }
}

/// Host-owned world state of one actor.
#[derive(Clone, Debug)]
pub struct ActorState {
    pub id: EntityId,
    pub name: String,
    pub faction: Faction,
    pub position: Position,
    pub forward: Position,
    pub health: ResourceMeter,
    pub mana: ResourceMeter,
    /// Maximums before skill and buff bonuses.
    pub base_health: i32,
    pub base_mana: i32,
    pub base_damage: i32,
    pub has_weapon: bool,
    pub target: Option<TargetRef>,
    pub experience_reward: i64,
    /// Last entity that damaged this actor.
    pub last_attacker: Option<EntityId>,
}

impl ActorState {
    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub state: ActorState,
    pub skills: Skills,
    pub experience: Experience,
    pub aggro: Option<AggroArea>,
    pub hotbar: Option<Skillbar>,
    pub(crate) next_regen_at: Tick,
    /// Death already processed.
    pub(crate) dead: bool,
}

impl Actor {
    pub(crate) fn spawn(
        id: EntityId,
        spec: ActorSpec,
        config: &GameConfig,
        registry: &SkillRegistry,
        now: Tick,
    ) -> Result<Self> {
        let skills = Skills::from_names(&spec.skills, registry, now)?;
        let level = Level::new(config.max_level).with_current(spec.level);
        let experience = Experience::new(level, config.experience_curve());
        let hotbar = if spec.hotbar {
            let mut bar = Skillbar::new();
            bar.load(&skills, registry)?;
            Some(bar)
        } else {
            None
        };

        let mut actor = Self {
            state: ActorState {
                id,
                name: spec.name,
                faction: spec.faction,
                position: spec.position,
                forward: spec.forward,
                health: ResourceMeter::full(spec.health),
                mana: ResourceMeter::full(spec.mana),
                base_health: spec.health,
                base_mana: spec.mana,
                base_damage: spec.base_damage,
                has_weapon: spec.has_weapon,
                target: None,
                experience_reward: spec.experience_reward,
                last_attacker: None,
            },
            skills,
            experience,
            aggro: spec.aggro_radius.map(AggroArea::new),
            hotbar,
            next_regen_at: now + config.regen_interval_ms,
            dead: false,
        };

        // passives raise the maximums; start topped up
        actor.refresh_maximums(registry)?;
        actor.state.health.current = actor.state.health.maximum;
        actor.state.mana.current = actor.state.mana.maximum;
        Ok(actor)
    }

    pub fn id(&self) -> EntityId {
        self.state.id
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    pub fn level(&self) -> u32 {
        self.experience.level().current()
    }

    /// Applies skill and buff bonuses to the resource maximums.
    pub(crate) fn refresh_maximums(&mut self, registry: &SkillRegistry) -> Result<()> {
        let bonuses = self.skills.bonuses(registry)?;
        let state = &mut self.state;
        state
            .health
            .set_maximum(state.base_health.saturating_add(bonuses.health_max));
        state
            .mana
            .set_maximum(state.base_mana.saturating_add(bonuses.mana_max));
        Ok(())
    }
}
