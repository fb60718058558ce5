//! [`Caster`] adapter over one actor.
//!
//! Reads other entities from a per-tick [`WorldView`] and queues every
//! effect on another entity as an [`Effect`]; the simulation applies them
//! after all actors have updated.

use std::collections::HashMap;

use game_core::{Caster, EntityId, Faction, Position, ResourcePool, Target, TargetEntity};

use crate::actor::{Actor, ActorState, TargetRef};

/// Effect requested by a caster, applied during effect resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    Damage {
        source: EntityId,
        target: EntityId,
        amount: i32,
    },
    AreaDamage {
        source: EntityId,
        center: Position,
        radius: f32,
        amount: i32,
    },
    Heal {
        source: EntityId,
        target: EntityId,
        health: i32,
        mana: i32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub position: Position,
    pub faction: Faction,
    pub alive: bool,
}

/// Positions, factions and liveness of every actor at the start of a tick.
#[derive(Clone, Debug, Default)]
pub struct WorldView {
    entities: HashMap<EntityId, Snapshot>,
}

impl WorldView {
    pub fn capture<'a>(actors: impl IntoIterator<Item = &'a Actor>) -> Self {
        Self {
            entities: actors
                .into_iter()
                .map(|actor| {
                    (
                        actor.id(),
                        Snapshot {
                            position: actor.state.position,
                            faction: actor.state.faction,
                            alive: actor.is_alive(),
                        },
                    )
                })
                .collect(),
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Snapshot> {
        self.entities.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Snapshot)> {
        self.entities.iter().map(|(&id, snapshot)| (id, snapshot))
    }
}

pub struct ActorCaster<'a> {
    state: &'a mut ActorState,
    world: &'a WorldView,
    effects: &'a mut Vec<Effect>,
    bonus_damage: i32,
}

impl<'a> ActorCaster<'a> {
    pub fn new(
        state: &'a mut ActorState,
        world: &'a WorldView,
        effects: &'a mut Vec<Effect>,
        bonus_damage: i32,
    ) -> Self {
        Self {
            state,
            world,
            effects,
            bonus_damage,
        }
    }

    fn resolve(&self, id: EntityId) -> Option<TargetEntity> {
        if id == self.state.id {
            return Some(TargetEntity {
                id,
                position: self.state.position,
                alive: self.state.is_alive(),
                hostile: false,
            });
        }
        self.world.get(id).map(|snapshot| TargetEntity {
            id,
            position: snapshot.position,
            alive: snapshot.alive,
            hostile: self.state.faction.is_hostile_to(&snapshot.faction),
        })
    }
}

impl Caster for ActorCaster<'_> {
    fn id(&self) -> EntityId {
        self.state.id
    }

    fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    fn health(&self) -> ResourcePool {
        self.state.health.pool()
    }

    fn mana(&self) -> ResourcePool {
        self.state.mana.pool()
    }

    fn position(&self) -> Position {
        self.state.position
    }

    fn forward(&self) -> Position {
        self.state.forward
    }

    fn has_weapon(&self) -> bool {
        self.state.has_weapon
    }

    fn base_damage(&self) -> i32 {
        self.state.base_damage.saturating_add(self.bonus_damage)
    }

    fn target(&self) -> Option<Target> {
        match self.state.target? {
            TargetRef::Entity(id) => self.resolve(id).map(Target::Entity),
            TargetRef::Point(point) => Some(Target::Point(point)),
        }
    }

    fn set_target(&mut self, target: Option<Target>) {
        self.state.target = target.map(|target| match target {
            Target::Entity(entity) => TargetRef::Entity(entity.id),
            Target::Point(point) => TargetRef::Point(point),
        });
    }

    fn spend_mana(&mut self, amount: i32) {
        self.state.mana.spend(amount);
    }

    fn deal_damage(&mut self, target: EntityId, amount: i32) {
        self.effects.push(Effect::Damage {
            source: self.state.id,
            target,
            amount,
        });
    }

    fn deal_area_damage(&mut self, center: Position, radius: f32, amount: i32) {
        self.effects.push(Effect::AreaDamage {
            source: self.state.id,
            center,
            radius,
            amount,
        });
    }

    fn heal(&mut self, target: EntityId, health: i32, mana: i32) {
        self.effects.push(Effect::Heal {
            source: self.state.id,
            target,
            health,
            mana,
        });
    }
}
