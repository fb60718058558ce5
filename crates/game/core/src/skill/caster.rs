//! Boundary between the skill rules and the entity that casts.
//!
//! The host implements [`Caster`] over its own entity storage. Effects that
//! touch another entity are *requests*: the host decides when and how they
//! land on the receiving entity.

use crate::state::{EntityId, Position, ResourcePool};

/// Snapshot of an entity the caster currently targets.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetEntity {
    pub id: EntityId,
    pub position: Position,
    pub alive: bool,
    /// Whether the target is hostile to the caster.
    pub hostile: bool,
}

/// Resolved target: an entity or a world point (skill shots, area spells).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Entity(TargetEntity),
    Point(Position),
}

impl Target {
    pub fn position(&self) -> Position {
        match self {
            Target::Entity(entity) => entity.position,
            Target::Point(point) => *point,
        }
    }

    pub fn entity(&self) -> Option<&TargetEntity> {
        match self {
            Target::Entity(entity) => Some(entity),
            Target::Point(_) => None,
        }
    }
}

/// Read and mutation surface the skill rules need from a casting entity.
pub trait Caster {
    fn id(&self) -> EntityId;

    fn is_alive(&self) -> bool;

    fn health(&self) -> ResourcePool;

    fn mana(&self) -> ResourcePool;

    fn position(&self) -> Position;

    /// Facing direction (not necessarily normalized).
    fn forward(&self) -> Position;

    fn has_weapon(&self) -> bool {
        true
    }

    /// Damage added on top of a damage skill's own value.
    fn base_damage(&self) -> i32 {
        0
    }

    fn target(&self) -> Option<Target>;

    /// Replaces the current target. Used when a check corrects the target.
    fn set_target(&mut self, target: Option<Target>);

    /// Deducts mana. Whether the pool may go negative is the caster's call.
    fn spend_mana(&mut self, amount: i32);

    fn deal_damage(&mut self, target: EntityId, amount: i32);

    fn deal_area_damage(&mut self, center: Position, radius: f32, amount: i32);

    fn heal(&mut self, target: EntityId, health: i32, mana: i32);

    /// The caster seen as a target of its own skills.
    fn as_target(&self) -> Target {
        Target::Entity(TargetEntity {
            id: self.id(),
            position: self.position(),
            alive: self.is_alive(),
            hostile: false,
        })
    }
}
