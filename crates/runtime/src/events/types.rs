//! Event types for different topics.

use game_core::{EntityId, SkillEvent, Tick};
use serde::{Deserialize, Serialize};

/// Cast lifecycle notification for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillNotification {
    pub entity: EntityId,
    pub event: SkillEvent,
    pub clock: Tick,
}

/// Events related to experience and levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionEvent {
    ExperienceGained {
        entity: EntityId,
        amount: i64,
        clock: Tick,
    },
    LevelUp {
        entity: EntityId,
        level: u32,
        clock: Tick,
    },
}

/// Events produced while resolving effects between entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// An idle entity picked a target from its aggro area.
    Aggro {
        entity: EntityId,
        target: EntityId,
        clock: Tick,
    },
    Damaged {
        source: EntityId,
        target: EntityId,
        amount: i32,
        clock: Tick,
    },
    Healed {
        source: EntityId,
        target: EntityId,
        health: i32,
        mana: i32,
        clock: Tick,
    },
    Died {
        entity: EntityId,
        killer: Option<EntityId>,
        clock: Tick,
    },
}
