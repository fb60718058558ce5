use super::caster::{Caster, Target, TargetEntity};
use crate::state::{EntityId, Position, ResourcePool};

/// In-memory caster that records every effect request.
#[derive(Clone, Debug)]
pub(crate) struct TestCaster {
    pub id: EntityId,
    pub alive: bool,
    pub health: ResourcePool,
    pub mana: ResourcePool,
    pub position: Position,
    pub forward: Position,
    pub weapon: bool,
    pub base_damage: i32,
    pub target: Option<Target>,
    pub damage_dealt: Vec<(EntityId, i32)>,
    pub area_damage: Vec<(Position, f32, i32)>,
    pub heals: Vec<(EntityId, i32, i32)>,
}

impl TestCaster {
    pub fn new() -> Self {
        Self {
            id: EntityId::PLAYER,
            alive: true,
            health: ResourcePool::full(100),
            mana: ResourcePool::full(100),
            position: Position::ORIGIN,
            forward: Position::FORWARD,
            weapon: true,
            base_damage: 0,
            target: None,
            damage_dealt: Vec::new(),
            area_damage: Vec::new(),
            heals: Vec::new(),
        }
    }

    pub fn enemy(id: EntityId, position: Position) -> Target {
        Target::Entity(TargetEntity {
            id,
            position,
            alive: true,
            hostile: true,
        })
    }

    pub fn kill_target(&mut self) {
        if let Some(Target::Entity(entity)) = &mut self.target {
            entity.alive = false;
        }
    }
}

impl Caster for TestCaster {
    fn id(&self) -> EntityId {
        self.id
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn health(&self) -> ResourcePool {
        self.health
    }

    fn mana(&self) -> ResourcePool {
        self.mana
    }

    fn position(&self) -> Position {
        self.position
    }

    fn forward(&self) -> Position {
        self.forward
    }

    fn has_weapon(&self) -> bool {
        self.weapon
    }

    fn base_damage(&self) -> i32 {
        self.base_damage
    }

    fn target(&self) -> Option<Target> {
        self.target
    }

    fn set_target(&mut self, target: Option<Target>) {
        self.target = target;
    }

    fn spend_mana(&mut self, amount: i32) {
        self.mana.current -= amount;
    }

    fn deal_damage(&mut self, target: EntityId, amount: i32) {
        self.damage_dealt.push((target, amount));
    }

    fn deal_area_damage(&mut self, center: Position, radius: f32, amount: i32) {
        self.area_damage.push((center, radius, amount));
    }

    fn heal(&mut self, target: EntityId, health: i32, mana: i32) {
        self.heals.push((target, health, mana));
    }
}
