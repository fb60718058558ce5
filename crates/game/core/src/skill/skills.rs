//! One entity's skill list and active buffs.

use super::bonus::StatBonuses;
use super::buff::Buff;
use super::error::SkillError;
use super::event::SkillEvent;
use super::hash::SkillHash;
use super::instance::Skill;
use super::registry::{RegistryError, SkillRegistry};
use crate::state::Tick;

/// Skill currently selected by the cast controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct ActiveCast {
    pub index: usize,
    /// Canceled without clearing the selection; never resolves.
    pub canceled: bool,
}

/// Ordered skill list (the index is the selection key) plus active buffs.
///
/// Buffs form a set keyed by name: adding a buff that is already active
/// replaces it in place.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skills {
    pub(super) skills: Vec<Skill>,
    pub(super) buffs: Vec<Buff>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(super) active: Option<ActiveCast>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(super) events: Vec<SkillEvent>,
}

impl Skills {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves template names through the registry.
    pub fn from_names<I, S>(names: I, registry: &SkillRegistry, now: Tick) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skills = Self::new();
        for name in names {
            let template = registry.by_name(name.as_ref())?;
            skills.push(Skill::new(template, now));
        }
        Ok(skills)
    }

    /// Appends a skill and returns its index.
    pub fn push(&mut self, skill: Skill) -> usize {
        self.skills.push(skill);
        self.skills.len() - 1
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn get(&self, index: usize) -> Result<&Skill, SkillError> {
        self.skills.get(index).ok_or(SkillError::InvalidIndex {
            index,
            len: self.skills.len(),
        })
    }

    pub fn buffs(&self) -> &[Buff] {
        &self.buffs
    }

    /// Index of the selected skill, if any.
    pub fn current(&self) -> Option<usize> {
        self.active.map(|active| active.index)
    }

    pub fn skill_index_by_name(&self, name: &str) -> Option<usize> {
        let hash = SkillHash::of(name);
        self.skills.iter().position(|skill| skill.hash == hash)
    }

    pub fn buff_index_by_name(&self, name: &str) -> Option<usize> {
        let hash = SkillHash::of(name);
        self.buffs.iter().position(|buff| buff.hash == hash)
    }

    pub fn add_or_refresh_buff(&mut self, buff: Buff) {
        match self.buffs.iter_mut().find(|active| active.hash == buff.hash) {
            Some(active) => *active = buff,
            None => self.buffs.push(buff),
        }
    }

    /// Drops expired buffs. Returns how many were removed.
    pub fn cleanup_buffs(&mut self, now: Tick) -> usize {
        let before = self.buffs.len();
        self.buffs.retain(|buff| !buff.is_expired(now));
        before - self.buffs.len()
    }

    /// Sum of learned passive and active buff bonuses.
    pub fn bonuses(&self, registry: &SkillRegistry) -> Result<StatBonuses, RegistryError> {
        StatBonuses::aggregate(&self.skills, &self.buffs, registry)
    }

    /// Learns or levels up the skill at `index`.
    ///
    /// Returns the new level.
    pub fn upgrade_skill(
        &mut self,
        index: usize,
        caster_level: u32,
        registry: &SkillRegistry,
    ) -> Result<u32, SkillError> {
        let skill = *self.get(index)?;
        let template = skill.template(registry)?;
        if skill.level >= template.max_level {
            return Err(SkillError::MaxLevelReached {
                name: template.name.clone(),
                max_level: template.max_level,
            });
        }
        let required = template.upgrade_required_level(skill.level);
        if i64::from(caster_level) < i64::from(required) {
            return Err(SkillError::LevelTooLow {
                name: template.name.clone(),
                required,
                actual: caster_level,
            });
        }

        let level = skill.level + 1;
        self.skills[index].level = level;
        Ok(level)
    }

    /// Takes every queued cast lifecycle event.
    pub fn drain_events(&mut self) -> Vec<SkillEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn emit(&mut self, alive: bool, event: SkillEvent) {
        if alive {
            self.events.push(event);
        }
    }
}
