//! Player skill hotbar.
//!
//! Slots hold skill *names*, so a slot survives reordering of the skill list.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::skill::{CastRequest, Caster, RegistryError, SkillError, SkillRegistry, Skills};
use crate::state::Tick;

const HOTKEYS: [char; GameConfig::HOTBAR_SLOTS] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'];

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillbarSlot {
    pub reference: Option<String>,
    pub hotkey: char,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skillbar {
    slots: ArrayVec<SkillbarSlot, { GameConfig::HOTBAR_SLOTS }>,
    selected: usize,
}

impl Skillbar {
    pub fn new() -> Self {
        Self {
            slots: HOTKEYS
                .iter()
                .map(|&hotkey| SkillbarSlot {
                    reference: None,
                    hotkey,
                })
                .collect(),
            selected: 0,
        }
    }

    pub fn slots(&self) -> &[SkillbarSlot] {
        &self.slots
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_slot(&self) -> &SkillbarSlot {
        &self.slots[self.selected]
    }

    /// Selects the slot bound to `key`. Returns false for unbound keys.
    pub fn press_hotkey(&mut self, key: char) -> bool {
        match self.slots.iter().position(|slot| slot.hotkey == key) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// Moves the selection by `delta`, clamped to the first and last slot.
    pub fn scroll(&mut self, delta: i32) {
        let last = self.slots.len().saturating_sub(1) as i64;
        self.selected = (self.selected as i64 + i64::from(delta)).clamp(0, last) as usize;
    }

    pub fn assign(&mut self, slot: usize, name: Option<String>) -> Result<(), SkillError> {
        let len = self.slots.len();
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(SkillError::InvalidIndex { index: slot, len })?;
        entry.reference = name;
        Ok(())
    }

    /// Fills the leading slots with learned, castable skills in list order.
    ///
    /// Slots past the last such skill keep their assignment.
    pub fn load(&mut self, skills: &Skills, registry: &SkillRegistry) -> Result<(), RegistryError> {
        let mut slots = self.slots.iter_mut();
        for skill in skills.skills().iter().filter(|skill| skill.is_learned()) {
            let template = skill.template(registry)?;
            if template.is_passive() {
                continue;
            }
            match slots.next() {
                Some(slot) => slot.reference = Some(template.name.clone()),
                None => break,
            }
        }
        Ok(())
    }

    /// Index in `skills` of the skill in the selected slot.
    pub fn selected_skill(&self, skills: &Skills) -> Option<usize> {
        self.selected_slot()
            .reference
            .as_deref()
            .and_then(|name| skills.skill_index_by_name(name))
    }

    /// Requests a cast of the selected slot's skill.
    ///
    /// Returns `None` when the slot is empty or names a skill the entity
    /// does not have.
    pub fn use_selected<C: Caster + ?Sized>(
        &self,
        skills: &mut Skills,
        caster: &mut C,
        registry: &SkillRegistry,
        now: Tick,
    ) -> Result<Option<CastRequest>, SkillError> {
        match self.selected_skill(skills) {
            Some(index) => skills.request_cast(index, caster, registry, now).map(Some),
            None => Ok(None),
        }
    }
}

impl Default for Skillbar {
    fn default() -> Self {
        Self::new()
    }
}
