use super::instance::Skill;

/// Cast lifecycle notification carrying the skill's snapshot.
///
/// Queued only while the caster is alive; the host drains the queue after
/// each update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEvent {
    CastStarted(Skill),
    CastFinished(Skill),
    CastCanceled(Skill),
}

impl SkillEvent {
    pub fn skill(&self) -> &Skill {
        match self {
            SkillEvent::CastStarted(skill)
            | SkillEvent::CastFinished(skill)
            | SkillEvent::CastCanceled(skill) => skill,
        }
    }
}
