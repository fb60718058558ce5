//! Allegiance between entities.
//!
//! Targeting rules ask whether the caster may attack or heal a target; both
//! answers come from faction hostility.

/// Actor faction (relationship/allegiance).
///
/// Faction affects:
/// - Which targets a damage skill accepts
/// - Whether a heal lands on the target or falls back to the caster
/// - Which entities an aggro area reacts to
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    /// No specific faction (default)
    #[default]
    None,
    /// Player characters
    Player,
    /// Friendly to players (guards, summoned minions)
    Friendly,
    /// Neutral (never initiates combat)
    Neutral,
    /// Monsters hostile to players
    Hostile,
}

impl Faction {
    /// Check if this faction is hostile to another faction.
    pub fn is_hostile_to(&self, other: &Faction) -> bool {
        match (self, other) {
            (Faction::Player | Faction::Friendly, Faction::Hostile)
            | (Faction::Hostile, Faction::Player | Faction::Friendly) => true,

            // Neutral and unaligned entities never fight
            (Faction::Neutral | Faction::None, _) | (_, Faction::Neutral | Faction::None) => false,

            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn hostility_is_symmetric() {
        assert!(Faction::Player.is_hostile_to(&Faction::Hostile));
        assert!(Faction::Hostile.is_hostile_to(&Faction::Player));
        assert!(Faction::Friendly.is_hostile_to(&Faction::Hostile));
        assert!(!Faction::Player.is_hostile_to(&Faction::Friendly));
        assert!(!Faction::Hostile.is_hostile_to(&Faction::Hostile));
        assert!(!Faction::Neutral.is_hostile_to(&Faction::Player));
    }

    #[test]
    fn parses_snake_case_names() {
        assert_eq!(Faction::from_str("hostile").unwrap(), Faction::Hostile);
        assert_eq!(Faction::from_str("PLAYER").unwrap(), Faction::Player);
        assert_eq!(Faction::Friendly.to_string(), "friendly");
    }
}
