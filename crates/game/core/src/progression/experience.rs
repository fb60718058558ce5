//! Experience accumulator and reward balancing.

use super::level::Level;
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::skill::ExponentialLong;

/// Level-up notification. Carries no payload; read the new level from
/// [`Experience::level`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExperienceError {
    #[error("max level difference must be positive")]
    ZeroLevelDifference,
}

impl GameError for ExperienceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroLevelDifference => "EXPERIENCE_ZERO_LEVEL_DIFFERENCE",
        }
    }
}

/// Experience toward the next level.
///
/// `current` stays below [`Experience::max`] except at the level cap, where
/// it may equal it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Experience {
    current: i64,
    level: Level,
    curve: ExponentialLong,
    #[cfg_attr(feature = "serde", serde(skip))]
    events: Vec<LevelUp>,
}

impl Experience {
    pub fn new(level: Level, curve: ExponentialLong) -> Self {
        Self {
            current: 0,
            level,
            curve,
            events: Vec::new(),
        }
    }

    /// Level 1 with the configured curve and level cap.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(Level::new(config.max_level), config.experience_curve())
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Experience required to leave the current level.
    pub fn max(&self) -> i64 {
        self.curve.get(self.level.current())
    }

    pub fn percent(&self) -> f32 {
        let max = self.max();
        if self.current == 0 || max == 0 {
            return 0.0;
        }
        self.current as f32 / max as f32
    }

    /// Sets the experience value, resolving any level-ups.
    ///
    /// Lowering the value never lowers the level. Returns the number of
    /// levels gained.
    pub fn set_value(&mut self, value: i64) -> u32 {
        if value <= self.current {
            self.current = value.max(0);
            return 0;
        }

        self.current = value;
        let mut gained = 0;
        while self.current >= self.max() && !self.level.is_max() {
            self.current -= self.max();
            self.level.set_level(self.level.current() + 1);
            self.events.push(LevelUp);
            gained += 1;
        }
        self.current = self.current.min(self.max());
        gained
    }

    /// Adds a signed reward. Returns the number of levels gained.
    pub fn gain(&mut self, delta: i64) -> u32 {
        self.set_value(self.current.saturating_add(delta))
    }

    pub fn drain_events(&mut self) -> Vec<LevelUp> {
        std::mem::take(&mut self.events)
    }
}

/// Scales a kill reward by the level difference between victim and attacker.
///
/// The difference is capped at `±max_level_difference`: a victim that many
/// levels above doubles the reward, one that many below yields nothing.
pub fn balance_experience_reward(
    reward: i64,
    attacker_level: u32,
    victim_level: u32,
    max_level_difference: u32,
) -> Result<i64, ExperienceError> {
    if max_level_difference == 0 {
        return Err(ExperienceError::ZeroLevelDifference);
    }
    let cap = i64::from(max_level_difference);
    let diff = (i64::from(victim_level) - i64::from(attacker_level)).clamp(-cap, cap);
    let multiplier = 1.0 + diff as f64 / cap as f64;
    Ok((reward as f64 * multiplier).round_ties_even() as i64)
}
