use crate::skill::ExponentialLong;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Experience required for the first level-up.
    pub experience_multiplier: i64,
    /// Growth factor of the experience requirement per level.
    pub experience_growth: f64,
    /// Highest reachable character level.
    pub max_level: u32,
    /// Level difference at which experience rewards stop scaling.
    pub max_level_difference: u32,
    /// Milliseconds between two regeneration pulses.
    pub regen_interval_ms: u64,
    /// Default aggro radius for hostile NPCs (world units).
    pub aggro_radius: f32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const HOTBAR_SLOTS: usize = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_EXPERIENCE_MULTIPLIER: i64 = 100;
    pub const DEFAULT_EXPERIENCE_GROWTH: f64 = 1.1;
    pub const DEFAULT_MAX_LEVEL: u32 = 60;
    pub const DEFAULT_MAX_LEVEL_DIFFERENCE: u32 = 20;
    pub const DEFAULT_REGEN_INTERVAL_MS: u64 = 1_000;
    pub const DEFAULT_AGGRO_RADIUS: f32 = 8.0;

    pub fn new() -> Self {
        Self {
            experience_multiplier: Self::DEFAULT_EXPERIENCE_MULTIPLIER,
            experience_growth: Self::DEFAULT_EXPERIENCE_GROWTH,
            max_level: Self::DEFAULT_MAX_LEVEL,
            max_level_difference: Self::DEFAULT_MAX_LEVEL_DIFFERENCE,
            regen_interval_ms: Self::DEFAULT_REGEN_INTERVAL_MS,
            aggro_radius: Self::DEFAULT_AGGRO_RADIUS,
        }
    }

    /// Experience requirement curve described by this configuration.
    pub fn experience_curve(&self) -> ExponentialLong {
        ExponentialLong::new(self.experience_multiplier, self.experience_growth)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
