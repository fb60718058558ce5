/// Character level, always within `[1, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    current: u32,
    max: u32,
}

impl Level {
    /// Starts at level 1. A `max` of zero is treated as one.
    pub fn new(max: u32) -> Self {
        Self {
            current: 1,
            max: max.max(1),
        }
    }

    pub fn with_current(mut self, level: u32) -> Self {
        self.set_level(level);
        self
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_max(&self) -> bool {
        self.current >= self.max
    }

    /// Sets the level, clamped to `[1, max]`.
    pub fn set_level(&mut self, level: u32) {
        self.current = level.clamp(1, self.max);
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_level_clamps() {
        let mut level = Level::new(10);
        level.set_level(0);
        assert_eq!(level.current(), 1);
        level.set_level(42);
        assert_eq!(level.current(), 10);
        assert!(level.is_max());
        assert_eq!(Level::new(0).max(), 1);
    }
}
