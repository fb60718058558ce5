//! Per-level value curves used by templates and the experience requirement.
//!
//! Level 1 yields the base value. Level 0 (unlearned) is evaluated like
//! level 1 so tooltips and previews stay meaningful.

/// Integer that grows by a fixed amount per level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearInt {
    pub base: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_level: i32,
}

impl LinearInt {
    pub const fn new(base: i32, per_level: i32) -> Self {
        Self { base, per_level }
    }

    pub const fn constant(value: i32) -> Self {
        Self::new(value, 0)
    }

    pub fn get(&self, level: u32) -> i32 {
        let steps = level.saturating_sub(1) as i32;
        self.base.saturating_add(self.per_level.saturating_mul(steps))
    }
}

/// Float that grows by a fixed amount per level.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearFloat {
    pub base: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_level: f32,
}

impl LinearFloat {
    pub const fn new(base: f32, per_level: f32) -> Self {
        Self { base, per_level }
    }

    pub const fn constant(value: f32) -> Self {
        Self::new(value, 0.0)
    }

    pub fn get(&self, level: u32) -> f32 {
        self.base + self.per_level * level.saturating_sub(1) as f32
    }
}

/// Geometric curve: `multiplier × growth^(level − 1)`, truncated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExponentialLong {
    pub multiplier: i64,
    pub growth: f64,
}

impl ExponentialLong {
    pub const fn new(multiplier: i64, growth: f64) -> Self {
        Self { multiplier, growth }
    }

    pub fn get(&self, level: u32) -> i64 {
        let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
        (self.multiplier as f64 * self.growth.powi(exponent)) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_int_grows_per_level() {
        let curve = LinearInt::new(30, 10);
        assert_eq!(curve.get(0), 30);
        assert_eq!(curve.get(1), 30);
        assert_eq!(curve.get(3), 50);
        assert_eq!(LinearInt::constant(7).get(9), 7);
    }

    #[test]
    fn linear_float_grows_per_level() {
        let curve = LinearFloat::new(2.0, 0.5);
        assert_eq!(curve.get(1), 2.0);
        assert_eq!(curve.get(5), 4.0);
    }

    #[test]
    fn exponential_curve_matches_ten_percent_growth() {
        let curve = ExponentialLong::new(100, 1.1);
        assert_eq!(curve.get(1), 100);
        assert_eq!(curve.get(2), 110);
        assert_eq!(curve.get(3), 121);
        assert_eq!(curve.get(4), 133);
    }
}
