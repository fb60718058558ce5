use std::fmt;

/// Unique identifier for any entity tracked by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// World-space position. Also used for facing directions.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Vector pointing from `self` to `other`.
    pub fn towards(self, other: Position) -> Position {
        Position::new(other.x - self.x, other.y - self.y, other.z - self.z)
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn dot(self, other: Position) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn distance(self, other: Position) -> f32 {
        self.towards(other).length()
    }

    /// Angle in degrees between two directions.
    ///
    /// Returns `None` when either vector has zero length.
    pub fn angle_to(self, other: Position) -> Option<f32> {
        let lengths = self.length() * other.length();
        if lengths <= f32::EPSILON {
            return None;
        }
        let cos = (self.dot(other) / lengths).clamp(-1.0, 1.0);
        Some(cos.acos().to_degrees())
    }
}

/// Point on the shared monotonic clock, in milliseconds.
///
/// Cast and cooldown windows are stored as absolute end points and compared
/// against the current reading; nothing counts down per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self(secs * 1_000)
    }

    /// Moves the reading back by `millis`, stopping at the clock origin.
    pub const fn saturating_sub(self, millis: u64) -> Self {
        Self(self.0.saturating_sub(millis))
    }

    /// Milliseconds left until `end`, or zero once it has passed.
    pub const fn millis_until(self, end: Tick) -> u64 {
        end.0.saturating_sub(self.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Reading of a resource pool (health, mana) as seen by the skill core.
///
/// `current` is signed: the core deducts costs without clamping and leaves
/// bounds to the pool's owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    pub current: i32,
    pub max: i32,
}

impl ResourcePool {
    pub const fn new(current: i32, max: i32) -> Self {
        Self { current, max }
    }

    pub const fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    pub const fn is_empty(&self) -> bool {
        self.current <= 0
    }

    /// Fill ratio in `[0, 1]` (zero for an empty or zero-sized pool).
    pub fn percent(&self) -> f32 {
        if self.current <= 0 || self.max <= 0 {
            return 0.0;
        }
        (self.current as f32 / self.max as f32).min(1.0)
    }
}
