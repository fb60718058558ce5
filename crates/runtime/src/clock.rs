//! Monotonic clock sources for the simulation.
//!
//! Cast validation and cast resolution must read the same clock, so the
//! host owns exactly one and passes its readings down.
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use game_core::Tick;

pub trait Clock: Send + Sync {
    fn now(&self) -> Tick;
}

/// Wall-clock milliseconds since the clock was created.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Tick {
        let millis = self.origin.elapsed().as_millis();
        Tick(u64::try_from(millis).unwrap_or(u64::MAX))
    }
}

/// Clock advanced explicitly. Clones share the same reading.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: Tick) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(start.0)),
        }
    }

    pub fn advance(&self, millis: u64) -> Tick {
        let previous = self.millis.fetch_add(millis, Ordering::SeqCst);
        Tick(previous.saturating_add(millis))
    }

    /// Moves the clock forward to `tick`. Earlier readings are ignored.
    pub fn set(&self, tick: Tick) {
        self.millis.fetch_max(tick.0, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        Tick(self.millis.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_shared_and_monotonic() {
        let clock = ManualClock::new(Tick(100));
        let other = clock.clone();
        assert_eq!(clock.advance(50), Tick(150));
        assert_eq!(other.now(), Tick(150));

        other.set(Tick(120));
        assert_eq!(clock.now(), Tick(150));
        other.set(Tick(1_000));
        assert_eq!(clock.now(), Tick(1_000));
    }

    #[test]
    fn system_clock_never_goes_back() {
        let clock = SystemClock::new();
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
