//! Topic-based event bus for runtime events.
//!
//! The simulation drains the core's event queues after every update and
//! republishes them here; consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, ProgressionEvent, SkillNotification};
