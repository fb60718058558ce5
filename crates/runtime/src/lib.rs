//! Host runtime for the skill and progression rules.
//!
//! Owns the world state the core leaves to its host: actors with positions,
//! factions and resource meters. Each tick it drives every actor's cast
//! controller through an [`ActorCaster`], resolves the queued effects, handles
//! deaths and kill rewards, and republishes everything on the [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the tick loop
//! - [`actor`] and [`caster`] adapt world state to [`game_core::Caster`]
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`clock`] supplies the monotonic [`game_core::Tick`] readings
//! - [`config`] reads host settings from the environment
pub mod actor;
pub mod caster;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod simulation;

pub use actor::{Actor, ActorSpec, ActorState, ResourceMeter, TargetRef};
pub use caster::{ActorCaster, Effect, Snapshot, WorldView};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{LoggingConfig, RuntimeConfig};
pub use error::{Result, RuntimeError};
pub use events::{CombatEvent, Event, EventBus, ProgressionEvent, SkillNotification, Topic};
pub use simulation::{Simulation, TickReport};
