//! Shared value types exchanged between the rules and their host.
//!
//! The host owns world state (positions, resource pools, the clock); the
//! rules only read these values or ask the host to change them.
mod common;

pub use common::{EntityId, Position, ResourcePool, Tick};
