//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tokio::sync::broadcast;

use super::types::{CombatEvent, ProgressionEvent, SkillNotification};

/// Topics for event routing
#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, strum::EnumIter, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    /// Cast started / finished / canceled
    Skill,
    /// Experience gains and level-ups
    Progression,
    /// Damage, heals, deaths and aggro
    Combat,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Skill(SkillNotification),
    Progression(ProgressionEvent),
    Combat(CombatEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Skill(_) => Topic::Skill,
            Event::Progression(_) => Topic::Progression,
            Event::Combat(_) => Topic::Combat,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the channels.
#[derive(Clone)]
pub struct EventBus {
    skill: broadcast::Sender<Event>,
    progression: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            skill: broadcast::channel(capacity).0,
            progression: broadcast::channel(capacity).0,
            combat: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Skill => &self.skill,
            Topic::Progression => &self.progression,
            Topic::Combat => &self.combat,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to every topic
    pub fn subscribe_all(&self) -> HashMap<Topic, broadcast::Receiver<Event>> {
        Topic::iter()
            .map(|topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
