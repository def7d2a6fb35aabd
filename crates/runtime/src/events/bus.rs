//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{CharacterEvent, InventoryEvent, MaintenanceEvent, ProgressionEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Character creation, equipment and stat changes
    Character,
    /// Inventory stack changes
    Inventory,
    /// Registration, experience, gold and game results
    Progression,
    /// Repair passes
    Maintenance,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Character(CharacterEvent),
    Inventory(InventoryEvent),
    Progression(ProgressionEvent),
    Maintenance(MaintenanceEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Character(_) => Topic::Character,
            Event::Inventory(_) => Topic::Inventory,
            Event::Progression(_) => Topic::Progression,
            Event::Maintenance(_) => Topic::Maintenance,
        }
    }
}

impl From<CharacterEvent> for Event {
    fn from(event: CharacterEvent) -> Self {
        Event::Character(event)
    }
}

impl From<InventoryEvent> for Event {
    fn from(event: InventoryEvent) -> Self {
        Event::Inventory(event)
    }
}

impl From<ProgressionEvent> for Event {
    fn from(event: ProgressionEvent) -> Self {
        Event::Progression(event)
    }
}

impl From<MaintenanceEvent> for Event {
    fn from(event: MaintenanceEvent) -> Self {
        Event::Maintenance(event)
    }
}

struct Channels {
    character: broadcast::Sender<Event>,
    inventory: broadcast::Sender<Event>,
    progression: broadcast::Sender<Event>,
    maintenance: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Character => &self.character,
            Topic::Inventory => &self.inventory,
            Topic::Progression => &self.progression,
            Topic::Maintenance => &self.maintenance,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
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
            channels: Arc::new(Channels {
                character: broadcast::channel(capacity).0,
                inventory: broadcast::channel(capacity).0,
                progression: broadcast::channel(capacity).0,
                maintenance: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
