//! Topic-based event bus for runtime events.
//!
//! Operations publish an event after their unit of work has been committed,
//! never before. Consumers subscribe only to the topics they need; events are
//! best-effort notifications and are dropped when nobody listens.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CharacterEvent, InventoryEvent, MaintenanceEvent, ProgressionEvent};
