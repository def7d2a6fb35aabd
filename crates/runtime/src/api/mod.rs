//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on storage, locking, or events.

pub mod errors;
pub mod handle;
pub mod views;

mod ops;

pub use errors::{Result, RuntimeError};
pub use handle::{Clock, RuntimeHandle};
pub use views::{CharacterView, EquippedItem, InventoryLine, Registration, RepairReport};
