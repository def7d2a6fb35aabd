//! Command implementations for the admin tool
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod catalog;
mod character;
mod inventory;
mod maintenance;
mod player;

pub use catalog::Catalog;
pub use character::{Create, Show};
pub use inventory::{Equip, Give, Unequip};
pub use maintenance::Repair;
pub use player::Register;

use anyhow::Result;
use progression_core::{EquipSlot, GameError};
use progression_runtime::RuntimeError;

pub(crate) fn parse_slot(name: &str) -> Result<EquipSlot, String> {
    EquipSlot::parse(name).map_err(|e| e.to_string())
}

/// Converts a runtime failure into a one-line operator message with its code.
pub(crate) fn report(err: RuntimeError) -> anyhow::Error {
    anyhow::anyhow!("[{}] {}", err.error_code(), err)
}
