//! Inventory and equipment commands

use anyhow::Result;
use clap::Parser;
use console::style;
use progression_core::{EquipOutcome, EquipSlot, ExternalId, ItemHandle};
use progression_runtime::RuntimeHandle;

use super::{parse_slot, report};

/// Give items to a player
#[derive(Parser)]
pub struct Give {
    /// External (platform) user id
    #[arg(value_name = "PLAYER")]
    player: i64,

    /// Item handle from the catalog
    #[arg(value_name = "ITEM")]
    item: u32,

    #[arg(short, long, default_value_t = 1)]
    quantity: u32,
}

impl Give {
    pub async fn execute(self, handle: &RuntimeHandle) -> Result<()> {
        let total = handle
            .add_item(ExternalId(self.player), ItemHandle(self.item), self.quantity)
            .await
            .map_err(report)?;
        println!(
            "{} {} x {} (now {})",
            style("Gave").green(),
            self.quantity,
            ItemHandle(self.item),
            total
        );
        Ok(())
    }
}

/// Equip an item from the player's inventory
#[derive(Parser)]
pub struct Equip {
    /// External (platform) user id
    #[arg(value_name = "PLAYER")]
    player: i64,

    /// Slot name (weapon, torso)
    #[arg(value_name = "SLOT", value_parser = parse_slot)]
    slot: EquipSlot,

    /// Item handle from the catalog
    #[arg(value_name = "ITEM")]
    item: u32,
}

impl Equip {
    pub async fn execute(self, handle: &RuntimeHandle) -> Result<()> {
        let outcome = handle
            .equip(ExternalId(self.player), self.slot, ItemHandle(self.item))
            .await
            .map_err(report)?;

        match outcome {
            EquipOutcome::Equipped { replaced: Some(previous) } => println!(
                "{} {} in {} (returned {} to inventory)",
                style("Equipped").green(),
                ItemHandle(self.item),
                self.slot,
                previous
            ),
            EquipOutcome::Equipped { replaced: None } => println!(
                "{} {} in {}",
                style("Equipped").green(),
                ItemHandle(self.item),
                self.slot
            ),
            EquipOutcome::AlreadyEquipped => println!(
                "{} {} is already in {}",
                style("Unchanged").yellow(),
                ItemHandle(self.item),
                self.slot
            ),
        }
        Ok(())
    }
}

/// Empty an equipment slot
#[derive(Parser)]
pub struct Unequip {
    /// External (platform) user id
    #[arg(value_name = "PLAYER")]
    player: i64,

    /// Slot name (weapon, torso)
    #[arg(value_name = "SLOT", value_parser = parse_slot)]
    slot: EquipSlot,
}

impl Unequip {
    pub async fn execute(self, handle: &RuntimeHandle) -> Result<()> {
        let removed = handle
            .unequip(ExternalId(self.player), self.slot)
            .await
            .map_err(report)?;
        match removed {
            Some(item) => println!("{} {} from {}", style("Unequipped").green(), item, self.slot),
            None => println!("{} {} was empty", style("Unchanged").yellow(), self.slot),
        }
        Ok(())
    }
}
