//! List the item catalog

use anyhow::Result;
use clap::Parser;
use console::style;
use progression_runtime::RuntimeHandle;

/// List every item the runtime knows
#[derive(Parser)]
pub struct Catalog {
    /// Only show items that can be equipped
    #[arg(short, long)]
    equippable: bool,
}

impl Catalog {
    pub fn execute(self, handle: &RuntimeHandle) -> Result<()> {
        let items: Vec<_> = handle
            .catalog()
            .into_iter()
            .filter(|item| !self.equippable || item.is_equippable())
            .collect();

        println!("{}", style("=== Item Catalog ===").bold().green());
        for item in &items {
            println!(
                "  {:>4}  {:<20} {:<10} {:<10} {:<7} value {}",
                style(item.handle.0).cyan(),
                item.name,
                item.kind,
                item.rarity,
                item.equip_tag,
                item.value
            );
            if !item.bonuses.is_empty() {
                println!("        {}", style(format!("{:?}", item.bonuses)).dim());
            }
        }
        println!();
        println!("{} {}", style("Total:").bold().cyan(), items.len());
        Ok(())
    }
}
