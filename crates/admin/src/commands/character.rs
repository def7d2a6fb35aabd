//! Create and inspect characters

use anyhow::Result;
use clap::Parser;
use console::style;
use progression_core::ExternalId;
use progression_runtime::RuntimeHandle;

use super::report;

/// Create the player's character
#[derive(Parser)]
pub struct Create {
    /// External (platform) user id
    #[arg(value_name = "PLAYER")]
    player: i64,

    /// Character name, unique ignoring case
    name: String,

    #[arg(long, default_value_t = 10)]
    strength: i32,

    #[arg(long, default_value_t = 5)]
    agility: i32,

    #[arg(long, default_value_t = 5)]
    vitality: i32,
}

impl Create {
    pub async fn execute(self, handle: &RuntimeHandle) -> Result<()> {
        let character = handle
            .create_character(
                ExternalId(self.player),
                &self.name,
                self.strength,
                self.agility,
                self.vitality,
            )
            .await
            .map_err(report)?;

        println!(
            "{} {} (id {})",
            style("Created").green(),
            style(&character.name).bold(),
            character.id
        );
        Ok(())
    }
}

/// Show a player's character sheet
#[derive(Parser)]
pub struct Show {
    /// External (platform) user id
    #[arg(value_name = "PLAYER")]
    player: i64,
}

impl Show {
    pub fn execute(self, handle: &RuntimeHandle) -> Result<()> {
        let external = ExternalId(self.player);
        let view = handle.character_view(external).map_err(report)?;
        let profile = handle.profile(external).map_err(report)?;
        let character = &view.character;
        let stats = &view.stats;
        let skills = character.skills();

        println!("{}", style(format!("=== {} ===", character.name)).bold().green());
        println!(
            "  Level {}  ({} xp, {} free points)",
            character.level(),
            character.experience(),
            character.free_skill_points()
        );
        println!(
            "  STR {}  AGI {}  VIT {}",
            skills.strength, skills.agility, skills.vitality
        );
        println!();

        println!("{}", style("Stats:").bold().yellow());
        println!("  HP      {}/{}", character.current_health(), stats.max_health);
        println!("  Attack  {}-{}", stats.min_attack, stats.max_attack);
        println!("  Defense {}", stats.defense);
        println!("  Crit    {}%", stats.crit_chance);
        println!("  Dodge   {}%", stats.dodge_chance);
        println!();

        println!("{}", style("Equipment:").bold().yellow());
        if view.equipment.is_empty() {
            println!("  (nothing equipped)");
        }
        for equipped in &view.equipment {
            let name = equipped
                .definition
                .as_ref()
                .map_or("<unknown item>", |def| def.name.as_str());
            println!("  {:<7} {} ({})", equipped.slot, name, equipped.item);
        }
        println!();

        println!("{}", style("Inventory:").bold().yellow());
        if view.inventory.is_empty() {
            println!("  (empty)");
        }
        for line in &view.inventory {
            println!(
                "  {:>4} x {:<20} value {}",
                line.quantity,
                line.name(),
                line.total_value
            );
        }
        println!();

        println!(
            "{} {}  {} {}/{} ({}%)",
            style("Gold:").bold().cyan(),
            profile.gold(),
            style("Record:").bold().cyan(),
            profile.record.wins,
            profile.record.losses,
            profile.win_rate()
        );
        Ok(())
    }
}
