//! Register players

use anyhow::Result;
use clap::Parser;
use console::style;
use progression_core::{ExternalId, ExternalIdentity};
use progression_runtime::RuntimeHandle;

use super::report;

/// Register a player by external id, or refresh a known one
#[derive(Parser)]
pub struct Register {
    /// External (platform) user id
    #[arg(value_name = "PLAYER")]
    player: i64,

    #[arg(short, long)]
    username: Option<String>,

    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,
}

impl Register {
    pub async fn execute(self, handle: &RuntimeHandle) -> Result<()> {
        let identity = ExternalIdentity {
            external_id: ExternalId(self.player),
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
        };
        let registration = handle.register_player(identity).await.map_err(report)?;

        let verb = if registration.created {
            style("Registered").green()
        } else {
            style("Refreshed").yellow()
        };
        println!(
            "{} {} (internal id {})",
            verb,
            registration.player.display_name(),
            registration.player.id
        );
        println!(
            "{} {}",
            style("Gold:").bold().cyan(),
            registration.profile.gold()
        );
        Ok(())
    }
}
