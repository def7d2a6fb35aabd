//! Repair duplicate equipment rows

use anyhow::Result;
use clap::Parser;
use console::style;
use progression_runtime::RuntimeHandle;

use super::report;

/// Keep the earliest equipment row per slot and delete the rest
#[derive(Parser)]
pub struct Repair {}

impl Repair {
    pub async fn execute(self, handle: &RuntimeHandle) -> Result<()> {
        let summary = handle.repair_equipment().await.map_err(report)?;

        if summary.is_clean() {
            println!(
                "{} scanned {} characters, nothing to repair",
                style("Clean:").bold().green(),
                summary.characters_scanned
            );
        } else {
            println!(
                "{} removed {} rows from {} of {} characters",
                style("Repaired:").bold().yellow(),
                summary.rows_removed,
                summary.characters_repaired,
                summary.characters_scanned
            );
        }
        Ok(())
    }
}
