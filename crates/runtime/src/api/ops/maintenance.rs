//! Repair of duplicate equipment rows left by older data.

use crate::api::errors::Result;
use crate::api::handle::RuntimeHandle;
use crate::api::views::RepairReport;
use crate::events::MaintenanceEvent;
use crate::repository::ChangeSet;

impl RuntimeHandle {
    /// Keeps the earliest row per (character, slot) and deletes the rest,
    /// for every character.
    ///
    /// Each character is repaired under its owner's lock, so the pass can run
    /// alongside normal traffic. Running it twice removes nothing the second
    /// time.
    pub async fn repair_equipment(&self) -> Result<RepairReport> {
        let mut report = RepairReport::default();

        for (character, owner) in self.repo().characters()? {
            let _guard = self.inner.locks.player(owner).await;
            report.characters_scanned += 1;

            let mut board = self.repo().board(character)?;
            let repaired = board.repair();
            if repaired.is_empty() {
                continue;
            }

            for row in &repaired.removed {
                tracing::warn!(
                    %character,
                    slot = %row.slot,
                    item = %row.item,
                    row = row.id.0,
                    "removing duplicate equipment row"
                );
            }
            self.repo().commit(ChangeSet::new().board(board))?;

            report.characters_repaired += 1;
            report.rows_removed += repaired.len();
            self.publish(MaintenanceEvent::EquipmentRepaired {
                character,
                rows_removed: repaired.len(),
            });
        }

        tracing::info!(
            scanned = report.characters_scanned,
            repaired = report.characters_repaired,
            removed = report.rows_removed,
            "equipment repair finished"
        );
        Ok(report)
    }
}
