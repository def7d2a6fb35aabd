//! Cloneable façade for issuing operations against the runtime.
//!
//! [`RuntimeHandle`] hides the repository, lock and oracle plumbing. Each
//! mutating method is one unit of work: resolve the player, take that
//! player's lock, load rows, stage the change with the rules engine, commit a
//! single [`ChangeSet`], then publish events. Nothing is published for a unit
//! of work that failed.
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;

use progression_core::{
    Character, CharacterSheet, DerivedStats, ExternalId, ItemDefinition, ItemOracle, Player,
    ProgressionEngine, Timestamp,
};

use super::errors::{Result, RuntimeError};
use crate::events::{CharacterEvent, Event, EventBus, Topic};
use crate::locks::LockRegistry;
use crate::oracle::OracleManager;
use crate::repository::{ChangeSet, StateRepository};

/// Source of the current time for every staged write.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

pub(crate) fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// What a committed character-scoped unit of work produced.
pub(crate) struct SheetCommit<T> {
    pub(crate) value: T,
    /// Set when the unit of work recomputed derived stats.
    pub(crate) stats: Option<DerivedStats>,
    pub(crate) character: Character,
}

pub(crate) struct Inner {
    pub(crate) repo: Arc<dyn StateRepository>,
    pub(crate) oracles: OracleManager,
    pub(crate) locks: LockRegistry,
    pub(crate) events: EventBus,
    pub(crate) clock: Clock,
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    pub(crate) inner: Arc<Inner>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        repo: Arc<dyn StateRepository>,
        oracles: OracleManager,
        events: EventBus,
        clock: Clock,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                repo,
                oracles,
                locks: LockRegistry::new(),
                events,
                clock,
            }),
        }
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Character` - Creation, equipment and stat changes
    /// - `Topic::Inventory` - Items added or removed
    /// - `Topic::Progression` - Registration, experience, gold, game results
    /// - `Topic::Maintenance` - Equipment repair passes
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.inner.events.subscribe(topic)
    }

    /// Every item in the catalog, ordered by handle.
    pub fn catalog(&self) -> Vec<ItemDefinition> {
        self.inner.oracles.items().all_definitions()
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.inner.oracles
    }

    pub(crate) fn engine(&self) -> ProgressionEngine<'_> {
        self.inner.oracles.engine()
    }

    pub(crate) fn repo(&self) -> &dyn StateRepository {
        self.inner.repo.as_ref()
    }

    pub(crate) fn now(&self) -> Timestamp {
        (self.inner.clock)()
    }

    pub(crate) fn publish(&self, event: impl Into<Event>) {
        self.inner.events.publish(event);
    }

    /// Resolves an external identity to its registered player.
    pub(crate) fn resolve(&self, external: ExternalId) -> Result<Player> {
        self.repo()
            .player_by_external(external)?
            .ok_or(RuntimeError::PlayerNotFound(external))
    }

    /// Runs one character-scoped unit of work.
    ///
    /// `op` stages mutations on the loaded sheet. Derived stats are
    /// recomputed once afterwards, and the sheet is written back only when
    /// something changed.
    pub(crate) async fn with_sheet<T>(
        &self,
        external: ExternalId,
        op: impl FnOnce(&ProgressionEngine<'_>, &mut CharacterSheet, Timestamp) -> Result<T>,
    ) -> Result<SheetCommit<T>> {
        let player = self.resolve(external)?;
        let _guard = self.inner.locks.player(player.id).await;

        let (character, board, inventory) = self
            .repo()
            .sheet(player.id)?
            .ok_or(RuntimeError::CharacterNotFound(external))?;
        let mut sheet = CharacterSheet::new(character, board, inventory);

        let engine = self.engine();
        let now = self.now();
        let value = op(&engine, &mut sheet, now)?;
        let stats = engine.commit(&mut sheet);

        if !sheet.has_changes() {
            let (character, _, _) = sheet.into_parts();
            return Ok(SheetCommit {
                value,
                stats,
                character,
            });
        }

        for row in &sheet.repaired().removed {
            tracing::warn!(
                character = %sheet.character().id,
                slot = %row.slot,
                item = %row.item,
                "dropped duplicate equipment row"
            );
        }

        let character_id = sheet.character().id;
        let (character, board, inventory) = sheet.into_parts();
        self.repo().commit(
            ChangeSet::new()
                .character(character.clone())
                .board(board)
                .inventory(inventory),
        )?;
        tracing::debug!(player = %external, character = %character_id, "committed sheet");

        Ok(SheetCommit {
            value,
            stats,
            character,
        })
    }

    /// Publishes the recompute of a committed unit of work, if one ran.
    pub(crate) fn publish_stats(&self, external: ExternalId, stats: Option<DerivedStats>) {
        if let Some(stats) = stats {
            self.publish(CharacterEvent::StatsRecomputed {
                player: external,
                stats,
            });
        }
    }
}
