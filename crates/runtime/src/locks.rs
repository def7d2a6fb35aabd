//! Per-player serialization of units of work.
//!
//! Every operation that reads and then writes one player's rows holds that
//! player's lock for the whole read-modify-write. Character creation also
//! takes a process-wide lock so the owner and name checks cannot interleave.
//!
//! Entries are created on demand. Once a map reaches [`PRUNE_AT`] entries,
//! locks nobody holds or waits on are dropped before a new one is added.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use progression_core::{ExternalId, PlayerId};

const PRUNE_AT: usize = 1024;

#[derive(Default)]
pub(crate) struct LockRegistry {
    players: Mutex<HashMap<PlayerId, Arc<AsyncMutex<()>>>>,
    registrations: Mutex<HashMap<ExternalId, Arc<AsyncMutex<()>>>>,
    creation: Arc<AsyncMutex<()>>,
}

impl LockRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to one player's rows.
    pub(crate) async fn player(&self, player: PlayerId) -> OwnedMutexGuard<()> {
        let lock = Self::entry(&self.players, player);
        lock.lock_owned().await
    }

    /// Serializes get-or-create for one external identity.
    pub(crate) async fn registration(&self, external: ExternalId) -> OwnedMutexGuard<()> {
        let lock = Self::entry(&self.registrations, external);
        lock.lock_owned().await
    }

    pub(crate) async fn creation(&self) -> OwnedMutexGuard<()> {
        self.creation.clone().lock_owned().await
    }

    fn entry<K>(map: &Mutex<HashMap<K, Arc<AsyncMutex<()>>>>, key: K) -> Arc<AsyncMutex<()>>
    where
        K: std::hash::Hash + Eq,
    {
        // A poisoned map still holds valid Arcs.
        let mut map = map.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if map.len() >= PRUNE_AT {
            // a count of 1 means only the map holds it
            map.retain(|_, lock| Arc::strong_count(lock) > 1);
        }
        map.entry(key).or_default().clone()
    }
}
