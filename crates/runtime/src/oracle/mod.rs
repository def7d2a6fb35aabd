//! Runtime wrappers around static game content.
//!
//! The item catalog and progression rules are immutable once the runtime is
//! built; [`OracleManager`] bundles them and hands out a
//! [`ProgressionEngine`] borrowing both. Dynamic state lives in repositories.
mod items;

use progression_core::{ProgressionConfig, ProgressionEngine};
use std::sync::Arc;

pub use items::ItemOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) items: Arc<ItemOracleImpl>,
    pub(crate) config: Arc<ProgressionConfig>,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(items: Arc<ItemOracleImpl>, config: Arc<ProgressionConfig>) -> Self {
        Self { items, config }
    }

    /// Rules engine over the bundled catalog and config.
    pub fn engine(&self) -> ProgressionEngine<'_> {
        ProgressionEngine::new(self.config.as_ref(), self.items.as_ref())
    }

    pub fn items(&self) -> &ItemOracleImpl {
        &self.items
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }
}
