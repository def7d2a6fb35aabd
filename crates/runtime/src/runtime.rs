//! High-level runtime orchestrator.
//!
//! The runtime owns the repository, the static content and the event bus,
//! and exposes a builder-based API for clients. All operations go through
//! the cloneable [`RuntimeHandle`].

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::broadcast;

use progression_content::ContentFactory;
use progression_core::{ItemDefinition, ProgressionConfig};

use crate::api::{Clock, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::oracle::{ItemOracleImpl, OracleManager};
use crate::repository::{FileStateRepository, InMemoryStateRepo, StateRepository};

/// Runtime configuration shared across the orchestrator and operations.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub progression: ProgressionConfig,
    pub event_buffer_size: usize,
    /// Directory of the file store. `None` keeps state in memory.
    pub data_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            progression: ProgressionConfig::default(),
            event_buffer_size: 100,
            data_dir: None,
        }
    }
}

/// Main runtime that owns storage and content
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to runtime events on one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    items: Option<Vec<ItemDefinition>>,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn StateRepository>>,
    clock: Option<Clock>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            items: None,
            oracles: None,
            repository: None,
            clock: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Item catalog served by the runtime
    pub fn items(mut self, items: Vec<ItemDefinition>) -> Self {
        self.items = Some(items);
        self
    }

    /// Loads the catalog and progression config through a content factory.
    ///
    /// Files missing from the factory's directory fall back to the content
    /// shipped with `progression-content`.
    pub fn content(mut self, factory: &ContentFactory) -> Result<Self> {
        let content_error = |err: anyhow::Error| {
            let err = RuntimeError::Content(format!("{err:#}"));
            tracing::error!(error = %err, "content load failed");
            err
        };
        self.config.progression = factory.load_config().map_err(content_error)?;
        self.items = Some(factory.load_items().map_err(content_error)?);
        Ok(self)
    }

    /// Set a prebuilt oracle manager
    ///
    /// Takes precedence over [`items`](Self::items) and the configured
    /// progression rules.
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Storage backend. Defaults to the file store when
    /// [`RuntimeConfig::data_dir`] is set and to memory otherwise.
    pub fn repository(mut self, repository: Arc<dyn StateRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Time source for timestamps written by operations
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        let oracles = match (self.oracles, self.items) {
            (Some(oracles), _) => oracles,
            (None, Some(items)) => OracleManager::new(
                Arc::new(ItemOracleImpl::from_definitions(items)),
                Arc::new(self.config.progression.clone()),
            ),
            (None, None) => return Err(RuntimeError::MissingOracles),
        };

        let repository: Arc<dyn StateRepository> = match (self.repository, &self.config.data_dir) {
            (Some(repository), _) => repository,
            (None, Some(dir)) => Arc::new(FileStateRepository::open(dir)?),
            (None, None) => Arc::new(InMemoryStateRepo::new()),
        };

        let events = EventBus::with_capacity(self.config.event_buffer_size);
        let clock = self.clock.unwrap_or_else(crate::api::handle::system_clock);

        tracing::debug!(
            items = oracles.items().len(),
            persistent = self.config.data_dir.is_some(),
            "runtime built"
        );

        Ok(Runtime {
            handle: RuntimeHandle::new(repository, oracles, events, clock),
        })
    }
}
