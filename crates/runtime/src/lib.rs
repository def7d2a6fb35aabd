//! Runtime orchestration for character progression.
//!
//! This crate wires the rules engine from `progression-core` to storage,
//! per-player locking and event publication. Consumers build a [`Runtime`]
//! and drive every operation through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the operations and read models clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;

mod locks;

pub use api::{
    CharacterView, Clock, EquippedItem, InventoryLine, Registration, RepairReport, Result,
    RuntimeError, RuntimeHandle,
};
pub use events::{
    CharacterEvent, Event, EventBus, InventoryEvent, MaintenanceEvent, ProgressionEvent, Topic,
};
pub use oracle::{ItemOracleImpl, OracleManager};
pub use repository::{
    ChangeSet, FileStateRepository, InMemoryStateRepo, RepositoryError, StateRepository, Tables,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
