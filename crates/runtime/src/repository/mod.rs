//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that CHANGES during play:
//! - Players and their progression profiles
//! - Characters, equipment boards and inventories
//!
//! Static content (the item catalog) is handled by Oracles, not Repositories.

mod error;
mod file;
mod state;
mod tables;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use state::InMemoryStateRepo;
pub use tables::{
    CHARACTER_NAME, CHARACTER_OWNER, ChangeSet, PLAYER_EXTERNAL_ID, StoredSheet, Tables,
};
pub use traits::StateRepository;
