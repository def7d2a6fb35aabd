//! Data-driven content definitions and loaders.
//!
//! This crate houses the static progression content and provides loaders for
//! RON/TOML data files:
//! - Item catalogs (data-driven via RON)
//! - Progression configuration (data-driven via TOML)
//!
//! Content is consumed by runtime oracles and never appears in player state.
//!
//! All loaders use progression-core types directly with serde for RON/TOML
//! deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ItemCatalog, ItemLoader};

/// Seed catalog shipped with the crate.
pub const DEFAULT_ITEMS: &str = include_str!("../data/items.ron");

/// Default progression configuration shipped with the crate.
pub const DEFAULT_CONFIG: &str = include_str!("../data/progression.toml");
