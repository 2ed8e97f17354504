//! Procedural and data-driven game content.
//!
//! This crate houses everything the runtime feeds into the rules engine
//! without being part of the game state itself:
//! - Dungeon map generation (`generators`)
//! - Weapon tiers and other static tables (`tables`)
//! - TOML configuration loading (`loaders`, behind the `loaders` feature)

pub mod generators;
pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use generators::{GenerationError, GenerationParams, RoomGenerator};
pub use tables::{ContentTables, WeaponTier};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentBundle, LoadResult};
