//! Deterministic game logic and data types shared across clients.
//!
//! `game-core` defines the canonical rules (actions, engine, world state) and
//! exposes pure APIs that can be reused by both the runtime and offline tools.
//! All state mutation flows through [`engine::GameEngine`], and supporting
//! crates depend on the types re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

pub use action::{Action, EntitySpawn, LevelUp};
pub use config::{GameConfig, HealRule, Viewport};
pub use engine::{GameEngine, ReduceError};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Direction, EntitiesState, EntityId, EntityKind, EntityState, Footprint, GameState,
    MapDimensions, Occupancy, PlayerProfile, Position, StateError, Tile, TileGrid, Vector,
    WorldState,
};
