//! Action catalogue.
//!
//! Every change to [`GameState`](crate::state::GameState) is described by one
//! [`Action`]. Actions carry fully resolved values: dice have already been
//! rolled and spawn points already chosen by the caller, so applying an action
//! is deterministic.
//!
//! # Module Structure
//!
//! - `types`: payloads shared by several variants (`EntitySpawn`, `LevelUp`)

pub mod types;

use std::sync::Arc;

pub use types::{EntitySpawn, LevelUp};

use crate::config::Viewport;
use crate::state::{EntityId, Position, TileGrid, Vector};

/// Closed set of state transitions understood by the engine.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    /// `entity.health -= value`.
    Damage { entity: EntityId, value: i32 },

    /// Adds `value` to a health baseline chosen by the configured
    /// [`HealRule`](crate::config::HealRule).
    Heal { entity: EntityId, value: i32 },

    /// Equips a weapon on the player and adds its attack bonus.
    SwitchWeapon { weapon: String, attack: i32 },

    /// Relative move; reindexes occupancy.
    Move { entity: EntityId, vector: Vector },

    /// Absolute move; reindexes occupancy.
    SetLocation { entity: EntityId, location: Position },

    AddEntity(EntitySpawn),

    RemoveEntity { entity: EntityId },

    /// Keeps only the player, at its current position.
    ResetBoard,

    /// Replaces the tile grid only.
    SetMap { grid: Arc<TileGrid> },

    IncreaseLevel,

    ResetLevel,

    SetWindowSize { viewport: Viewport },

    /// Subtracts `amount` from the player's remaining XP requirement.
    GainXp { amount: i32 },

    LevelUp(LevelUp),

    /// Replaces the whole state with a fresh initial one holding `grid`.
    ResetMap { grid: Arc<TileGrid> },

    /// Places the boss with its 2×2 footprint at `location`.
    AddBoss {
        attack: i32,
        health: i32,
        location: Position,
    },

    ToggleDarkness,
}

impl Action {
    pub fn damage(entity: impl Into<EntityId>, value: i32) -> Self {
        Self::Damage {
            entity: entity.into(),
            value,
        }
    }

    pub fn heal(entity: impl Into<EntityId>, value: i32) -> Self {
        Self::Heal {
            entity: entity.into(),
            value,
        }
    }

    pub fn switch_weapon(weapon: impl Into<String>, attack: i32) -> Self {
        Self::SwitchWeapon {
            weapon: weapon.into(),
            attack,
        }
    }

    pub fn move_by(entity: impl Into<EntityId>, vector: impl Into<Vector>) -> Self {
        Self::Move {
            entity: entity.into(),
            vector: vector.into(),
        }
    }

    pub fn set_location(entity: impl Into<EntityId>, location: Position) -> Self {
        Self::SetLocation {
            entity: entity.into(),
            location,
        }
    }

    pub fn remove_entity(entity: impl Into<EntityId>) -> Self {
        Self::RemoveEntity {
            entity: entity.into(),
        }
    }

    pub fn set_map(grid: impl Into<Arc<TileGrid>>) -> Self {
        Self::SetMap { grid: grid.into() }
    }

    pub fn reset_map(grid: impl Into<Arc<TileGrid>>) -> Self {
        Self::ResetMap { grid: grid.into() }
    }

    pub fn set_window_size(width: u32, height: u32) -> Self {
        Self::SetWindowSize {
            viewport: Viewport::new(width, height),
        }
    }

    /// Returns the snake_case string representation of the action.
    ///
    /// Used for logging and error reporting.
    pub fn as_snake_case(&self) -> &'static str {
        self.into()
    }
}
