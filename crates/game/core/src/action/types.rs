//! Payload types carried by [`Action`](super::Action) variants.

use crate::state::{EntityId, EntityKind, Position};

/// Everything needed to place a new single-tile entity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySpawn {
    pub id: EntityId,
    pub kind: EntityKind,
    pub health: i32,
    pub attack: i32,
    pub location: Position,
}

impl EntitySpawn {
    pub fn new(
        id: impl Into<EntityId>,
        kind: EntityKind,
        health: i32,
        attack: i32,
        location: Position,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            health,
            attack,
            location,
        }
    }
}

/// Stat deltas applied when the player gains a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    pub attack: i32,
    pub health: i32,
    /// Replaces the player's remaining XP requirement.
    pub next_threshold: i32,
}

impl LevelUp {
    pub const fn new(attack: i32, health: i32, next_threshold: i32) -> Self {
        Self {
            attack,
            health,
            next_threshold,
        }
    }
}
