use std::collections::BTreeMap;
use std::sync::Arc;

use arrayvec::ArrayVec;

use super::{EntityId, Position};
use crate::config::GameConfig;

/// Tiles covered by a single entity. Only the boss covers more than one.
pub type Footprint = ArrayVec<Position, 4>;

/// Closed set of entity kinds placed on the board.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Player,
    Enemy,
    Boss,
    Weapon,
    HealthItem,
    Exit,
}

impl EntityKind {
    /// Side length of the square this kind occupies on the grid.
    pub const fn footprint_size(self) -> i32 {
        match self {
            EntityKind::Boss => GameConfig::BOSS_FOOTPRINT,
            _ => 1,
        }
    }
}

/// Fields only the player carries.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    /// Names of every weapon picked up, in pickup order.
    pub inventory: Vec<String>,
    pub weapon: String,
    pub level: u32,
    /// XP still missing before the next level-up; may go negative.
    pub xp_to_next_level: i32,
}

/// One placed game object.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityState {
    pub kind: EntityKind,
    pub health: i32,
    pub attack: i32,
    /// Top-left tile of the footprint.
    pub position: Position,
    /// Present on the player only.
    pub profile: Option<PlayerProfile>,
}

impl EntityState {
    pub fn new(kind: EntityKind, health: i32, attack: i32, position: Position) -> Self {
        Self {
            kind,
            health,
            attack,
            position,
            profile: None,
        }
    }

    /// Builds the player exactly as a new run starts: at the origin with the
    /// configured base stats.
    pub fn initial_player(config: &GameConfig) -> Self {
        Self {
            kind: EntityKind::Player,
            health: config.player_health,
            attack: config.player_attack,
            position: Position::ORIGIN,
            profile: Some(PlayerProfile {
                inventory: Vec::new(),
                weapon: config.starting_weapon.clone(),
                level: 0,
                xp_to_next_level: config.first_level_threshold,
            }),
        }
    }

    /// Every tile covered when the entity stands at `origin`.
    pub fn footprint_at(kind: EntityKind, origin: Position) -> Footprint {
        let size = kind.footprint_size();
        let mut cells = Footprint::new();
        for dy in 0..size {
            for dx in 0..size {
                cells.push(Position::new(origin.x + dx, origin.y + dy));
            }
        }
        cells
    }

    /// Every tile this entity currently covers.
    pub fn footprint(&self) -> Footprint {
        Self::footprint_at(self.kind, self.position)
    }
}

/// Keyed collection of every entity on the board.
///
/// The map sits behind an [`Arc`]; cloning a snapshot shares it and the first
/// write through [`EntitiesState::get_mut`] or friends copies it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    entities: Arc<BTreeMap<EntityId, EntityState>>,
}

impl EntitiesState {
    /// Creates a collection holding only the given player.
    pub fn with_player(player: EntityState) -> Self {
        let mut entities = BTreeMap::new();
        entities.insert(EntityId::player(), player);
        Self {
            entities: Arc::new(entities),
        }
    }

    pub fn get(&self, id: &EntityId) -> Option<&EntityState> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut EntityState> {
        if !self.entities.contains_key(id) {
            return None;
        }
        Arc::make_mut(&mut self.entities).get_mut(id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn player(&self) -> Option<&EntityState> {
        self.entities.get(EntityId::PLAYER)
    }

    /// Inserts or replaces an entity, returning the previous value.
    pub fn insert(&mut self, id: EntityId, entity: EntityState) -> Option<EntityState> {
        Arc::make_mut(&mut self.entities).insert(id, entity)
    }

    pub fn remove(&mut self, id: &EntityId) -> Option<EntityState> {
        if !self.entities.contains_key(id) {
            return None;
        }
        Arc::make_mut(&mut self.entities).remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &EntityState)> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns how many entities of the given kind are on the board.
    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|e| e.kind == kind).count()
    }

    /// True when both collections share the same backing map.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entities, &other.entities)
    }
}
