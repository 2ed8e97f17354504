//! Authoritative game state representation.
//!
//! This module owns the data structures that describe entities, the tile grid
//! and the occupancy index. Consumers clone or query this state but replace it
//! exclusively through the engine.
pub mod error;
pub mod types;

use std::sync::Arc;

pub use error::StateError;
pub use types::{
    Direction, EntitiesState, EntityId, EntityKind, EntityState, Footprint, MapDimensions,
    Occupancy, PlayerProfile, Position, Tile, TileGrid, Vector, WorldState,
};

use crate::config::{GameConfig, Viewport};

/// Canonical snapshot of the game world.
///
/// Cloning is cheap: the entity map, occupancy index and tile grid are shared
/// until the next write copies the part being changed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// All entities on the board, keyed by name.
    pub entities: EntitiesState,
    /// Tile grid and occupancy index.
    pub world: WorldState,
    /// Dungeon level counter; drives scaling and exit/boss placement.
    pub level: u32,
    pub viewport: Viewport,
    /// Fog-of-war flag.
    pub darkness: bool,
}

impl GameState {
    /// Creates the initial state: only the player, standing at the origin,
    /// and an empty grid.
    pub fn new(config: &GameConfig) -> Self {
        Self::with_grid(config, TileGrid::empty())
    }

    /// Initial state with the given grid already in place.
    pub fn with_grid(config: &GameConfig, grid: impl Into<Arc<TileGrid>>) -> Self {
        let player = EntityState::initial_player(config);
        let occupancy = Occupancy::single(player.position, EntityId::player());
        Self {
            entities: EntitiesState::with_player(player),
            world: WorldState {
                grid: grid.into(),
                occupancy,
            },
            level: 0,
            viewport: config.viewport,
            darkness: true,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.world.grid
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.world.occupancy
    }

    pub fn entity(&self, id: &EntityId) -> Option<&EntityState> {
        self.entities.get(id)
    }

    pub fn player(&self) -> Option<&EntityState> {
        self.entities.player()
    }

    pub fn player_profile(&self) -> Option<&PlayerProfile> {
        self.player().and_then(|player| player.profile.as_ref())
    }

    /// Returns the entity covering `position`, if any.
    pub fn entity_at(&self, position: Position) -> Option<(&EntityId, &EntityState)> {
        let id = self.world.occupancy.occupant(&position)?;
        self.entities.get(id).map(|entity| (id, entity))
    }

    /// Verifies the occupancy index against entity positions and the grid.
    ///
    /// Grid checks are skipped while the grid is empty (the state a run
    /// starts in before the first map is installed).
    pub fn check_integrity(&self) -> Result<(), StateError> {
        if self.player().is_none() {
            return Err(StateError::PlayerMissing);
        }

        for (position, id) in self.world.occupancy.iter() {
            let entity = self
                .entities
                .get(id)
                .ok_or_else(|| StateError::DanglingOccupancy {
                    position: *position,
                    entity: id.clone(),
                })?;
            if !entity.footprint().contains(position) {
                return Err(StateError::StaleOccupancy {
                    position: *position,
                    entity: id.clone(),
                    actual: entity.position,
                });
            }
        }

        let grid = self.grid();
        for (id, entity) in self.entities.iter() {
            for cell in entity.footprint() {
                if self.world.occupancy.occupant(&cell) != Some(id) {
                    return Err(StateError::MissingOccupant {
                        entity: id.clone(),
                        position: cell,
                    });
                }
                if grid.is_empty() {
                    continue;
                }
                match grid.tile(cell) {
                    None => {
                        return Err(StateError::OutOfBounds {
                            entity: id.clone(),
                            position: cell,
                        });
                    }
                    Some(Tile::Wall) => {
                        return Err(StateError::OnWall {
                            entity: id.clone(),
                            position: cell,
                        });
                    }
                    Some(Tile::Floor) => {}
                }
            }
        }

        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
