use std::sync::Arc;

use crate::engine::ReduceError;
use crate::state::{
    EntitiesState, EntityId, EntityState, Footprint, GameState, Occupancy, Position, TileGrid,
    WorldState,
};

/// Wraps mutable access to [`GameState`] with structured sub-reducers.
pub struct StateReducer<'a> {
    state: &'a mut GameState,
}

impl<'a> StateReducer<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        self.state
    }

    pub fn entities(&mut self) -> EntitiesReducer<'_> {
        EntitiesReducer {
            entities: &mut self.state.entities,
        }
    }

    pub fn world(&mut self) -> WorldReducer<'_> {
        WorldReducer {
            world: &mut self.state.world,
        }
    }

    /// Checks that an entity of the given footprint may stand at `cells`.
    ///
    /// Cells already held by `mover` itself are allowed so that multi-tile
    /// entities can shift onto part of their own footprint. Terrain is only
    /// checked once a grid is installed.
    pub fn ensure_placeable(
        &self,
        action: &'static str,
        mover: &EntityId,
        cells: &Footprint,
    ) -> Result<(), ReduceError> {
        let world = &self.state.world;
        for cell in cells {
            if let Some(occupant) = world.occupancy.occupant(cell) {
                if occupant != mover {
                    return Err(ReduceError::Occupied {
                        action,
                        position: *cell,
                        occupant: occupant.clone(),
                    });
                }
            }
            if !world.grid.is_empty() && !world.grid.is_floor(*cell) {
                return Err(ReduceError::Blocked {
                    action,
                    position: *cell,
                });
            }
        }
        Ok(())
    }

    /// Moves `id` so its footprint starts at `destination`, keeping the
    /// occupancy index in step. Old cells are cleared before new ones are
    /// written.
    pub fn relocate(
        &mut self,
        action: &'static str,
        id: &EntityId,
        destination: Position,
    ) -> Result<(), ReduceError> {
        let entity = self
            .state
            .entities
            .get(id)
            .ok_or_else(|| ReduceError::unknown(action, id))?;
        let from = entity.footprint();
        let to = EntityState::footprint_at(entity.kind, destination);
        self.ensure_placeable(action, id, &to)?;

        let mut world = self.world();
        world.vacate(id, &from);
        world.occupy(id, &to);

        if let Some(entity) = self.entities().get_mut(id) {
            entity.position = destination;
        }
        Ok(())
    }

    /// Inserts a new entity and claims its footprint.
    pub fn spawn(
        &mut self,
        action: &'static str,
        id: EntityId,
        entity: EntityState,
    ) -> Result<(), ReduceError> {
        if self.state.entities.contains(&id) {
            return Err(ReduceError::DuplicateEntity { action, entity: id });
        }
        let cells = entity.footprint();
        self.ensure_placeable(action, &id, &cells)?;

        self.world().occupy(&id, &cells);
        self.entities().insert(id, entity);
        Ok(())
    }

    /// Removes an entity and releases its footprint.
    pub fn despawn(&mut self, action: &'static str, id: &EntityId) -> Result<EntityState, ReduceError> {
        let cells = self
            .state
            .entities
            .get(id)
            .map(EntityState::footprint)
            .ok_or_else(|| ReduceError::unknown(action, id))?;

        self.world().vacate(id, &cells);
        self.entities()
            .remove(id)
            .ok_or_else(|| ReduceError::unknown(action, id))
    }
}

pub struct EntitiesReducer<'a> {
    entities: &'a mut EntitiesState,
}

impl<'a> EntitiesReducer<'a> {
    pub fn get_mut(self, id: &EntityId) -> Option<&'a mut EntityState> {
        self.entities.get_mut(id)
    }

    /// Returns the player entity, but only if it carries its profile.
    pub fn player_mut(self) -> Option<&'a mut EntityState> {
        self.entities
            .get_mut(&EntityId::player())
            .filter(|player| player.profile.is_some())
    }

    pub fn insert(&mut self, id: EntityId, entity: EntityState) {
        self.entities.insert(id, entity);
    }

    pub fn remove(&mut self, id: &EntityId) -> Option<EntityState> {
        self.entities.remove(id)
    }

    /// Drops every entity except the player.
    pub fn retain_player(&mut self, player: EntityState) {
        *self.entities = EntitiesState::with_player(player);
    }
}

pub struct WorldReducer<'a> {
    world: &'a mut WorldState,
}

impl<'a> WorldReducer<'a> {
    pub fn occupy(&mut self, entity: &EntityId, cells: &Footprint) {
        for cell in cells {
            self.world.occupancy.insert(*cell, entity.clone());
        }
    }

    pub fn vacate(&mut self, entity: &EntityId, cells: &Footprint) {
        for cell in cells {
            self.world.occupancy.remove_if(cell, entity);
        }
    }

    pub fn reset_occupancy(&mut self, entity: &EntityId, cells: &Footprint) {
        self.world.occupancy = Occupancy::default();
        self.occupy(entity, cells);
    }

    pub fn set_grid(&mut self, grid: Arc<TileGrid>) {
        self.world.grid = grid;
    }
}
