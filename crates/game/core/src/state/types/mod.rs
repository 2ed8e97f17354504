pub mod common;
pub mod entities;
pub mod world;

// Re-export common types
pub use common::{Direction, EntityId, Position, Vector};

// Re-export entity collection types
pub use entities::{EntitiesState, EntityKind, EntityState, Footprint, PlayerProfile};

// Re-export world types
pub use world::{MapDimensions, Occupancy, Tile, TileGrid, WorldState};
