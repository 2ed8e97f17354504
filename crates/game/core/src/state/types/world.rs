use std::collections::BTreeMap;
use std::sync::Arc;

use super::{EntityId, Position};

/// Canonical terrain classes for map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Wall,
    Floor,
}

impl Tile {
    pub fn is_passable(self) -> bool {
        matches!(self, Tile::Floor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Rectangular tile matrix produced by map generation.
///
/// Dimensions are fixed at construction; a level change swaps the whole grid.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    dimensions: MapDimensions,
    /// Row-major: index = y * width + x.
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates a grid of the given size filled with `tile`.
    pub fn filled(dimensions: MapDimensions, tile: Tile) -> Self {
        Self {
            dimensions,
            tiles: vec![tile; dimensions.area()],
        }
    }

    /// The 0×0 grid a fresh state starts with.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    /// Returns the tile at `position`, or `None` outside the grid.
    pub fn tile(&self, position: Position) -> Option<Tile> {
        self.index(position).map(|index| self.tiles[index])
    }

    pub fn is_floor(&self, position: Position) -> bool {
        self.tile(position) == Some(Tile::Floor)
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.tile(position) == Some(Tile::Wall)
    }

    /// Sets one tile. Returns false (and does nothing) outside the grid.
    pub fn set(&mut self, position: Position, tile: Tile) -> bool {
        match self.index(position) {
            Some(index) => {
                self.tiles[index] = tile;
                true
            }
            None => false,
        }
    }

    /// Fills the `width`×`height` rectangle whose top-left corner is `origin`.
    /// Cells outside the grid are skipped.
    pub fn fill_rect(&mut self, origin: Position, width: u32, height: u32, tile: Tile) {
        for x in origin.x..origin.x + width as i32 {
            for y in origin.y..origin.y + height as i32 {
                self.set(Position::new(x, y), tile);
            }
        }
    }

    /// Iterates positions of every FLOOR tile in row-major order.
    pub fn floor_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.dimensions.width.max(1) as usize;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_passable())
            .map(move |(index, _)| Position::new((index % width) as i32, (index / width) as i32))
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_passable()).count()
    }
}

/// Coordinate → entity index used for collision and interaction lookups.
///
/// Exactly one key per tile. The boss is the only entity that maps from more
/// than one tile.
///
/// Serialized as a list of `(position, entity)` pairs since positions are not
/// valid map keys in most text formats.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "Vec<(Position, EntityId)>", from = "Vec<(Position, EntityId)>")
)]
pub struct Occupancy {
    cells: Arc<BTreeMap<Position, EntityId>>,
}

impl Occupancy {
    pub fn new(cells: BTreeMap<Position, EntityId>) -> Self {
        Self {
            cells: Arc::new(cells),
        }
    }

    /// Index with a single entry.
    pub fn single(position: Position, entity: EntityId) -> Self {
        let mut cells = BTreeMap::new();
        cells.insert(position, entity);
        Self::new(cells)
    }

    pub fn occupant(&self, position: &Position) -> Option<&EntityId> {
        self.cells.get(position)
    }

    pub fn is_occupied(&self, position: &Position) -> bool {
        self.cells.contains_key(position)
    }

    /// Writes `entity` at `position`, returning whatever was there before.
    pub fn insert(&mut self, position: Position, entity: EntityId) -> Option<EntityId> {
        Arc::make_mut(&mut self.cells).insert(position, entity)
    }

    /// Clears `position` only if it currently maps to `entity`.
    ///
    /// Returns false if the cell was empty or held someone else.
    pub fn remove_if(&mut self, position: &Position, entity: &EntityId) -> bool {
        if self.cells.get(position) != Some(entity) {
            return false;
        }
        Arc::make_mut(&mut self.cells).remove(position);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Position, &EntityId)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every tile currently mapped to `entity`.
    pub fn positions_of<'a>(&'a self, entity: &'a EntityId) -> impl Iterator<Item = Position> + 'a {
        self.cells
            .iter()
            .filter(move |(_, occupant)| *occupant == entity)
            .map(|(position, _)| *position)
    }
}

#[cfg(feature = "serde")]
impl From<Vec<(Position, EntityId)>> for Occupancy {
    fn from(cells: Vec<(Position, EntityId)>) -> Self {
        Self::new(cells.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
impl From<Occupancy> for Vec<(Position, EntityId)> {
    fn from(occupancy: Occupancy) -> Self {
        occupancy
            .iter()
            .map(|(position, entity)| (*position, entity.clone()))
            .collect()
    }
}

/// Aggregated world-level state: the tile grid plus the occupancy index.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub grid: Arc<TileGrid>,
    pub occupancy: Occupancy,
}

impl WorldState {
    /// Determines whether a tile can be entered considering terrain and occupancy.
    pub fn is_vacant_floor(&self, position: Position) -> bool {
        self.grid.is_floor(position) && !self.occupancy.is_occupied(&position)
    }
}
