//! Room-and-door dungeon generator.
//!
//! Maps start as solid wall with a fixed 10×10 seed room in the middle. Every
//! further room is grown off an existing one: a wall tile touching floor is
//! picked at random, a room is sized and shifted so that tile becomes its
//! door, and the room is kept only if it lands entirely inside untouched wall.
//! Because each room opens onto floor that was already reachable, the whole
//! map stays 4-connected.

use game_core::{ErrorSeverity, GameError, MapDimensions, Position, Tile, TileGrid};
use rand::Rng;

/// Side length of the seed room carved before any other room.
pub const SEED_ROOM_SIZE: u32 = 10;

/// Inputs to [`RoomGenerator`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenerationParams {
    pub width: u32,
    pub height: u32,
    /// Smallest room side (inclusive).
    pub min_room_size: u32,
    /// Largest room side (exclusive unless equal to `min_room_size`).
    pub max_room_size: u32,
    /// Rooms carved in addition to the seed room.
    pub room_count: u32,
    /// Candidate rooms evaluated per placement before giving up.
    pub max_placement_attempts: u32,
    /// Random tiles drawn per door search before giving up.
    pub max_wall_samples: u32,
}

impl GenerationParams {
    pub const DEFAULT_SIZE: u32 = 100;
    pub const DEFAULT_MIN_ROOM: u32 = 6;
    pub const DEFAULT_MAX_ROOM: u32 = 20;
    pub const DEFAULT_ROOM_COUNT: u32 = 20;
    pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 10_000;
    pub const DEFAULT_WALL_SAMPLES: u32 = 100_000;

    pub fn new(
        width: u32,
        height: u32,
        max_room_size: u32,
        min_room_size: u32,
        room_count: u32,
    ) -> Self {
        Self {
            width,
            height,
            min_room_size,
            max_room_size,
            room_count,
            ..Self::default()
        }
    }

    pub fn with_budgets(mut self, max_placement_attempts: u32, max_wall_samples: u32) -> Self {
        self.max_placement_attempts = max_placement_attempts;
        self.max_wall_samples = max_wall_samples;
        self
    }

    pub fn dimensions(&self) -> MapDimensions {
        MapDimensions::new(self.width, self.height)
    }

    /// Top-left corner of the seed room.
    ///
    /// On the default 100×100 grid this is `(45, 45)`.
    pub fn seed_room_origin(&self) -> Position {
        let half = (SEED_ROOM_SIZE / 2) as i32;
        Position::new(self.width as i32 / 2 - half, self.height as i32 / 2 - half)
    }

    /// Rejects parameter sets the generator cannot honour.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let invalid = |reason: String| Err(GenerationError::InvalidParameters(reason));

        if self.width == 0 || self.height == 0 {
            return invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if self.min_room_size == 0 || self.max_room_size == 0 {
            return invalid("room sizes must be positive".to_owned());
        }
        if self.min_room_size > self.max_room_size {
            return invalid(format!(
                "min_room_size {} exceeds max_room_size {}",
                self.min_room_size, self.max_room_size
            ));
        }
        let shortest = self.width.min(self.height);
        if self.max_room_size >= shortest {
            return invalid(format!(
                "max_room_size {} must be smaller than the shortest grid side {shortest}",
                self.max_room_size
            ));
        }
        if shortest < SEED_ROOM_SIZE {
            return invalid(format!(
                "grid {}x{} cannot hold the {SEED_ROOM_SIZE}x{SEED_ROOM_SIZE} seed room",
                self.width, self.height
            ));
        }
        if self.max_placement_attempts == 0 || self.max_wall_samples == 0 {
            return invalid("retry budgets must be positive".to_owned());
        }
        Ok(())
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
            min_room_size: Self::DEFAULT_MIN_ROOM,
            max_room_size: Self::DEFAULT_MAX_ROOM,
            room_count: Self::DEFAULT_ROOM_COUNT,
            max_placement_attempts: Self::DEFAULT_PLACEMENT_ATTEMPTS,
            max_wall_samples: Self::DEFAULT_WALL_SAMPLES,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("invalid generation parameters: {0}")]
    InvalidParameters(String),

    /// A room could not be placed within the configured budget.
    #[error("room {room} could not be placed after {attempts} attempts")]
    Exhausted { room: u32, attempts: u32 },
}

impl GameError for GenerationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidParameters(_) => ErrorSeverity::Validation,
            Self::Exhausted { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParameters(_) => "GEN_INVALID_PARAMETERS",
            Self::Exhausted { .. } => "GEN_EXHAUSTED",
        }
    }
}

/// Which neighbour of a door candidate is floor. Determines the direction the
/// new room grows in (away from that neighbour).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FloorSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl FloorSide {
    /// Neighbour checks in priority order.
    const PRIORITY: [(FloorSide, i32, i32); 4] = [
        (FloorSide::Left, -1, 0),
        (FloorSide::Right, 1, 0),
        (FloorSide::Top, 0, -1),
        (FloorSide::Bottom, 0, 1),
    ];
}

/// Produces connected room maps from [`GenerationParams`].
#[derive(Clone, Debug, Default)]
pub struct RoomGenerator {
    params: GenerationParams,
}

impl RoomGenerator {
    /// Validates `params` up front so later calls to [`generate`](Self::generate)
    /// only fail on exhausted budgets.
    pub fn new(params: GenerationParams) -> Result<Self, GenerationError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TileGrid, GenerationError> {
        let params = &self.params;
        let mut grid = TileGrid::filled(params.dimensions(), Tile::Wall);
        grid.fill_rect(
            params.seed_room_origin(),
            SEED_ROOM_SIZE,
            SEED_ROOM_SIZE,
            Tile::Floor,
        );

        let mut carver = Carver {
            params,
            grid,
            rng,
        };
        for room in 0..params.room_count {
            carver.place_room(room)?;
        }

        let grid = carver.grid;
        tracing::debug!(
            width = params.width,
            height = params.height,
            rooms = params.room_count,
            floor_tiles = grid.floor_count(),
            "generated dungeon map"
        );
        Ok(grid)
    }
}

/// Validates `params` and generates one map.
pub fn generate<R: Rng + ?Sized>(
    params: &GenerationParams,
    rng: &mut R,
) -> Result<TileGrid, GenerationError> {
    params.validate()?;
    RoomGenerator {
        params: params.clone(),
    }
    .generate(rng)
}

struct Carver<'a, R: ?Sized> {
    params: &'a GenerationParams,
    grid: TileGrid,
    rng: &'a mut R,
}

impl<R: Rng + ?Sized> Carver<'_, R> {
    fn place_room(&mut self, room: u32) -> Result<(), GenerationError> {
        let attempts = self.params.max_placement_attempts;
        for _ in 0..attempts {
            let (door, side) = self.find_wall(room)?;
            let width = self.room_side();
            let height = self.room_side();
            let origin = self.room_origin(door, side, width, height);

            if !self.fits(origin, width, height) || !self.is_solid_wall(origin, width, height) {
                continue;
            }

            self.grid.fill_rect(origin, width, height, Tile::Floor);
            self.grid.set(door, Tile::Floor);
            return Ok(());
        }

        tracing::warn!(room, attempts, "room placement budget exhausted");
        Err(GenerationError::Exhausted { room, attempts })
    }

    /// Samples random tiles until one is wall with a floor neighbour.
    fn find_wall(&mut self, room: u32) -> Result<(Position, FloorSide), GenerationError> {
        let samples = self.params.max_wall_samples;
        for _ in 0..samples {
            let candidate = Position::new(
                self.rng.gen_range(0..self.params.width) as i32,
                self.rng.gen_range(0..self.params.height) as i32,
            );
            if let Some(side) = self.door_side(candidate) {
                return Ok((candidate, side));
            }
        }
        tracing::warn!(room, samples, "no door candidate found");
        Err(GenerationError::Exhausted {
            room,
            attempts: samples,
        })
    }

    fn door_side(&self, position: Position) -> Option<FloorSide> {
        if !self.grid.is_wall(position) {
            return None;
        }
        FloorSide::PRIORITY
            .iter()
            .find(|(_, dx, dy)| {
                self.grid
                    .is_floor(Position::new(position.x + dx, position.y + dy))
            })
            .map(|(side, _, _)| *side)
    }

    fn room_side(&mut self) -> u32 {
        let (min, max) = (self.params.min_room_size, self.params.max_room_size);
        if min == max {
            min
        } else {
            self.rng.gen_range(min..max)
        }
    }

    /// Random shift along the door edge, roughly centred on the door.
    fn door_offset(&mut self, length: u32) -> i32 {
        let length = length as i32;
        let roll: f64 = self.rng.gen_range(0.0..1.0);
        (roll * f64::from(length) - f64::from((length - 1) / 2)).floor() as i32
    }

    fn room_origin(&mut self, door: Position, side: FloorSide, width: u32, height: u32) -> Position {
        match side {
            FloorSide::Left | FloorSide::Right => {
                let y = door.y - (height / 2) as i32 + self.door_offset(height);
                let x = match side {
                    FloorSide::Left => door.x + 1,
                    _ => door.x - width as i32,
                };
                Position::new(x, y)
            }
            FloorSide::Top | FloorSide::Bottom => {
                let x = door.x - (width / 2) as i32 + self.door_offset(width);
                let y = match side {
                    FloorSide::Top => door.y + 1,
                    _ => door.y - height as i32,
                };
                Position::new(x, y)
            }
        }
    }

    /// Rooms may not touch the last row or column.
    fn fits(&self, origin: Position, width: u32, height: u32) -> bool {
        origin.x >= 0
            && origin.y >= 0
            && origin.x + (width as i32) < self.params.width as i32
            && origin.y + (height as i32) < self.params.height as i32
    }

    fn is_solid_wall(&self, origin: Position, width: u32, height: u32) -> bool {
        (origin.x..origin.x + width as i32).all(|x| {
            (origin.y..origin.y + height as i32).all(|y| self.grid.is_wall(Position::new(x, y)))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn reachable_from(grid: &TileGrid, start: Position) -> BTreeSet<Position> {
        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let next = Position::new(current.x + dx, current.y + dy);
                if grid.is_floor(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn default_map_is_connected() {
        let params = GenerationParams::default();
        for seed in 0..8 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let grid = generate(&params, &mut rng).expect("default parameters generate");

            let reachable = reachable_from(&grid, params.seed_room_origin());
            assert_eq!(
                reachable.len(),
                grid.floor_count(),
                "seed {seed}: every floor tile must be reachable from the seed room"
            );
        }
    }

    #[test]
    fn map_matches_requested_dimensions() {
        let params = GenerationParams::new(60, 40, 12, 4, 8);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = generate(&params, &mut rng).expect("valid parameters");

        assert_eq!(grid.width(), 60);
        assert_eq!(grid.height(), 40);
        assert_eq!(grid.dimensions().area(), 2400);
    }

    #[test]
    fn seed_room_is_fixed_on_the_default_grid() {
        let params = GenerationParams::default();
        assert_eq!(params.seed_room_origin(), Position::new(45, 45));

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let grid = generate(&params, &mut rng).expect("default parameters generate");
        for x in 45..55 {
            for y in 45..55 {
                assert!(grid.is_floor(Position::new(x, y)));
            }
        }
    }

    #[test]
    fn zero_rooms_leaves_only_the_seed_room() {
        let params = GenerationParams::new(100, 100, 20, 6, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let grid = generate(&params, &mut rng).expect("valid parameters");

        assert_eq!(grid.floor_count(), 100);
        assert!(
            grid.floor_positions()
                .all(|p| (45..55).contains(&p.x) && (45..55).contains(&p.y))
        );
    }

    #[test]
    fn rooms_add_floor_and_keep_the_border_solid() {
        let params = GenerationParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let grid = generate(&params, &mut rng).expect("default parameters generate");

        assert!(grid.floor_count() > 100);
        for i in 0..100 {
            for edge in [
                Position::new(i, 0),
                Position::new(0, i),
                Position::new(i, 99),
                Position::new(99, i),
            ] {
                assert!(grid.is_wall(edge), "{edge} should stay wall");
            }
        }
    }

    #[test]
    fn equal_room_bounds_fix_the_room_size() {
        let params = GenerationParams::new(40, 40, 5, 5, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let grid = generate(&params, &mut rng).expect("valid parameters");

        // Seed room plus three 5x5 rooms and their doors.
        assert_eq!(grid.floor_count(), 100 + 3 * 25 + 3);
    }

    #[test]
    fn same_seed_produces_the_same_map() {
        let params = GenerationParams::default();
        let first = generate(&params, &mut ChaCha8Rng::seed_from_u64(99)).expect("generates");
        let second = generate(&params, &mut ChaCha8Rng::seed_from_u64(99)).expect("generates");
        let other = generate(&params, &mut ChaCha8Rng::seed_from_u64(100)).expect("generates");

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn malformed_parameters_are_rejected() {
        let cases = [
            GenerationParams::new(0, 100, 20, 6, 20),
            GenerationParams::new(100, 100, 20, 0, 20),
            GenerationParams::new(100, 100, 6, 20, 20),
            GenerationParams::new(30, 100, 30, 6, 20),
            GenerationParams::new(8, 8, 4, 2, 1),
            GenerationParams::default().with_budgets(0, 10),
        ];
        for params in cases {
            let err = RoomGenerator::new(params.clone()).expect_err("parameters are invalid");
            assert!(
                matches!(err, GenerationError::InvalidParameters(_)),
                "{params:?} gave {err:?}"
            );
            assert_eq!(err.severity(), ErrorSeverity::Validation);
        }
    }

    #[test]
    fn crowded_grid_exhausts_instead_of_spinning() {
        // The seed room leaves a one-tile wall ring: nothing else fits.
        let params = GenerationParams::new(12, 12, 8, 6, 1).with_budgets(50, 1_000);
        let generator = RoomGenerator::new(params).expect("valid parameters");
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let err = generator.generate(&mut rng).expect_err("no room fits");
        assert_eq!(
            err,
            GenerationError::Exhausted {
                room: 0,
                attempts: 50
            }
        );
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "GEN_EXHAUSTED");
    }

    #[test]
    fn grid_without_walls_exhausts_the_sample_budget() {
        // A 10x10 grid is all seed room, so no wall tile can become a door.
        let params = GenerationParams::new(10, 10, 5, 2, 1).with_budgets(50, 300);
        let generator = RoomGenerator::new(params).expect("valid parameters");
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        let err = generator.generate(&mut rng).expect_err("no door candidate");
        assert_eq!(
            err,
            GenerationError::Exhausted {
                room: 0,
                attempts: 300
            }
        );
    }
}
