//! Random placement of entities on the current map.

use game_core::{EntityKind, EntityState, GameState, Position};
use rand::Rng;

use crate::api::{Result, RuntimeError};

/// Rejection-samples an origin whose whole footprint for `kind` is vacant
/// floor.
///
/// Gives up after `attempts` draws, or immediately when no grid is installed.
pub fn find_vacant<R: Rng + ?Sized>(
    state: &GameState,
    kind: EntityKind,
    rng: &mut R,
    attempts: u32,
) -> Result<Position> {
    let grid = state.grid();
    if !grid.is_empty() {
        for _ in 0..attempts {
            let origin = Position::new(
                rng.gen_range(0..grid.width()) as i32,
                rng.gen_range(0..grid.height()) as i32,
            );
            let footprint = EntityState::footprint_at(kind, origin);
            if footprint
                .iter()
                .all(|cell| state.world.is_vacant_floor(*cell))
            {
                return Ok(origin);
            }
        }
    }

    tracing::warn!(%kind, attempts, "no vacant floor found");
    Err(RuntimeError::SpawnExhausted { kind, attempts })
}
