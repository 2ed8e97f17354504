//! Plain-text rendering of maps and boards.
use game_core::{EntityKind, GameState, Position, Tile, TileGrid};

const WALL: char = '#';
const FLOOR: char = '.';

fn tile_glyph(tile: Tile) -> char {
    match tile {
        Tile::Wall => WALL,
        Tile::Floor => FLOOR,
    }
}

pub fn entity_glyph(kind: EntityKind) -> char {
    match kind {
        EntityKind::Player => '@',
        EntityKind::Enemy => 'e',
        EntityKind::Boss => 'B',
        EntityKind::Weapon => '/',
        EntityKind::HealthItem => '+',
        EntityKind::Exit => '>',
    }
}

/// One string per row, top row first.
pub fn grid_rows(grid: &TileGrid) -> Vec<String> {
    (0..grid.height() as i32)
        .map(|y| {
            (0..grid.width() as i32)
                .map(|x| grid.tile(Position::new(x, y)).map_or(WALL, tile_glyph))
                .collect()
        })
        .collect()
}

pub fn render_grid(grid: &TileGrid) -> String {
    grid_rows(grid).join("\n")
}

/// Renders the grid with every entity drawn over its tiles.
pub fn render_state(state: &GameState) -> String {
    let grid = state.grid();
    (0..grid.height() as i32)
        .map(|y| {
            (0..grid.width() as i32)
                .map(|x| {
                    let position = Position::new(x, y);
                    match state.entity_at(position) {
                        Some((_, entity)) => entity_glyph(entity.kind),
                        None => grid.tile(position).map_or(WALL, tile_glyph),
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
