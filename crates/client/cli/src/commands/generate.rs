//! Generate a single map and print it.

use anyhow::Result;
use clap::Parser;
use game_content::RoomGenerator;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::CliConfig;
use crate::render;

/// Generate one dungeon map
#[derive(Parser)]
pub struct Generate {
    /// Grid width (defaults to the configured generation parameters)
    #[arg(long)]
    width: Option<u32>,

    /// Grid height
    #[arg(long)]
    height: Option<u32>,

    /// Smallest room side
    #[arg(long)]
    min_room: Option<u32>,

    /// Largest room side (exclusive)
    #[arg(long)]
    max_room: Option<u32>,

    /// Rooms to carve besides the seed room
    #[arg(long)]
    rooms: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "ascii")]
    format: MapFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum MapFormat {
    /// `#` for wall, `.` for floor
    Ascii,
    /// JSON object with the rows and some statistics
    Json,
}

#[derive(Serialize)]
struct MapReport {
    seed: u64,
    width: u32,
    height: u32,
    floor_tiles: usize,
    rows: Vec<String>,
}

impl Generate {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let mut params = config.content()?.generation;
        params.width = self.width.unwrap_or(params.width);
        params.height = self.height.unwrap_or(params.height);
        params.min_room_size = self.min_room.unwrap_or(params.min_room_size);
        params.max_room_size = self.max_room.unwrap_or(params.max_room_size);
        params.room_count = self.rooms.unwrap_or(params.room_count);

        let generator = RoomGenerator::new(params)?;
        let seed = config.resolve_seed();
        let grid = generator.generate(&mut ChaCha8Rng::seed_from_u64(seed))?;
        tracing::info!(
            seed,
            width = grid.width(),
            height = grid.height(),
            floor_tiles = grid.floor_count(),
            "map generated"
        );

        match self.format {
            MapFormat::Ascii => println!("{}", render::render_grid(&grid)),
            MapFormat::Json => {
                let report = MapReport {
                    seed,
                    width: grid.width(),
                    height: grid.height(),
                    floor_tiles: grid.floor_count(),
                    rows: render::grid_rows(&grid),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Ok(())
    }
}
