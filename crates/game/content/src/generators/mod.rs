//! Procedural map generators.

pub mod rooms;

pub use rooms::{GenerationError, GenerationParams, RoomGenerator, SEED_ROOM_SIZE, generate};
