//! Runtime orchestration for the dungeon crawler.
//!
//! This crate sequences rules-engine actions into whole game flows: level
//! setup, movement, pickups, combat, descending, death and victory. Consumers
//! embed a [`GameSession`], feed it intents and read back [`GameEvent`]s and
//! state snapshots.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator
//! - [`api`] exposes the error types downstream clients interact with
//! - [`combat`] and [`spawn`] hold the random rules the session draws on
//! - [`events`] describes intent outcomes
pub mod api;
pub mod combat;
pub mod config;
pub mod events;
pub mod session;
pub mod spawn;

pub use api::{Result, RuntimeError};
pub use combat::{CombatOutcome, CombatRound, roll_attack};
pub use config::RuntimeConfig;
pub use events::GameEvent;
pub use session::GameSession;
