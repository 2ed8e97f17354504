//! State transition engine.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]: it maps
//! `(state, action)` to the next state. Reduction is total and side-effect
//! free; a rejected action leaves the caller's snapshot exactly as it was and
//! reports why through [`ReduceError`].

mod errors;
mod reducer;

pub use errors::ReduceError;
pub use reducer::{EntitiesReducer, StateReducer, WorldReducer};

use crate::action::Action;
use crate::config::{GameConfig, HealRule};
use crate::state::{EntityId, EntityKind, EntityState, GameState};

/// Applies [`Action`]s to [`GameState`] snapshots under a fixed rule set.
#[derive(Clone, Copy, Debug)]
pub struct GameEngine<'a> {
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    /// Creates a new engine with the given rules.
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Computes the state that follows `state` under `action`.
    ///
    /// `state` itself is never modified; the returned snapshot shares every
    /// part the action did not touch.
    pub fn reduce(&self, state: &GameState, action: &Action) -> Result<GameState, ReduceError> {
        let mut next = state.clone();
        self.apply(&mut next, action)?;
        Ok(next)
    }

    /// Replaces `state` with its successor. On error `state` is unchanged.
    pub fn execute(&self, state: &mut GameState, action: &Action) -> Result<(), ReduceError> {
        *state = self.reduce(state, action)?;
        Ok(())
    }

    fn apply(&self, state: &mut GameState, action: &Action) -> Result<(), ReduceError> {
        let name = action.as_snake_case();
        let mut reducer = StateReducer::new(state);

        match action {
            Action::Damage { entity, value } => {
                let target = reducer
                    .entities()
                    .get_mut(entity)
                    .ok_or_else(|| ReduceError::unknown(name, entity))?;
                target.health -= value;
            }

            Action::Heal { entity, value } => {
                let baseline = match self.config.heal_rule {
                    HealRule::PlayerRelative => reducer.state().player().map(|p| p.health),
                    HealRule::TargetRelative => reducer.state().entity(entity).map(|e| e.health),
                };
                let target = reducer
                    .entities()
                    .get_mut(entity)
                    .ok_or_else(|| ReduceError::unknown(name, entity))?;
                let baseline =
                    baseline.ok_or_else(|| ReduceError::unknown(name, &EntityId::player()))?;
                target.health = baseline + value;
            }

            Action::SwitchWeapon { weapon, attack } => {
                let player = player_or_err(&mut reducer, name)?;
                player.attack += attack;
                if let Some(profile) = player.profile.as_mut() {
                    profile.weapon = weapon.clone();
                    profile.inventory.push(weapon.clone());
                }
            }

            Action::Move { entity, vector } => {
                let origin = reducer
                    .state()
                    .entity(entity)
                    .map(|e| e.position)
                    .ok_or_else(|| ReduceError::unknown(name, entity))?;
                reducer.relocate(name, entity, origin.translate(*vector))?;
            }

            Action::SetLocation { entity, location } => {
                reducer.relocate(name, entity, *location)?;
            }

            Action::AddEntity(spawn) => {
                let entity = EntityState::new(spawn.kind, spawn.health, spawn.attack, spawn.location);
                reducer.spawn(name, spawn.id.clone(), entity)?;
            }

            Action::RemoveEntity { entity } => {
                reducer.despawn(name, entity)?;
            }

            Action::ResetBoard => {
                let player = reducer
                    .state()
                    .player()
                    .cloned()
                    .ok_or_else(|| ReduceError::unknown(name, &EntityId::player()))?;
                let cells = player.footprint();
                reducer
                    .world()
                    .reset_occupancy(&EntityId::player(), &cells);
                reducer.entities().retain_player(player);
            }

            Action::SetMap { grid } => {
                reducer.world().set_grid(grid.clone());
            }

            Action::IncreaseLevel => {
                reducer.state_mut().level += 1;
            }

            Action::ResetLevel => {
                reducer.state_mut().level = 0;
            }

            Action::SetWindowSize { viewport } => {
                reducer.state_mut().viewport = *viewport;
            }

            Action::GainXp { amount } => {
                let player = player_or_err(&mut reducer, name)?;
                if let Some(profile) = player.profile.as_mut() {
                    profile.xp_to_next_level -= amount;
                }
            }

            Action::LevelUp(level_up) => {
                let player = player_or_err(&mut reducer, name)?;
                player.attack += level_up.attack;
                player.health += level_up.health;
                if let Some(profile) = player.profile.as_mut() {
                    profile.xp_to_next_level = level_up.next_threshold;
                    profile.level += 1;
                }
            }

            Action::ResetMap { grid } => {
                *reducer.state_mut() = GameState::with_grid(self.config, grid.clone());
            }

            Action::AddBoss {
                attack,
                health,
                location,
            } => {
                let boss = EntityState::new(EntityKind::Boss, *health, *attack, *location);
                reducer.spawn(name, EntityId::boss(), boss)?;
            }

            Action::ToggleDarkness => {
                let state = reducer.state_mut();
                state.darkness = !state.darkness;
            }
        }

        Ok(())
    }
}

fn player_or_err<'r>(
    reducer: &'r mut StateReducer<'_>,
    action: &'static str,
) -> Result<&'r mut EntityState, ReduceError> {
    reducer
        .entities()
        .player_mut()
        .ok_or_else(|| ReduceError::unknown(action, &EntityId::player()))
}
