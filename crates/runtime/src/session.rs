//! Game orchestration.
//!
//! A [`GameSession`] owns the authoritative [`GameState`] and turns player
//! intents into sequences of engine actions: level setup, movement, pickups,
//! combat, descending and restarting. Every random decision (maps, spawn
//! points, attack rolls) is drawn from the session RNG, so a seeded session
//! replays identically.

use game_content::RoomGenerator;
use game_core::{
    Action, EntityId, EntityKind, EntitySpawn, EntityState, GameEngine, GameState, LevelUp,
    Position, StateError, Vector, Viewport,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::api::{Result, RuntimeError};
use crate::combat::{CombatOutcome, CombatRound};
use crate::config::RuntimeConfig;
use crate::events::GameEvent;
use crate::spawn;

pub struct GameSession<R = ChaCha8Rng> {
    config: RuntimeConfig,
    generator: RoomGenerator,
    state: GameState,
    rng: R,
    seed: Option<u64>,
}

impl GameSession<ChaCha8Rng> {
    /// Starts a session on a freshly generated level 0.
    ///
    /// Uses `config.seed` when set, otherwise draws a random seed; either way
    /// the seed is logged and available through [`seed`](Self::seed).
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(seed, "starting game session");
        let mut session = Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))?;
        session.seed = Some(seed);
        Ok(session)
    }
}

impl<R: Rng> GameSession<R> {
    /// Starts a session driven by the given RNG.
    pub fn with_rng(config: RuntimeConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let generator = RoomGenerator::new(config.generation.clone())?;
        let state = GameState::new(&config.rules);
        let mut session = Self {
            config,
            generator,
            state,
            rng,
            seed: None,
        };
        session.setup_level()?;
        Ok(session)
    }

    /// Resumes from a prepared state without generating a level.
    pub fn with_state(config: RuntimeConfig, state: GameState, rng: R) -> Result<Self> {
        config.validate()?;
        state.check_integrity()?;
        let generator = RoomGenerator::new(config.generation.clone())?;
        Ok(Self {
            config,
            generator,
            state,
            rng,
            seed: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Cheap copy of the current state; later intents never alter it.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Seed the session RNG was created from, when known.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Discards the current run and starts over on a new level 0 map.
    ///
    /// The viewport survives the restart; everything else is reset.
    pub fn setup_level(&mut self) -> Result<Vec<GameEvent>> {
        let viewport = self.state.viewport;
        let grid = self.generator.generate(&mut self.rng)?;
        self.apply(Action::reset_map(grid))?;
        self.apply(Action::SetWindowSize { viewport })?;
        self.populate()?;

        tracing::info!(
            level = self.state.level,
            entities = self.state.entities.len(),
            "level ready"
        );
        Ok(vec![GameEvent::LevelReady {
            level: self.state.level,
        }])
    }

    /// Moves the player one step, resolving whatever occupies the target.
    pub fn move_player(&mut self, movement: impl Into<Vector>) -> Result<Vec<GameEvent>> {
        let mut events = Vec::new();
        self.resolve_move(movement.into(), &mut events)?;
        self.check_level_up(&mut events)?;
        self.debug_check();
        Ok(events)
    }

    pub fn toggle_darkness(&mut self) -> Result<Vec<GameEvent>> {
        self.apply(Action::ToggleDarkness)?;
        Ok(vec![GameEvent::DarknessToggled {
            darkness: self.state.darkness,
        }])
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) -> Result<Vec<GameEvent>> {
        let viewport = Viewport::new(width, height);
        self.apply(Action::SetWindowSize { viewport })?;
        Ok(vec![GameEvent::WindowResized { viewport }])
    }

    fn apply(&mut self, action: Action) -> Result<()> {
        tracing::trace!(action = action.as_snake_case(), "applying action");
        GameEngine::new(&self.config.rules).execute(&mut self.state, &action)?;
        Ok(())
    }

    fn vacant(&mut self, kind: EntityKind) -> Result<Position> {
        spawn::find_vacant(
            &self.state,
            kind,
            &mut self.rng,
            self.config.max_spawn_attempts,
        )
    }

    fn place_player(&mut self) -> Result<()> {
        let at = self.vacant(EntityKind::Player)?;
        self.apply(Action::set_location(EntityId::PLAYER, at))
    }

    fn add(&mut self, id: impl Into<EntityId>, kind: EntityKind, health: i32, attack: i32) -> Result<()> {
        let at = self.vacant(kind)?;
        self.apply(Action::AddEntity(EntitySpawn::new(id, kind, health, attack, at)))
    }

    /// Places the player, this level's weapon, health items, enemies and
    /// either the exit or the boss.
    fn populate(&mut self) -> Result<()> {
        let level = self.state.level;
        self.place_player()?;

        let weapon = self
            .config
            .tables
            .weapon_for_level(level)
            .cloned()
            .ok_or_else(|| RuntimeError::InvalidConfig("weapon table is empty".to_owned()))?;
        self.add(weapon.name.as_str(), EntityKind::Weapon, 0, weapon.attack)?;

        let rules = &self.config.rules;
        let (enemy_health, enemy_attack) = rules.enemy_stats(level);
        let item_value = rules.health_item_value;
        for i in 0..rules.items_per_level {
            self.add(format!("health{i}"), EntityKind::HealthItem, item_value, 0)?;
            self.add(format!("enemy{i}"), EntityKind::Enemy, enemy_health, enemy_attack)?;
        }

        let rules = &self.config.rules;
        if level < rules.final_dungeon_level {
            self.add("exit", EntityKind::Exit, 0, 0)?;
        } else {
            let (attack, health) = (rules.boss_attack, rules.boss_health);
            let location = self.vacant(EntityKind::Boss)?;
            self.apply(Action::AddBoss {
                attack,
                health,
                location,
            })?;
        }
        Ok(())
    }

    fn resolve_move(&mut self, vector: Vector, events: &mut Vec<GameEvent>) -> Result<()> {
        let player = self.state.player().ok_or(StateError::PlayerMissing)?;
        let from = player.position;
        let target = from.translate(vector);

        if !self.state.grid().is_floor(target) {
            events.push(GameEvent::Blocked { target });
            return Ok(());
        }

        let Some((id, entity)) = self
            .state
            .entity_at(target)
            .map(|(id, entity)| (id.clone(), entity.clone()))
        else {
            self.step(vector, from, target, events)?;
            return Ok(());
        };

        match entity.kind {
            EntityKind::Player => {}
            EntityKind::Weapon => {
                self.apply(Action::switch_weapon(id.as_str(), entity.attack))?;
                self.apply(Action::remove_entity(id.clone()))?;
                tracing::info!(weapon = %id, attack_bonus = entity.attack, "weapon equipped");
                events.push(GameEvent::WeaponEquipped {
                    weapon: id.to_string(),
                    attack_bonus: entity.attack,
                });
                self.step(vector, from, target, events)?;
            }
            EntityKind::HealthItem => {
                self.apply(Action::heal(EntityId::PLAYER, entity.health))?;
                self.apply(Action::remove_entity(id))?;
                let health = self.state.player().map_or(0, |player| player.health);
                events.push(GameEvent::Healed {
                    amount: entity.health,
                    health,
                });
                self.step(vector, from, target, events)?;
            }
            EntityKind::Enemy | EntityKind::Boss => self.fight(id, &entity, events)?,
            EntityKind::Exit => self.descend(events)?,
        }
        Ok(())
    }

    fn step(
        &mut self,
        vector: Vector,
        from: Position,
        to: Position,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        self.apply(Action::move_by(EntityId::PLAYER, vector))?;
        events.push(GameEvent::PlayerMoved { from, to });
        Ok(())
    }

    /// One combat round against `enemy`. The player never moves here.
    fn fight(
        &mut self,
        id: EntityId,
        enemy: &EntityState,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let player = self.state.player().ok_or(StateError::PlayerMissing)?;
        let (player_health, player_attack) = (player.health, player.attack);
        let round = CombatRound::roll(
            &mut self.rng,
            player_attack,
            enemy.attack,
            self.config.rules.attack_variance,
        );
        tracing::debug!(
            enemy = %id,
            player_roll = round.player_roll,
            enemy_roll = round.enemy_roll,
            "combat round"
        );

        match round.outcome(player_health, enemy.health) {
            CombatOutcome::PlayerDies => {
                tracing::info!(killer = %id, level = self.state.level, "player died");
                events.push(GameEvent::PlayerDied { killer: id });
                events.extend(self.setup_level()?);
            }
            CombatOutcome::Exchange => {
                self.apply(Action::damage(id.clone(), round.player_roll))?;
                self.apply(Action::damage(EntityId::PLAYER, round.enemy_roll))?;
                events.push(GameEvent::Attacked {
                    enemy: id,
                    player_roll: round.player_roll,
                    enemy_roll: round.enemy_roll,
                });
            }
            CombatOutcome::EnemyDies if enemy.kind == EntityKind::Boss => {
                tracing::info!(level = self.state.level, "boss defeated");
                events.push(GameEvent::Victory);
                events.extend(self.setup_level()?);
            }
            CombatOutcome::EnemyDies => {
                let xp = self.config.rules.kill_xp(self.state.level);
                self.apply(Action::GainXp { amount: xp })?;
                self.apply(Action::remove_entity(id.clone()))?;
                events.push(GameEvent::EnemyDefeated { enemy: id, xp });
            }
        }
        Ok(())
    }

    /// Takes the exit: new map, same player, next dungeon level.
    fn descend(&mut self, events: &mut Vec<GameEvent>) -> Result<()> {
        self.apply(Action::ResetBoard)?;
        let grid = self.generator.generate(&mut self.rng)?;
        self.apply(Action::set_map(grid))?;
        self.place_player()?;
        self.apply(Action::IncreaseLevel)?;
        self.populate()?;

        let level = self.state.level;
        tracing::info!(level, "descended");
        events.push(GameEvent::Descended { level });
        Ok(())
    }

    fn check_level_up(&mut self, events: &mut Vec<GameEvent>) -> Result<()> {
        while let Some(profile) = self.state.player_profile() {
            if profile.xp_to_next_level > 0 {
                break;
            }
            let (attack, health, next_threshold) =
                self.config.rules.level_up_deltas(profile.level);
            self.apply(Action::LevelUp(LevelUp::new(attack, health, next_threshold)))?;

            let level = self.state.player_profile().map_or(0, |profile| profile.level);
            tracing::info!(level, "player levelled up");
            events.push(GameEvent::LevelUp { level });
        }
        Ok(())
    }

    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            let integrity = self.state.check_integrity();
            debug_assert!(integrity.is_ok(), "session state drifted: {integrity:?}");
        }
    }
}
