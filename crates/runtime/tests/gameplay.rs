//! End-to-end gameplay scenarios driven through `GameSession`.
//!
//! Scenarios that need a particular board start from a hand-built 20×20 arena
//! (a floor area ringed by wall) via `GameSession::with_state`; the rest run on
//! generated maps with fixed seeds.

use game_content::{ContentBundle, ContentTables, GenerationError, GenerationParams};
use game_core::{
    Action, Direction, EntityId, EntityKind, EntitySpawn, ErrorSeverity, GameConfig, GameEngine,
    GameError, GameState, MapDimensions, Position, Tile, TileGrid, Viewport,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use runtime::{GameEvent, GameSession, RuntimeConfig, RuntimeError};

fn arena(rules: &GameConfig, player_at: Position, setup: &[Action]) -> GameState {
    let mut grid = TileGrid::filled(MapDimensions::new(20, 20), Tile::Wall);
    grid.fill_rect(Position::new(1, 1), 18, 18, Tile::Floor);

    let engine = GameEngine::new(rules);
    let mut state = GameState::with_grid(rules, grid);
    engine
        .execute(&mut state, &Action::set_location(EntityId::PLAYER, player_at))
        .expect("player start is floor");
    for action in setup {
        engine
            .execute(&mut state, action)
            .unwrap_or_else(|err| panic!("arena setup failed: {err}"));
    }
    state
}

fn session_with(rules: GameConfig, state: GameState) -> GameSession {
    let config = RuntimeConfig {
        rules,
        ..RuntimeConfig::default()
    };
    GameSession::with_state(config, state, ChaCha8Rng::seed_from_u64(7))
        .expect("arena is consistent")
}

fn spawn(id: &str, kind: EntityKind, health: i32, attack: i32, x: i32, y: i32) -> Action {
    Action::AddEntity(EntitySpawn::new(id, kind, health, attack, Position::new(x, y)))
}

/// Rules with attack rolls pinned to the attack value.
fn exact_rolls() -> GameConfig {
    GameConfig {
        attack_variance: 0,
        ..GameConfig::default()
    }
}

fn random_walk(seed: u64, steps: usize) -> (Vec<GameEvent>, GameState) {
    let mut session =
        GameSession::new(RuntimeConfig::default().with_seed(seed)).expect("session starts");
    let mut walker = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);
    let directions = Direction::all();

    let mut log = Vec::new();
    for _ in 0..steps {
        let direction = directions[walker.gen_range(0..directions.len())];
        log.extend(session.move_player(direction).expect("move resolves"));
    }
    (log, session.snapshot())
}

#[test]
fn fresh_session_populates_level_zero() {
    let session =
        GameSession::new(RuntimeConfig::default().with_seed(1)).expect("session starts");
    let state = session.state();

    assert_eq!(state.level, 0);
    assert_eq!(state.grid().dimensions(), MapDimensions::new(100, 100));
    assert!(state.darkness);
    assert_eq!(state.viewport, Viewport::new(500, 500));

    let entities = &state.entities;
    assert_eq!(entities.len(), 13);
    assert_eq!(entities.count_kind(EntityKind::Player), 1);
    assert_eq!(entities.count_kind(EntityKind::Weapon), 1);
    assert_eq!(entities.count_kind(EntityKind::HealthItem), 5);
    assert_eq!(entities.count_kind(EntityKind::Enemy), 5);
    assert_eq!(entities.count_kind(EntityKind::Exit), 1);
    assert_eq!(entities.count_kind(EntityKind::Boss), 0);

    let weapon = state
        .entity(&"brass knuckles".into())
        .expect("level 0 weapon");
    assert_eq!(weapon.attack, 7);
    let enemy = state.entity(&"enemy0".into()).expect("enemy0");
    assert_eq!((enemy.health, enemy.attack), (20, 12));
    let item = state.entity(&"health4".into()).expect("health4");
    assert_eq!(item.health, 20);

    state.check_integrity().expect("fresh level is consistent");
}

#[test]
fn same_seed_replays_the_same_trajectory() {
    let (first_log, first_state) = random_walk(5, 300);
    let (second_log, second_state) = random_walk(5, 300);

    assert_eq!(first_log, second_log);
    assert_eq!(first_state, second_state);
}

#[test]
fn long_random_walks_keep_the_board_consistent() {
    let mut session =
        GameSession::new(RuntimeConfig::default().with_seed(21)).expect("session starts");
    let mut walker = ChaCha8Rng::seed_from_u64(22);
    let directions = Direction::all();

    for _ in 0..2_000 {
        let direction = directions[walker.gen_range(0..directions.len())];
        session.move_player(direction).expect("move resolves");
        session
            .state()
            .check_integrity()
            .expect("occupancy tracks every entity");
    }
}

#[test]
fn walls_block_without_changing_state() {
    let rules = GameConfig::default();
    let mut session = session_with(rules.clone(), arena(&rules, Position::new(1, 1), &[]));
    let before = session.snapshot();

    let events = session.move_player(Direction::Left).expect("move resolves");

    assert_eq!(
        events,
        vec![GameEvent::Blocked {
            target: Position::new(0, 1)
        }]
    );
    assert_eq!(session.state(), &before);
}

#[test]
fn grid_edges_block() {
    let rules = GameConfig::default();
    let grid = TileGrid::filled(MapDimensions::new(5, 5), Tile::Floor);
    let state = GameState::with_grid(&rules, grid);
    let mut session = session_with(rules, state);

    let events = session.move_player(Direction::Up).expect("move resolves");
    assert_eq!(
        events,
        vec![GameEvent::Blocked {
            target: Position::new(0, -1)
        }]
    );
    assert_eq!(
        session.state().player().map(|p| p.position),
        Some(Position::ORIGIN)
    );
}

#[test]
fn empty_floor_moves_the_player() {
    let rules = GameConfig::default();
    let mut session = session_with(rules.clone(), arena(&rules, Position::new(5, 5), &[]));

    let events = session.move_player(Direction::Right).expect("move resolves");

    assert_eq!(
        events,
        vec![GameEvent::PlayerMoved {
            from: Position::new(5, 5),
            to: Position::new(6, 5),
        }]
    );
    let state = session.state();
    assert!(state.occupancy().occupant(&Position::new(5, 5)).is_none());
    assert_eq!(
        state.occupancy().occupant(&Position::new(6, 5)),
        Some(&EntityId::player())
    );
}

#[test]
fn weapon_pickup_equips_and_clears_the_tile() {
    let rules = GameConfig::default();
    let state = arena(
        &rules,
        Position::new(5, 5),
        &[spawn("katana", EntityKind::Weapon, 0, 16, 6, 5)],
    );
    let mut session = session_with(rules, state);

    let events = session.move_player(Direction::Right).expect("move resolves");

    assert_eq!(
        events,
        vec![
            GameEvent::WeaponEquipped {
                weapon: "katana".to_owned(),
                attack_bonus: 16,
            },
            GameEvent::PlayerMoved {
                from: Position::new(5, 5),
                to: Position::new(6, 5),
            },
        ]
    );

    let state = session.state();
    let player = state.player().expect("player");
    assert_eq!(player.attack, 23);
    assert_eq!(player.position, Position::new(6, 5));
    let profile = player.profile.as_ref().expect("profile");
    assert_eq!(profile.weapon, "katana");
    assert_eq!(profile.inventory, vec!["katana".to_owned()]);
    assert!(state.entity(&"katana".into()).is_none());
    assert_eq!(state.occupancy().len(), 1);
}

#[test]
fn health_items_heal_and_are_consumed() {
    let rules = GameConfig::default();
    let state = arena(
        &rules,
        Position::new(5, 5),
        &[
            Action::damage(EntityId::PLAYER, 50),
            spawn("health0", EntityKind::HealthItem, 20, 0, 5, 6),
        ],
    );
    let mut session = session_with(rules, state);

    let events = session.move_player(Direction::Down).expect("move resolves");

    assert_eq!(
        events[0],
        GameEvent::Healed {
            amount: 20,
            health: 70
        }
    );
    let state = session.state();
    assert!(state.entity(&"health0".into()).is_none());
    assert_eq!(
        state.player().map(|p| p.position),
        Some(Position::new(5, 6))
    );
}

#[test]
fn killing_blow_grants_xp_and_removes_the_enemy() {
    let rules = GameConfig {
        player_health: 20,
        player_attack: 12,
        ..exact_rolls()
    };
    let state = arena(
        &rules,
        Position::new(5, 5),
        &[spawn("enemy0", EntityKind::Enemy, 10, 12, 6, 5)],
    );
    let mut session = session_with(rules, state);

    let events = session.move_player(Direction::Right).expect("move resolves");

    assert_eq!(
        events,
        vec![GameEvent::EnemyDefeated {
            enemy: "enemy0".into(),
            xp: 10
        }]
    );
    let state = session.state();
    assert!(state.entity(&"enemy0".into()).is_none());
    assert!(state.occupancy().occupant(&Position::new(6, 5)).is_none());
    assert_eq!(state.player().map(|p| p.position), Some(Position::new(5, 5)));
    assert_eq!(state.player_profile().map(|p| p.xp_to_next_level), Some(50));
}

#[test]
fn xp_overshoot_triggers_a_level_up() {
    let rules = GameConfig {
        enemy_xp: 70,
        ..exact_rolls()
    };
    let state = arena(
        &rules,
        Position::new(5, 5),
        &[spawn("enemy0", EntityKind::Enemy, 5, 1, 6, 5)],
    );
    let mut session = session_with(rules, state);

    let events = session.move_player(Direction::Right).expect("move resolves");

    assert_eq!(
        events,
        vec![
            GameEvent::EnemyDefeated {
                enemy: "enemy0".into(),
                xp: 70
            },
            GameEvent::LevelUp { level: 1 },
        ]
    );
    let player = session.state().player().expect("player");
    assert_eq!(player.attack, 7 + 12);
    assert_eq!(player.health, 100 + 20);
    let profile = player.profile.as_ref().expect("profile");
    assert_eq!(profile.level, 1);
    assert_eq!(profile.xp_to_next_level, 120);
}

#[test]
fn surviving_combatants_trade_damage() {
    let rules = exact_rolls();
    let state = arena(
        &rules,
        Position::new(5, 5),
        &[spawn("enemy0", EntityKind::Enemy, 50, 12, 6, 5)],
    );
    let mut session = session_with(rules, state);

    let events = session.move_player(Direction::Right).expect("move resolves");

    assert_eq!(
        events,
        vec![GameEvent::Attacked {
            enemy: "enemy0".into(),
            player_roll: 7,
            enemy_roll: 12,
        }]
    );
    let state = session.state();
    assert_eq!(state.entity(&"enemy0".into()).map(|e| e.health), Some(43));
    assert_eq!(state.player().map(|p| p.health), Some(88));
    assert_eq!(state.player().map(|p| p.position), Some(Position::new(5, 5)));
}

#[test]
fn lethal_counter_attack_restarts_the_run() {
    let rules = GameConfig {
        player_health: 10,
        ..exact_rolls()
    };
    let state = arena(
        &rules,
        Position::new(5, 5),
        &[
            Action::IncreaseLevel,
            Action::IncreaseLevel,
            spawn("enemy0", EntityKind::Enemy, 50, 12, 6, 5),
        ],
    );
    let mut session = session_with(rules, state);

    let events = session.move_player(Direction::Right).expect("move resolves");

    assert_eq!(
        events,
        vec![
            GameEvent::PlayerDied {
                killer: "enemy0".into()
            },
            GameEvent::LevelReady { level: 0 },
        ]
    );
    assert!(events[0].ends_run());

    let state = session.state();
    assert_eq!(state.level, 0);
    assert_eq!(state.grid().dimensions(), MapDimensions::new(100, 100));
    assert_eq!(state.entities.len(), 13);
    assert_eq!(state.player().map(|p| p.health), Some(10));
    state.check_integrity().expect("restarted level is consistent");
}

#[test]
fn defeating_the_boss_is_a_victory() {
    let rules = exact_rolls();
    let state = arena(
        &rules,
        Position::new(8, 6),
        &[Action::AddBoss {
            attack: 1,
            health: 5,
            location: Position::new(6, 5),
        }],
    );
    let mut session = session_with(rules, state);

    // (7, 6) is the boss's lower-right tile.
    let events = session.move_player(Direction::Left).expect("move resolves");

    assert_eq!(
        events,
        vec![GameEvent::Victory, GameEvent::LevelReady { level: 0 }]
    );
    let state = session.state();
    assert_eq!(state.entities.count_kind(EntityKind::Boss), 0);
    assert_eq!(state.entities.len(), 13);
}

#[test]
fn the_exit_leads_to_a_harder_level() {
    let rules = GameConfig::default();
    let state = arena(
        &rules,
        Position::new(5, 5),
        &[
            Action::damage(EntityId::PLAYER, 40),
            Action::switch_weapon("katana", 16),
            spawn("exit", EntityKind::Exit, 0, 0, 6, 5),
        ],
    );
    let mut session = session_with(rules, state);

    let events = session.move_player(Direction::Right).expect("move resolves");

    assert_eq!(events, vec![GameEvent::Descended { level: 1 }]);
    let state = session.state();
    assert_eq!(state.level, 1);
    assert_eq!(state.grid().dimensions(), MapDimensions::new(100, 100));

    let player = state.player().expect("player survives the descent");
    assert_eq!(player.health, 60);
    assert_eq!(player.attack, 23);

    assert!(state.entity(&"serrated dagger".into()).is_some());
    assert_eq!(state.entities.count_kind(EntityKind::Exit), 1);
    let enemy = state.entity(&"enemy3".into()).expect("enemy3");
    assert_eq!((enemy.health, enemy.attack), (40, 24));
    state.check_integrity().expect("new level is consistent");
}

#[test]
fn the_final_level_holds_the_boss_instead_of_an_exit() {
    let rules = GameConfig::default();
    let state = arena(
        &rules,
        Position::new(5, 5),
        &[
            Action::IncreaseLevel,
            Action::IncreaseLevel,
            Action::IncreaseLevel,
            spawn("exit", EntityKind::Exit, 0, 0, 6, 5),
        ],
    );
    let mut session = session_with(rules, state);

    session.move_player(Direction::Right).expect("move resolves");

    let state = session.state();
    assert_eq!(state.level, 4);
    assert_eq!(state.entities.count_kind(EntityKind::Exit), 0);
    assert_eq!(state.entities.count_kind(EntityKind::Boss), 1);

    let boss = state.entity(&EntityId::boss()).expect("boss");
    assert_eq!((boss.health, boss.attack), (500, 125));
    assert_eq!(
        state.occupancy().positions_of(&EntityId::boss()).count(),
        4
    );
    assert!(state.entity(&"large trout".into()).is_some());
    state.check_integrity().expect("boss footprint sits on floor");
}

#[test]
fn darkness_toggles_and_window_size_is_recorded() {
    let mut session =
        GameSession::new(RuntimeConfig::default().with_seed(3)).expect("session starts");

    assert_eq!(
        session.toggle_darkness().expect("toggle"),
        vec![GameEvent::DarknessToggled { darkness: false }]
    );
    assert_eq!(
        session.toggle_darkness().expect("toggle"),
        vec![GameEvent::DarknessToggled { darkness: true }]
    );

    session.set_window_size(800, 600).expect("resize");
    assert_eq!(session.state().viewport, Viewport::new(800, 600));
}

#[test]
fn invalid_configuration_is_rejected_up_front() {
    let no_weapons = RuntimeConfig {
        tables: ContentTables::new(Vec::new()),
        ..RuntimeConfig::default()
    };
    let err = GameSession::new(no_weapons).err().expect("empty weapon table");
    assert!(matches!(err, RuntimeError::InvalidConfig(_)));
    assert_eq!(err.severity(), ErrorSeverity::Validation);

    let bad_map = RuntimeConfig {
        generation: GenerationParams::new(100, 100, 4, 8, 20),
        ..RuntimeConfig::default()
    };
    let err = GameSession::new(bad_map).err().expect("min room exceeds max");
    assert!(matches!(
        err,
        RuntimeError::Generation(GenerationError::InvalidParameters(_))
    ));
}

#[test]
fn crowded_maps_report_spawn_exhaustion() {
    // A 10x10 grid is exactly the seed room: 100 tiles for 123 entities.
    let config = RuntimeConfig {
        rules: GameConfig {
            items_per_level: 60,
            ..GameConfig::default()
        },
        generation: GenerationParams::new(10, 10, 5, 2, 0),
        max_spawn_attempts: 2_000,
        ..RuntimeConfig::default()
    }
    .with_seed(2);

    let err = GameSession::new(config).err().expect("board overflows");
    assert!(matches!(err, RuntimeError::SpawnExhausted { .. }));
    assert!(err.severity().is_recoverable());
}

#[test]
fn content_bundles_become_runtime_configs() {
    let bundle = ContentBundle {
        rules: exact_rolls(),
        ..ContentBundle::default()
    };
    let config = RuntimeConfig::from(bundle).with_seed(11);

    assert_eq!(config.seed, Some(11));
    assert_eq!(config.rules.attack_variance, 0);
    assert_eq!(config.max_spawn_attempts, RuntimeConfig::DEFAULT_SPAWN_ATTEMPTS);
}
