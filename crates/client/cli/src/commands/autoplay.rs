//! Scripted random walk through a full session.
//!
//! Useful as a smoke test: it exercises level setup, pickups, combat,
//! descending and restarts without a renderer.

use anyhow::Result;
use clap::Parser;
use game_core::Direction;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use runtime::{GameEvent, GameSession};
use serde::Serialize;

use crate::config::CliConfig;
use crate::render;

/// Play a session with random moves and report what happened
#[derive(Parser)]
pub struct Autoplay {
    /// Number of moves to make
    #[arg(short, long, default_value_t = 500)]
    steps: usize,

    /// Print the final board after the report
    #[arg(long)]
    show_board: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: ReportFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ReportFormat {
    /// Human-readable counters
    Summary,
    /// JSON object
    Json,
}

/// Counters collected over a run.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
struct RunReport {
    seed: u64,
    steps: usize,
    moves: u32,
    blocked: u32,
    weapons: u32,
    heals: u32,
    combat_rounds: u32,
    kills: u32,
    descents: u32,
    level_ups: u32,
    deaths: u32,
    victories: u32,
    final_dungeon_level: u32,
    player_level: u32,
    player_health: i32,
}

impl RunReport {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PlayerMoved { .. } => self.moves += 1,
            GameEvent::Blocked { .. } => self.blocked += 1,
            GameEvent::WeaponEquipped { .. } => self.weapons += 1,
            GameEvent::Healed { .. } => self.heals += 1,
            GameEvent::Attacked { .. } => self.combat_rounds += 1,
            GameEvent::EnemyDefeated { .. } => {
                self.combat_rounds += 1;
                self.kills += 1;
            }
            GameEvent::Descended { .. } => self.descents += 1,
            GameEvent::LevelUp { .. } => self.level_ups += 1,
            GameEvent::PlayerDied { .. } => {
                self.combat_rounds += 1;
                self.deaths += 1;
            }
            GameEvent::Victory => {
                self.combat_rounds += 1;
                self.victories += 1;
            }
            GameEvent::LevelReady { .. }
            | GameEvent::DarknessToggled { .. }
            | GameEvent::WindowResized { .. } => {}
        }
    }

    fn print(&self) {
        println!("seed              {}", self.seed);
        println!("steps             {}", self.steps);
        println!("moves / blocked   {} / {}", self.moves, self.blocked);
        println!("weapons picked    {}", self.weapons);
        println!("health items      {}", self.heals);
        println!("combat rounds     {}", self.combat_rounds);
        println!("enemies killed    {}", self.kills);
        println!("levels descended  {}", self.descents);
        println!("level ups         {}", self.level_ups);
        println!("deaths            {}", self.deaths);
        println!("victories         {}", self.victories);
        println!(
            "final state       dungeon level {}, player level {}, health {}",
            self.final_dungeon_level, self.player_level, self.player_health
        );
    }
}

impl Autoplay {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let seed = config.resolve_seed();
        let mut runtime_config = config.runtime_config()?;
        runtime_config.seed = Some(seed);

        let mut session = GameSession::new(runtime_config)?;
        let mut walker = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
        let directions = Direction::all();

        let mut report = RunReport {
            seed,
            steps: self.steps,
            ..RunReport::default()
        };
        for _ in 0..self.steps {
            let direction = directions[walker.gen_range(0..directions.len())];
            for event in session.move_player(direction)? {
                report.record(&event);
            }
        }

        let state = session.state();
        report.final_dungeon_level = state.level;
        if let Some(player) = state.player() {
            report.player_health = player.health;
            report.player_level = player.profile.as_ref().map_or(0, |profile| profile.level);
        }
        tracing::info!(
            seed,
            steps = self.steps,
            kills = report.kills,
            deaths = report.deaths,
            "autoplay finished"
        );

        match self.format {
            ReportFormat::Summary => report.print(),
            ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }
        if self.show_board {
            println!();
            println!("{}", render::render_state(state));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use game_core::Position;

    use super::*;

    #[test]
    fn report_counts_events_by_kind() {
        let mut report = RunReport::default();
        let events = [
            GameEvent::PlayerMoved {
                from: Position::new(1, 1),
                to: Position::new(2, 1),
            },
            GameEvent::Attacked {
                enemy: "enemy0".into(),
                player_roll: 3,
                enemy_roll: 9,
            },
            GameEvent::EnemyDefeated {
                enemy: "enemy0".into(),
                xp: 10,
            },
            GameEvent::PlayerDied {
                killer: "enemy1".into(),
            },
            GameEvent::LevelReady { level: 0 },
        ];
        for event in &events {
            report.record(event);
        }

        assert_eq!(report.moves, 1);
        assert_eq!(report.combat_rounds, 3);
        assert_eq!(report.kills, 1);
        assert_eq!(report.deaths, 1);
        assert_eq!(report.descents, 0);
    }
}
