//! Outcomes reported by session intents.
//!
//! Events describe what an intent did in game terms so presentation layers
//! (notifications, logs, replays) never re-derive the rules from state diffs.

use game_core::{EntityId, Position, Viewport};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh dungeon was generated and populated.
    LevelReady { level: u32 },

    PlayerMoved { from: Position, to: Position },

    /// The move target was a wall or off the grid; nothing changed.
    Blocked { target: Position },

    WeaponEquipped { weapon: String, attack_bonus: i32 },

    Healed { amount: i32, health: i32 },

    /// Both sides survived an exchange of blows.
    Attacked {
        enemy: EntityId,
        player_roll: i32,
        enemy_roll: i32,
    },

    EnemyDefeated { enemy: EntityId, xp: i32 },

    /// The player went through the exit.
    Descended { level: u32 },

    /// The player gained a level.
    LevelUp { level: u32 },

    /// The run ended in death and was restarted.
    PlayerDied { killer: EntityId },

    /// The boss fell and the run was restarted.
    Victory,

    DarknessToggled { darkness: bool },

    WindowResized { viewport: Viewport },
}

impl GameEvent {
    /// Whether the event ended the current run.
    pub fn ends_run(&self) -> bool {
        matches!(self, Self::PlayerDied { .. } | Self::Victory)
    }
}
