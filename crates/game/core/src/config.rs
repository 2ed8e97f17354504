/// Formula used by the heal transition.
///
/// The classic rules compute the healed value from the *player's* health even
/// when another entity is the target. `TargetRelative` heals relative to the
/// target's own health instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HealRule {
    #[default]
    PlayerRelative,
    TargetRelative,
}

/// Viewport dimensions reported by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_VIEWPORT, GameConfig::DEFAULT_VIEWPORT)
    }
}

/// Game rule constants and tunable parameters.
///
/// Every number the reducer and the orchestrator use to scale entities lives
/// here. `Default` reproduces the classic balance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Health of a freshly created player.
    pub player_health: i32,
    /// Attack of a freshly created player.
    pub player_attack: i32,
    /// Weapon name carried before any pickup.
    pub starting_weapon: String,
    /// XP needed for the first level-up.
    pub first_level_threshold: i32,

    /// Attack gained per player level on level-up (multiplied by the new level).
    pub level_up_attack: i32,
    /// Health gained per player level on level-up (multiplied by the new level).
    pub level_up_health: i32,
    /// XP curve step; the next threshold is `(new_level + 1) * level_up_xp`.
    pub level_up_xp: i32,

    /// Enemy health per dungeon level (multiplied by `level + 1`).
    pub enemy_health: i32,
    /// Enemy attack per dungeon level (multiplied by `level + 1`).
    pub enemy_attack: i32,
    /// XP awarded per dungeon level for a kill (multiplied by `level + 1`).
    pub enemy_xp: i32,

    pub boss_health: i32,
    pub boss_attack: i32,

    /// Width of the random window applied to every attack roll.
    pub attack_variance: i32,
    /// Number of health items and number of enemies placed per level.
    pub items_per_level: u32,
    /// Health restored by a health item.
    pub health_item_value: i32,
    /// Dungeon level that holds the boss instead of an exit.
    pub final_dungeon_level: u32,

    pub viewport: Viewport,
    pub heal_rule: HealRule,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Side length of the boss footprint.
    pub const BOSS_FOOTPRINT: i32 = 2;
    pub const DEFAULT_VIEWPORT: u32 = 500;

    pub fn new() -> Self {
        Self {
            player_health: 100,
            player_attack: 7,
            starting_weapon: "stick".to_owned(),
            first_level_threshold: 60,
            level_up_attack: 12,
            level_up_health: 20,
            level_up_xp: 60,
            enemy_health: 20,
            enemy_attack: 12,
            enemy_xp: 10,
            boss_health: 500,
            boss_attack: 125,
            attack_variance: 7,
            items_per_level: 5,
            health_item_value: 20,
            final_dungeon_level: 4,
            viewport: Viewport::default(),
            heal_rule: HealRule::default(),
        }
    }

    pub fn with_heal_rule(heal_rule: HealRule) -> Self {
        Self {
            heal_rule,
            ..Self::new()
        }
    }

    /// Multiplier applied to per-level stats on the given dungeon level.
    pub fn level_multiplier(dungeon_level: u32) -> i32 {
        dungeon_level as i32 + 1
    }

    pub fn enemy_stats(&self, dungeon_level: u32) -> (i32, i32) {
        let mult = Self::level_multiplier(dungeon_level);
        (mult * self.enemy_health, mult * self.enemy_attack)
    }

    pub fn kill_xp(&self, dungeon_level: u32) -> i32 {
        Self::level_multiplier(dungeon_level) * self.enemy_xp
    }

    /// Deltas for the level-up that takes the player from `player_level` to
    /// `player_level + 1`: `(attack, health, next_threshold)`.
    pub fn level_up_deltas(&self, player_level: u32) -> (i32, i32, i32) {
        let next = player_level as i32 + 1;
        (
            next * self.level_up_attack,
            next * self.level_up_health,
            (next + 1) * self.level_up_xp,
        )
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
