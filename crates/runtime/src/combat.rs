//! Attack rolls and the outcome of a single combat round.

use rand::Rng;

/// Rolls an attack: `floor(r * variance + attack - variance)` with `r` drawn
/// uniformly from `[0, 1)`.
pub fn roll_attack<R: Rng + ?Sized>(rng: &mut R, attack: i32, variance: i32) -> i32 {
    let r: f64 = rng.gen_range(0.0..1.0);
    (r * f64::from(variance) + f64::from(attack) - f64::from(variance)).floor() as i32
}

/// Result of one exchange between the player and a hostile entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatOutcome {
    /// The enemy's roll is at least the player's remaining health.
    PlayerDies,
    /// Both survive; each takes the other's roll as damage.
    Exchange,
    /// The player's roll is at least the enemy's remaining health.
    EnemyDies,
}

/// Rolls for both sides of a round, player first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatRound {
    pub player_roll: i32,
    pub enemy_roll: i32,
}

impl CombatRound {
    pub fn roll<R: Rng + ?Sized>(
        rng: &mut R,
        player_attack: i32,
        enemy_attack: i32,
        variance: i32,
    ) -> Self {
        let player_roll = roll_attack(rng, player_attack, variance);
        let enemy_roll = roll_attack(rng, enemy_attack, variance);
        Self {
            player_roll,
            enemy_roll,
        }
    }

    /// Decides the round. Death is checked before any damage lands.
    pub fn outcome(&self, player_health: i32, enemy_health: i32) -> CombatOutcome {
        if enemy_health > self.player_roll {
            if self.enemy_roll >= player_health {
                CombatOutcome::PlayerDies
            } else {
                CombatOutcome::Exchange
            }
        } else {
            CombatOutcome::EnemyDies
        }
    }
}
