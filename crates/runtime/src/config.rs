use game_content::{ContentBundle, ContentTables, GenerationParams};
use game_core::GameConfig;

use crate::api::{Result, RuntimeError};

/// Everything a [`GameSession`](crate::GameSession) is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Seed for the session RNG. `None` draws a fresh one.
    pub seed: Option<u64>,
    pub rules: GameConfig,
    pub generation: GenerationParams,
    pub tables: ContentTables,
    /// Random tiles tried per entity before spawning gives up.
    pub max_spawn_attempts: u32,
}

impl RuntimeConfig {
    pub const DEFAULT_SPAWN_ATTEMPTS: u32 = 100_000;

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the parts of the configuration the session relies on to
    /// terminate.
    pub fn validate(&self) -> Result<()> {
        self.generation.validate()?;
        if self.tables.weapons.is_empty() {
            return Err(RuntimeError::InvalidConfig(
                "weapon table is empty".to_owned(),
            ));
        }
        if self.rules.level_up_xp <= 0 {
            return Err(RuntimeError::InvalidConfig(format!(
                "level_up_xp must be positive, got {}",
                self.rules.level_up_xp
            )));
        }
        if self.rules.attack_variance < 0 {
            return Err(RuntimeError::InvalidConfig(format!(
                "attack_variance must not be negative, got {}",
                self.rules.attack_variance
            )));
        }
        if self.max_spawn_attempts == 0 {
            return Err(RuntimeError::InvalidConfig(
                "max_spawn_attempts must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            rules: GameConfig::default(),
            generation: GenerationParams::default(),
            tables: ContentTables::default(),
            max_spawn_attempts: Self::DEFAULT_SPAWN_ATTEMPTS,
        }
    }
}

impl From<ContentBundle> for RuntimeConfig {
    fn from(bundle: ContentBundle) -> Self {
        Self {
            rules: bundle.rules,
            generation: bundle.generation,
            tables: bundle.tables,
            ..Self::default()
        }
    }
}
