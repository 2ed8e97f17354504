//! CLI configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use anyhow::Result;
use game_content::{ConfigLoader, ContentBundle};
use runtime::RuntimeConfig;

/// Settings shared by every subcommand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Fixed RNG seed; random when absent.
    pub seed: Option<u64>,
    /// TOML file with `[rules]`, `[generation]` and `[[weapons]]` overrides.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_SEED` - RNG seed (default: random)
    /// - `DUNGEON_CONFIG` - Path to a content TOML file (default: built-in content)
    pub fn from_env() -> Self {
        Self {
            seed: read_env::<u64>("DUNGEON_SEED"),
            config_path: env::var("DUNGEON_CONFIG").ok().map(PathBuf::from),
        }
    }

    /// Applies command-line flags on top of the environment.
    pub fn with_overrides(mut self, seed: Option<u64>, config_path: Option<PathBuf>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        if config_path.is_some() {
            self.config_path = config_path;
        }
        self
    }

    pub fn content(&self) -> Result<ContentBundle> {
        match &self.config_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading content config");
                ConfigLoader::load(path)
            }
            None => Ok(ContentBundle::default()),
        }
    }

    pub fn runtime_config(&self) -> Result<RuntimeConfig> {
        let mut config = RuntimeConfig::from(self.content()?);
        config.seed = self.seed;
        Ok(config)
    }

    /// The configured seed, or a fresh one that is logged so the run can be
    /// repeated.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            let seed = rand::random();
            tracing::info!(seed, "no seed configured; drew a random one");
            seed
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn flags_override_only_what_they_set() {
        let base = CliConfig {
            seed: Some(1),
            config_path: Some(PathBuf::from("env.toml")),
        };

        let merged = base.clone().with_overrides(Some(9), None);
        assert_eq!(merged.seed, Some(9));
        assert_eq!(merged.config_path, base.config_path);

        assert_eq!(base.clone().with_overrides(None, None), base);
    }

    #[test]
    fn runtime_config_reads_the_content_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[generation]\nroom_count = 3\n\n[rules]\nboss_attack = 99").expect("write");

        let cli = CliConfig {
            seed: Some(4),
            config_path: Some(file.path().to_path_buf()),
        };
        let config = cli.runtime_config().expect("config loads");

        assert_eq!(config.seed, Some(4));
        assert_eq!(config.generation.room_count, 3);
        assert_eq!(config.rules.boss_attack, 99);
    }

    #[test]
    fn builtin_content_is_used_without_a_file() {
        let config = CliConfig::default().runtime_config().expect("defaults");
        assert_eq!(config, RuntimeConfig::default());
    }
}
