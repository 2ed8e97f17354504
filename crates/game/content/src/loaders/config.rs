//! Game configuration loader.
//!
//! A configuration file is TOML with three optional parts; anything left out
//! keeps its default:
//!
//! ```toml
//! [rules]
//! attack_variance = 5
//! heal_rule = "target_relative"
//!
//! [generation]
//! width = 80
//! height = 60
//! room_count = 12
//!
//! [[weapons]]
//! name = "rusty sword"
//! attack = 9
//! ```

use std::path::Path;

use game_core::GameConfig;
use serde::Deserialize;

use crate::generators::GenerationParams;
use crate::loaders::{LoadResult, read_file};
use crate::tables::{ContentTables, WeaponTier};

/// Everything a session needs besides its random seed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentBundle {
    pub rules: GameConfig,
    pub generation: GenerationParams,
    pub tables: ContentTables,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    rules: GameConfig,
    generation: GenerationParams,
    weapons: Option<Vec<WeaponTier>>,
}

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`ContentBundle`] from a TOML file.
    pub fn load(path: &Path) -> LoadResult<ContentBundle> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> LoadResult<ContentBundle> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        file.generation.validate()?;

        let tables = match file.weapons {
            Some(weapons) if weapons.is_empty() => {
                anyhow::bail!("weapon table must list at least one weapon")
            }
            Some(weapons) => ContentTables::new(weapons),
            None => ContentTables::default(),
        };

        Ok(ContentBundle {
            rules: file.rules,
            generation: file.generation,
            tables,
        })
    }
}
