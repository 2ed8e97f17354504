//! Static content tables.
//!
//! Weapons are handed out one per dungeon level; the tier index is the level.

/// A weapon that can be placed on the board and picked up by the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponTier {
    /// Display name; doubles as the entity key on the board.
    pub name: String,
    /// Attack bonus added to the player on pickup.
    pub attack: i32,
}

impl WeaponTier {
    pub fn new(name: impl Into<String>, attack: i32) -> Self {
        Self {
            name: name.into(),
            attack,
        }
    }
}

/// Content consumed by the runtime when populating levels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentTables {
    pub weapons: Vec<WeaponTier>,
}

impl ContentTables {
    pub fn new(weapons: Vec<WeaponTier>) -> Self {
        Self { weapons }
    }

    /// Weapon placed on `dungeon_level`, clamped to the last tier.
    ///
    /// Returns `None` only when the table is empty.
    pub fn weapon_for_level(&self, dungeon_level: u32) -> Option<&WeaponTier> {
        let index = (dungeon_level as usize).min(self.weapons.len().checked_sub(1)?);
        self.weapons.get(index)
    }
}

impl Default for ContentTables {
    fn default() -> Self {
        Self::new(vec![
            WeaponTier::new("brass knuckles", 7),
            WeaponTier::new("serrated dagger", 12),
            WeaponTier::new("katana", 16),
            WeaponTier::new("reaper's scythe", 22),
            WeaponTier::new("large trout", 30),
        ])
    }
}
