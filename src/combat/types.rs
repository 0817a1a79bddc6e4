//! Monster model and spawn templates.

use serde::{Deserialize, Serialize};

use crate::character::types::CharacterStats;
use crate::core::types::{ElementResistance, Health, Level, MonsterId, MonsterTier};
use crate::items::generation::LootEntry;

/// Inclusive player-level band a template is eligible for. Spawning also
/// tolerates templates up to two levels below the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    pub min: u32,
    pub max: u32,
}

fn default_critical_chance() -> f64 {
    0.05
}

fn default_critical_damage() -> f64 {
    1.5
}

/// A monster definition from content data. Concrete monsters are stamped
/// out of these by the spawn operation with level-scaled health and damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub id: MonsterId,
    pub name: String,
    pub level_range: LevelRange,
    pub base_health: u32,
    pub base_damage: u32,
    #[serde(default)]
    pub defense: u32,
    #[serde(default = "default_critical_chance")]
    pub critical_chance: f64,
    #[serde(default = "default_critical_damage")]
    pub critical_damage: f64,
    pub tier: MonsterTier,
    #[serde(default)]
    pub element_resistance: ElementResistance,
    #[serde(default)]
    pub loot_table: Vec<LootEntry>,
}

/// A live monster. Replaced on defeat; only `current_health` changes
/// between spawn and death.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub name: String,
    pub tier: MonsterTier,
    pub level: Level,
    pub current_health: Health,
    pub stats: CharacterStats,
    pub element_resistance: ElementResistance,
    pub loot_table: Vec<LootEntry>,
}
