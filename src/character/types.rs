//! Player model and the stat blocks shared with monsters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{
    Damage, Dexterity, ElementResistance, Experience, Gold, Health, Intelligence, Level, Mana,
    PlayerClass, PlayerId, SkillId, Strength, Vitality,
};
use crate::items::equipment::Equipment;
use crate::items::types::Item;
use crate::skills::types::{ResourcePool, Skill};

/// The four core attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub strength: Strength,
    pub intelligence: Intelligence,
    pub dexterity: Dexterity,
    pub vitality: Vitality,
}

/// Combat stat block. Players store their class baseline here; monsters use
/// the same shape for their template stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub max_health: Health,
    pub base_damage: Damage,
    #[serde(default)]
    pub defense: u32,
    pub critical_chance: f64,
    pub critical_damage: f64,
    #[serde(default)]
    pub life_steal: f64,
    pub max_mana: Mana,
    pub mana_regen: u32,
    #[serde(default)]
    pub skill_power: f64,
}

/// The full player value. Mutated only through copy-and-replace in the turn
/// orchestrator; the cooldown and timer maps are owned by this value and
/// replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub class: PlayerClass,
    pub level: Level,
    pub experience: Experience,
    pub current_health: Health,
    pub current_mana: Mana,
    pub base_stats: CharacterStats,
    pub base_attributes: BaseStats,
    pub equipment: Equipment,
    pub inventory: Vec<Item>,
    pub skills: Vec<Skill>,
    pub skill_cooldowns: HashMap<SkillId, u32>,
    pub skill_timers: HashMap<SkillId, u32>,
    pub resources: ResourcePool,
    pub element_resistance: ElementResistance,
    pub gold: Gold,
}
