//! Combat: damage math and attack resolution.

pub mod damage;
pub mod logic;
pub mod types;

pub use damage::{
    base_damage_from_stats, elemental_damage, physical_attack, skill_damage,
    total_element_modifiers, PhysicalAttack,
};
pub use logic::{
    apply_experience, monster_attack, player_attack, LevelUpOutcome, MonsterAttackOutcome,
    PlayerAttackOutcome,
};
pub use types::{LevelRange, Monster, MonsterTemplate};
