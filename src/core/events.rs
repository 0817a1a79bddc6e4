//! Discrete battle events.
//!
//! Each turn produces an append-only list of these; callers own any
//! history they want to keep.

use serde::{Deserialize, Serialize};

use crate::core::types::{Damage, Experience, Gold, Health, Level, Mana, MonsterId, SkillId};
use crate::items::types::Item;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BattleEvent {
    PlayerAttack {
        damage: Damage,
        is_critical: bool,
        target_id: MonsterId,
        target_name: String,
    },
    MonsterAttack {
        damage: Damage,
        is_critical: bool,
        attacker_id: MonsterId,
        attacker_name: String,
    },
    PlayerHeal {
        amount: Health,
    },
    MonsterDefeated {
        monster_id: MonsterId,
        monster_name: String,
        experience: Experience,
    },
    ItemDropped {
        item: Item,
    },
    GoldDropped {
        amount: Gold,
    },
    PlayerLevelUp {
        new_level: Level,
    },
    PlayerDefeated,
    SkillUsed {
        skill_id: SkillId,
        skill_name: String,
        mana_cost: u32,
    },
    SkillDamage {
        skill_name: String,
        damage: Damage,
        target_id: MonsterId,
    },
    SkillHeal {
        skill_name: String,
        amount: Health,
    },
    PassiveTriggered {
        skill_id: SkillId,
        skill_name: String,
    },
    ManaRegenerated {
        amount: Mana,
    },
    NotEnoughMana {
        skill_name: String,
    },
    WaveStart {
        wave: u32,
        monster_name: String,
    },
    WaveCleared {
        wave: u32,
    },
}
