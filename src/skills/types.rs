//! Skill data model: abilities, their effects, trigger conditions and the
//! five-color resource economy that gates them.

use serde::{Deserialize, Serialize};

use crate::core::types::{ElementType, PlayerClass, SkillId};
use crate::items::types::ItemTag;

/// Ability category. Basic skills generate resources, Active skills spend
/// them, Passives piggyback on the turn loop without a resource cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillType {
    Active,
    Basic,
    Passive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillTargetType {
    #[serde(rename = "Self")]
    Self_,
    Enemy,
    All,
}

/// The five resource colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceColor {
    White,
    Red,
    Blue,
    Green,
    Black,
}

impl ResourceColor {
    pub fn all() -> [ResourceColor; 5] {
        [
            ResourceColor::White,
            ResourceColor::Red,
            ResourceColor::Blue,
            ResourceColor::Green,
            ResourceColor::Black,
        ]
    }
}

/// Per-color counters. Used both as the player's pool and as a skill's
/// declared cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePool {
    pub white: u32,
    pub red: u32,
    pub blue: u32,
    pub green: u32,
    pub black: u32,
}

impl ResourcePool {
    pub fn get(&self, color: ResourceColor) -> u32 {
        match color {
            ResourceColor::White => self.white,
            ResourceColor::Red => self.red,
            ResourceColor::Blue => self.blue,
            ResourceColor::Green => self.green,
            ResourceColor::Black => self.black,
        }
    }

    pub fn get_mut(&mut self, color: ResourceColor) -> &mut u32 {
        match color {
            ResourceColor::White => &mut self.white,
            ResourceColor::Red => &mut self.red,
            ResourceColor::Blue => &mut self.blue,
            ResourceColor::Green => &mut self.green,
            ResourceColor::Black => &mut self.black,
        }
    }

    /// True when every color in `cost` is covered by this pool.
    pub fn covers(&self, cost: &ResourcePool) -> bool {
        ResourceColor::all()
            .iter()
            .all(|&color| self.get(color) >= cost.get(color))
    }

    /// Subtracts `cost` color by color, saturating at zero.
    pub fn consume(&mut self, cost: &ResourcePool) {
        for color in ResourceColor::all() {
            let slot = self.get_mut(color);
            *slot = slot.saturating_sub(cost.get(color));
        }
    }

    pub fn grant(&mut self, color: ResourceColor, amount: u32) {
        *self.get_mut(color) += amount;
    }

    pub fn total(&self) -> u32 {
        self.white + self.red + self.blue + self.green + self.black
    }
}

/// A chance-based color grant rolled when a Basic skill resolves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceGain {
    pub color: ResourceColor,
    pub amount: u32,
    /// Probability in [0, 1], rolled independently per entry.
    pub chance: f64,
}

/// Typed skill effects.
///
/// Buff, Debuff, Stun and DamageOverTime are part of the closed effect set
/// but the turn loop does not exercise them yet; they exist so content can
/// declare them ahead of the mechanics landing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SkillEffect {
    Damage {
        base_damage: u32,
        scaling: f64,
        element: ElementType,
    },
    Heal {
        base_heal: u32,
        scaling: f64,
    },
    LifeDrain {
        percentage: f64,
    },
    Buff {
        stat: String,
        value: f64,
        duration: u32,
    },
    Debuff {
        stat: String,
        value: f64,
        duration: u32,
    },
    Stun {
        duration: u32,
    },
    DamageOverTime {
        damage: u32,
        duration: u32,
        element: ElementType,
    },
}

/// Conditions checked before a skill may fire. ALL conditions on a skill
/// must hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TriggerCondition {
    Always,
    HealthBelow { percentage: f64 },
    ManaAbove { percentage: f64 },
    EnemyHealthBelow { percentage: f64 },
    CriticalHit,
    OnKill,
    TurnInterval { interval: u32 },
}

/// A skill definition. Loaded from content data, never mutated; only the
/// player's per-skill cooldown and timer counters change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub skill_type: SkillType,
    #[serde(default)]
    pub mana_cost: u32,
    pub cooldown: u32,
    pub target_type: SkillTargetType,
    pub effects: Vec<SkillEffect>,
    pub trigger_conditions: Vec<TriggerCondition>,
    /// Selection tie-break, higher wins. 1..=10 in content data.
    pub priority: u32,
    #[serde(default)]
    pub resource_cost: ResourcePool,
    #[serde(default)]
    pub resource_gain: Vec<ResourceGain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_weapon_tags: Option<Vec<ItemTag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_class: Option<Vec<PlayerClass>>,
    /// Declared by content but not yet consulted by the damage path, like
    /// the inert effect variants.
    #[serde(default)]
    pub guaranteed_critical: bool,
}
