//! Loot rolls and item generation.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::modifiers::{adjust_drop_chance, adjust_rarity_weights};
use super::types::{BaseItem, Item, ItemAffix, ItemModifier, ItemRarity};
use crate::core::types::{ItemId, Level, MonsterTier};

/// Weighted rarity distribution for a loot-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityWeights {
    pub common: f64,
    pub magic: f64,
    pub rare: f64,
    pub legendary: f64,
}

/// One row of a monster's loot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub base_item_id: ItemId,
    pub drop_chance: f64,
    pub rarity_weights: RarityWeights,
}

/// Fixed prefix pool. Magnitudes are pre-rarity-scaling.
pub fn prefix_pool() -> Vec<ItemAffix> {
    fn affix(name: &str, modifiers: Vec<ItemModifier>) -> ItemAffix {
        ItemAffix {
            name: name.to_string(),
            modifiers,
        }
    }
    vec![
        affix("Sharp", vec![ItemModifier::IncreaseDamage { value: 12 }]),
        affix("Brutal", vec![ItemModifier::IncreaseDamage { value: 25 }]),
        affix("Vampiric", vec![ItemModifier::LifeSteal { percentage: 0.2 }]),
        affix(
            "Precise",
            vec![ItemModifier::CriticalChance { percentage: 0.15 }],
        ),
        affix(
            "Devastating",
            vec![ItemModifier::CriticalDamage { multiplier: 0.75 }],
        ),
        affix("Sturdy", vec![ItemModifier::IncreaseHealth { value: 40 }]),
        affix("Fortified", vec![ItemModifier::IncreaseDefense { value: 20 }]),
        affix("Mystic", vec![ItemModifier::IncreaseMana { value: 30 }]),
        affix("Arcane", vec![ItemModifier::SkillPower { percentage: 25.0 }]),
        affix("Flowing", vec![ItemModifier::ManaRegen { value: 6 }]),
    ]
}

/// Fixed suffix pool. Magnitudes are pre-rarity-scaling.
pub fn suffix_pool() -> Vec<ItemAffix> {
    fn affix(name: &str, modifiers: Vec<ItemModifier>) -> ItemAffix {
        ItemAffix {
            name: name.to_string(),
            modifiers,
        }
    }
    vec![
        affix("of Power", vec![ItemModifier::IncreaseDamage { value: 20 }]),
        affix(
            "of Vitality",
            vec![ItemModifier::IncreaseHealth { value: 60 }],
        ),
        affix(
            "of Protection",
            vec![ItemModifier::IncreaseDefense { value: 30 }],
        ),
        affix(
            "of the Assassin",
            vec![ItemModifier::CriticalChance { percentage: 0.25 }],
        ),
        affix(
            "of Destruction",
            vec![ItemModifier::CriticalDamage { multiplier: 1.0 }],
        ),
        affix("of Blood", vec![ItemModifier::LifeSteal { percentage: 0.25 }]),
        affix(
            "of the Warrior",
            vec![
                ItemModifier::IncreaseDamage { value: 15 },
                ItemModifier::IncreaseHealth { value: 35 },
            ],
        ),
        affix(
            "of the Mage",
            vec![
                ItemModifier::IncreaseMana { value: 40 },
                ItemModifier::SkillPower { percentage: 20.0 },
            ],
        ),
        affix("of Wisdom", vec![ItemModifier::ManaRegen { value: 10 }]),
        affix(
            "of Sorcery",
            vec![ItemModifier::SkillPower { percentage: 40.0 }],
        ),
    ]
}

/// Weighted categorical draw over the four rarities.
///
/// A single uniform draw is scaled by the weight sum and compared against
/// cumulative thresholds in fixed order, so ties resolve by encounter order
/// rather than extra randomness.
pub fn determine_rarity(weights: RarityWeights, rng: &mut impl Rng) -> ItemRarity {
    let total = weights.common + weights.magic + weights.rare + weights.legendary;
    let roll = rng.gen::<f64>() * total;

    if roll < weights.common {
        ItemRarity::Common
    } else if roll < weights.common + weights.magic {
        ItemRarity::Magic
    } else if roll < weights.common + weights.magic + weights.rare {
        ItemRarity::Rare
    } else {
        ItemRarity::Legendary
    }
}

/// Scales modifier magnitudes by the rarity multiplier. Attribute bonuses
/// and element resistances keep their template values.
fn apply_rarity_multiplier(modifiers: &[ItemModifier], rarity: ItemRarity) -> Vec<ItemModifier> {
    let multiplier = rarity.modifier_multiplier();
    modifiers
        .iter()
        .map(|modifier| match *modifier {
            ItemModifier::IncreaseDamage { value } => ItemModifier::IncreaseDamage {
                value: (value as f64 * multiplier).floor() as u32,
            },
            ItemModifier::IncreaseHealth { value } => ItemModifier::IncreaseHealth {
                value: (value as f64 * multiplier).floor() as u32,
            },
            ItemModifier::IncreaseDefense { value } => ItemModifier::IncreaseDefense {
                value: (value as f64 * multiplier).floor() as u32,
            },
            ItemModifier::IncreaseMana { value } => ItemModifier::IncreaseMana {
                value: (value as f64 * multiplier).floor() as u32,
            },
            ItemModifier::ManaRegen { value } => ItemModifier::ManaRegen {
                value: (value as f64 * multiplier).floor() as u32,
            },
            ItemModifier::LifeSteal { percentage } => ItemModifier::LifeSteal {
                percentage: percentage * multiplier,
            },
            ItemModifier::CriticalChance { percentage } => ItemModifier::CriticalChance {
                percentage: percentage * multiplier,
            },
            ItemModifier::SkillPower { percentage } => ItemModifier::SkillPower {
                percentage: percentage * multiplier,
            },
            ItemModifier::CriticalDamage { multiplier: m } => ItemModifier::CriticalDamage {
                multiplier: m * multiplier,
            },
            ref other => other.clone(),
        })
        .collect()
}

fn pick_affix(pool: &[ItemAffix], rarity: ItemRarity, rng: &mut impl Rng) -> ItemAffix {
    let chosen = &pool[rng.gen_range(0..pool.len())];
    ItemAffix {
        name: chosen.name.clone(),
        modifiers: apply_rarity_multiplier(&chosen.modifiers, rarity),
    }
}

/// Generates an item instance from a template.
///
/// Affix counts follow the rarity invariant: Common gets none, Magic gets
/// exactly one of prefix/suffix (50/50), Rare and Legendary get both. The
/// instance id derives from the injected RNG so turn processing stays
/// reproducible.
pub fn generate_item(
    base_item: &BaseItem,
    level: Level,
    rarity: ItemRarity,
    rng: &mut impl Rng,
) -> Item {
    let mut scaled_base = base_item.clone();
    scaled_base.base_modifiers = apply_rarity_multiplier(&base_item.base_modifiers, rarity);

    let id = ItemId(format!("{}_{:08x}", base_item.id, rng.gen::<u32>()));

    let (prefix, suffix) = match rarity {
        ItemRarity::Common => (None, None),
        ItemRarity::Magic => {
            if rng.gen::<f64>() < 0.5 {
                (Some(pick_affix(&prefix_pool(), rarity, rng)), None)
            } else {
                (None, Some(pick_affix(&suffix_pool(), rarity, rng)))
            }
        }
        ItemRarity::Rare | ItemRarity::Legendary => (
            Some(pick_affix(&prefix_pool(), rarity, rng)),
            Some(pick_affix(&suffix_pool(), rarity, rng)),
        ),
    };

    Item {
        id,
        base_item: scaled_base,
        rarity,
        prefix,
        suffix,
        level,
    }
}

/// Rolls every loot-table entry independently and generates the drops.
///
/// Entries referencing a missing base item are skipped silently: a gap in
/// content data should cost a drop, not the session.
pub fn roll_loot(
    loot_table: &[LootEntry],
    base_items: &HashMap<ItemId, BaseItem>,
    level: Level,
    tier: MonsterTier,
    rng: &mut impl Rng,
) -> Vec<Item> {
    let mut drops = Vec::new();

    for entry in loot_table {
        let drop_chance = adjust_drop_chance(entry.drop_chance, tier);
        if rng.gen::<f64>() <= drop_chance {
            let Some(base_item) = base_items.get(&entry.base_item_id) else {
                continue;
            };
            let weights = adjust_rarity_weights(entry.rarity_weights, tier);
            let rarity = determine_rarity(weights, rng);
            drops.push(generate_item(base_item, level, rarity, rng));
        }
    }

    drops
}
