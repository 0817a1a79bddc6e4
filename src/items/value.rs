//! Item valuation and display helpers.

use super::types::{Item, ItemModifier};
use crate::core::constants::{ITEM_SELL_RATIO, ITEM_VALUE_PER_LEVEL, ITEM_VALUE_PER_MODIFIER};
use crate::core::types::Gold;

/// Gold value of an item instance. This is the sell price: the notional
/// worth (slot-class base, plus level scaling, times rarity, plus a bonus
/// per rolled modifier) halved and floored.
pub fn item_value(item: &Item) -> Gold {
    let base =
        item.base_item.item_type.base_value() + item.level.value() as u64 * ITEM_VALUE_PER_LEVEL;
    let scaled = base as f64 * item.rarity.value_multiplier();
    let notional = scaled + (ITEM_VALUE_PER_MODIFIER * item.modifier_count() as u64) as f64;
    Gold((notional * ITEM_SELL_RATIO).floor() as u64)
}

/// Human-readable name with affixes, e.g. "Sharp Iron Sword of Power".
pub fn display_name(item: &Item) -> String {
    let mut name = String::new();
    if let Some(prefix) = &item.prefix {
        name.push_str(&prefix.name);
        name.push(' ');
    }
    name.push_str(&item.base_item.name);
    if let Some(suffix) = &item.suffix {
        name.push(' ');
        name.push_str(&suffix.name);
    }
    name
}

/// Abbreviates large gold amounts for log lines: 1500 -> "1.5K", 2_000_000 -> "2.0M".
pub fn format_gold(gold: Gold) -> String {
    let amount = gold.value();
    if amount >= 1_000_000 {
        format!("{:.1}M", amount as f64 / 1_000_000.0)
    } else if amount >= 1_000 {
        format!("{:.1}K", amount as f64 / 1_000.0)
    } else {
        amount.to_string()
    }
}

fn modifier_line(modifier: &ItemModifier) -> String {
    match modifier {
        ItemModifier::IncreaseDamage { value } => format!("+{value} Damage"),
        ItemModifier::IncreaseHealth { value } => format!("+{value} Health"),
        ItemModifier::IncreaseDefense { value } => format!("+{value} Defense"),
        ItemModifier::IncreaseMana { value } => format!("+{value} Mana"),
        ItemModifier::ManaRegen { value } => format!("+{value} Mana Regen"),
        ItemModifier::IncreaseStrength { value } => format!("+{value} Strength"),
        ItemModifier::IncreaseIntelligence { value } => format!("+{value} Intelligence"),
        ItemModifier::IncreaseDexterity { value } => format!("+{value} Dexterity"),
        ItemModifier::IncreaseVitality { value } => format!("+{value} Vitality"),
        ItemModifier::LifeSteal { percentage } => {
            format!("{:.0}% Life Steal", percentage * 100.0)
        }
        ItemModifier::CriticalChance { percentage } => {
            format!("+{:.0}% Critical Chance", percentage * 100.0)
        }
        ItemModifier::CriticalDamage { multiplier } => {
            format!("+{:.0}% Critical Damage", multiplier * 100.0)
        }
        ItemModifier::SkillPower { percentage } => format!("+{percentage:.0}% Skill Power"),
        ItemModifier::ElementResistance { element, value } => {
            format!("+{value:.0}% {element:?} Resistance")
        }
    }
}

/// One formatted line per modifier, base modifiers first, then prefix and
/// suffix rolls.
pub fn item_stat_lines(item: &Item) -> Vec<String> {
    item.all_modifiers().map(modifier_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ItemId, Level};
    use crate::items::types::{BaseItem, ItemAffix, ItemRarity, ItemType};

    fn sword(rarity: ItemRarity, level: u32) -> Item {
        Item {
            id: ItemId::from("sword_1"),
            base_item: BaseItem {
                id: ItemId::from("iron_sword"),
                name: "Iron Sword".to_string(),
                item_type: ItemType::Weapon,
                tags: vec![],
                base_modifiers: vec![ItemModifier::IncreaseDamage { value: 10 }],
                weapon_scaling: None,
                required_level: None,
                required_class: None,
                element_type: None,
                element_modifiers: None,
            },
            rarity,
            prefix: None,
            suffix: None,
            level: Level(level),
        }
    }

    #[test]
    fn test_item_value_common_weapon() {
        // floor(((50 + 5*10) * 1.0 + 15) * 0.5) = 57
        let item = sword(ItemRarity::Common, 5);
        assert_eq!(item_value(&item), Gold(57));
    }

    #[test]
    fn test_item_value_scales_with_rarity_and_modifiers() {
        // floor(((50 + 5*10) * 5.0 + 15*3) * 0.5) = 272
        let mut item = sword(ItemRarity::Rare, 5);
        item.prefix = Some(ItemAffix {
            name: "Sharp".to_string(),
            modifiers: vec![ItemModifier::IncreaseDamage { value: 24 }],
        });
        item.suffix = Some(ItemAffix {
            name: "of Power".to_string(),
            modifiers: vec![ItemModifier::IncreaseDamage { value: 40 }],
        });
        assert_eq!(item_value(&item), Gold(272));
    }

    #[test]
    fn test_display_name_with_affixes() {
        let mut item = sword(ItemRarity::Rare, 3);
        item.prefix = Some(ItemAffix {
            name: "Sharp".to_string(),
            modifiers: vec![],
        });
        item.suffix = Some(ItemAffix {
            name: "of Power".to_string(),
            modifiers: vec![],
        });
        assert_eq!(display_name(&item), "Sharp Iron Sword of Power");
    }

    #[test]
    fn test_format_gold_abbreviations() {
        assert_eq!(format_gold(Gold(999)), "999");
        assert_eq!(format_gold(Gold(1_500)), "1.5K");
        assert_eq!(format_gold(Gold(2_000_000)), "2.0M");
    }

    #[test]
    fn test_stat_lines_cover_all_modifiers() {
        let mut item = sword(ItemRarity::Rare, 3);
        item.prefix = Some(ItemAffix {
            name: "Precise".to_string(),
            modifiers: vec![ItemModifier::CriticalChance { percentage: 0.15 }],
        });
        let lines = item_stat_lines(&item);
        assert_eq!(lines, vec!["+10 Damage", "+15% Critical Chance"]);
    }
}
