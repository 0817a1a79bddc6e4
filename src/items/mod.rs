//! Items: templates, generated instances, equipment rules, loot rolls
//! and valuation.

pub mod equipment;
pub mod generation;
pub mod modifiers;
pub mod types;
pub mod value;

pub use equipment::{allowed_tags_for_slot, can_equip_item, valid_slots_for_item, EquipCheck, Equipment};
pub use generation::{determine_rarity, generate_item, roll_loot, LootEntry, RarityWeights};
pub use types::{
    BaseItem, EquipmentSlot, Item, ItemAffix, ItemModifier, ItemRarity, ItemTag, ItemType,
    WeaponScaling,
};
pub use value::{display_name, format_gold, item_stat_lines, item_value};
