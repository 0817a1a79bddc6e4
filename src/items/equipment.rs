//! Equipment slots and class compatibility rules.

use serde::{Deserialize, Serialize};

use super::types::{EquipmentSlot, Item, ItemTag};
use crate::core::types::PlayerClass;

/// A character's worn items, at most one per slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Equipment {
    pub main_hand: Option<Item>,
    pub off_hand: Option<Item>,
    pub armor: Option<Item>,
    pub helm: Option<Item>,
    pub gloves: Option<Item>,
    pub boots: Option<Item>,
    pub ring1: Option<Item>,
    pub ring2: Option<Item>,
    pub amulet: Option<Item>,
    pub belt: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        match slot {
            EquipmentSlot::MainHand => self.main_hand.as_ref(),
            EquipmentSlot::OffHand => self.off_hand.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
            EquipmentSlot::Helm => self.helm.as_ref(),
            EquipmentSlot::Gloves => self.gloves.as_ref(),
            EquipmentSlot::Boots => self.boots.as_ref(),
            EquipmentSlot::Ring1 => self.ring1.as_ref(),
            EquipmentSlot::Ring2 => self.ring2.as_ref(),
            EquipmentSlot::Amulet => self.amulet.as_ref(),
            EquipmentSlot::Belt => self.belt.as_ref(),
        }
    }

    /// Replaces the slot's occupant, returning the previous item.
    pub fn set(&mut self, slot: EquipmentSlot, item: Option<Item>) -> Option<Item> {
        let target = match slot {
            EquipmentSlot::MainHand => &mut self.main_hand,
            EquipmentSlot::OffHand => &mut self.off_hand,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Helm => &mut self.helm,
            EquipmentSlot::Gloves => &mut self.gloves,
            EquipmentSlot::Boots => &mut self.boots,
            EquipmentSlot::Ring1 => &mut self.ring1,
            EquipmentSlot::Ring2 => &mut self.ring2,
            EquipmentSlot::Amulet => &mut self.amulet,
            EquipmentSlot::Belt => &mut self.belt,
        };
        std::mem::replace(target, item)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [
            &self.main_hand,
            &self.off_hand,
            &self.armor,
            &self.helm,
            &self.gloves,
            &self.boots,
            &self.ring1,
            &self.ring2,
            &self.amulet,
            &self.belt,
        ]
        .into_iter()
        .flatten()
    }
}

/// Outcome of an equip compatibility check.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipCheck {
    pub can_equip: bool,
    pub reason: Option<String>,
}

impl EquipCheck {
    fn ok() -> Self {
        Self {
            can_equip: true,
            reason: None,
        }
    }

    fn rejected(reason: impl Into<String>) -> Self {
        Self {
            can_equip: false,
            reason: Some(reason.into()),
        }
    }
}

/// Tags a class may place in a given slot. Empty means the slot is closed
/// to that class.
pub fn allowed_tags_for_slot(class: PlayerClass, slot: EquipmentSlot) -> &'static [ItemTag] {
    use EquipmentSlot::*;
    use ItemTag::*;
    match slot {
        MainHand => match class {
            PlayerClass::Warrior => &[OneHanded, TwoHanded],
            PlayerClass::Mage => &[Staff, OneHanded],
            PlayerClass::Rogue => &[Dagger, OneHanded],
            PlayerClass::Paladin => &[OneHanded, TwoHanded],
        },
        OffHand => match class {
            // Warriors may shield up or dual-wield
            PlayerClass::Warrior => &[Shield, OneHanded],
            PlayerClass::Mage => &[Shield],
            // Rogues dual-wield daggers
            PlayerClass::Rogue => &[Dagger, OneHanded],
            PlayerClass::Paladin => &[Shield],
        },
        Armor => match class {
            PlayerClass::Warrior => &[HeavyArmor, LightArmor],
            PlayerClass::Mage => &[ClothArmor],
            PlayerClass::Rogue => &[LightArmor],
            PlayerClass::Paladin => &[HeavyArmor, LightArmor],
        },
        EquipmentSlot::Helm => &[ItemTag::Helm],
        EquipmentSlot::Gloves => &[ItemTag::Gloves],
        EquipmentSlot::Boots => &[ItemTag::Boots],
        Ring1 | Ring2 => &[Ring],
        EquipmentSlot::Amulet => &[ItemTag::Amulet],
        EquipmentSlot::Belt => &[ItemTag::Belt],
    }
}

/// Checks whether `item` may go into `slot` for the given class and level.
///
/// Checks run in order: required level, required class, slot availability,
/// tag compatibility; the first failure wins and carries a display reason.
///
/// Two-handed items passing for MainHand conceptually vacate OffHand; that
/// dependent invariant is enforced by the equip action handler, not here.
pub fn can_equip_item(
    item: &Item,
    slot: EquipmentSlot,
    class: PlayerClass,
    player_level: u32,
) -> EquipCheck {
    if let Some(required) = item.base_item.required_level {
        if player_level < required {
            return EquipCheck::rejected(format!("Requires level {required}"));
        }
    }

    if let Some(classes) = &item.base_item.required_class {
        if !classes.contains(&class) {
            return EquipCheck::rejected(format!("{} cannot equip this item", class.name()));
        }
    }

    let allowed = allowed_tags_for_slot(class, slot);
    if allowed.is_empty() {
        return EquipCheck::rejected(format!("{} cannot use this slot", class.name()));
    }

    if !item.base_item.tags.iter().any(|tag| allowed.contains(tag)) {
        return EquipCheck::rejected("This item type does not fit this slot");
    }

    EquipCheck::ok()
}

/// All slots the item could legally occupy for this class and level.
pub fn valid_slots_for_item(
    item: &Item,
    class: PlayerClass,
    player_level: u32,
) -> Vec<EquipmentSlot> {
    EquipmentSlot::all()
        .into_iter()
        .filter(|&slot| can_equip_item(item, slot, class, player_level).can_equip)
        .collect()
}
