use serde::{Deserialize, Serialize};

use crate::core::types::{ElementModifiers, ElementType, ItemId, Level, PlayerClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemRarity {
    Common,
    Magic,
    Rare,
    Legendary,
}

impl ItemRarity {
    pub fn all() -> [ItemRarity; 4] {
        [
            ItemRarity::Common,
            ItemRarity::Magic,
            ItemRarity::Rare,
            ItemRarity::Legendary,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemRarity::Common => "Common",
            ItemRarity::Magic => "Magic",
            ItemRarity::Rare => "Rare",
            ItemRarity::Legendary => "Legendary",
        }
    }

    /// Multiplier applied to modifier magnitudes at generation time.
    pub fn modifier_multiplier(&self) -> f64 {
        match self {
            ItemRarity::Common => 1.0,
            ItemRarity::Magic => 1.5,
            ItemRarity::Rare => 2.0,
            ItemRarity::Legendary => 3.0,
        }
    }

    /// Multiplier applied to the item's notional gold value.
    pub fn value_multiplier(&self) -> f64 {
        match self {
            ItemRarity::Common => 1.0,
            ItemRarity::Magic => 2.5,
            ItemRarity::Rare => 5.0,
            ItemRarity::Legendary => 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    Weapon,
    Armor,
    Accessory,
}

impl ItemType {
    /// Base gold value before level/rarity/modifier adjustments.
    pub fn base_value(&self) -> u64 {
        match self {
            ItemType::Weapon => 50,
            ItemType::Armor => 40,
            ItemType::Accessory => 30,
        }
    }
}

/// Tags controlling which slots an item fits and which skills it enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemTag {
    OneHanded,
    TwoHanded,
    Sword,
    Axe,
    Dagger,
    Staff,
    Shield,
    HeavyArmor,
    LightArmor,
    ClothArmor,
    Helm,
    Gloves,
    Boots,
    Ring,
    Amulet,
    Belt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Armor,
    Helm,
    Gloves,
    Boots,
    Ring1,
    Ring2,
    Amulet,
    Belt,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 10] {
        [
            EquipmentSlot::MainHand,
            EquipmentSlot::OffHand,
            EquipmentSlot::Armor,
            EquipmentSlot::Helm,
            EquipmentSlot::Gloves,
            EquipmentSlot::Boots,
            EquipmentSlot::Ring1,
            EquipmentSlot::Ring2,
            EquipmentSlot::Amulet,
            EquipmentSlot::Belt,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::MainHand => "Main Hand",
            EquipmentSlot::OffHand => "Off Hand",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Helm => "Helm",
            EquipmentSlot::Gloves => "Gloves",
            EquipmentSlot::Boots => "Boots",
            EquipmentSlot::Ring1 => "Ring 1",
            EquipmentSlot::Ring2 => "Ring 2",
            EquipmentSlot::Amulet => "Amulet",
            EquipmentSlot::Belt => "Belt",
        }
    }
}

/// A single stat contribution carried by an item, prefix or suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ItemModifier {
    IncreaseDamage { value: u32 },
    IncreaseHealth { value: u32 },
    IncreaseDefense { value: u32 },
    IncreaseMana { value: u32 },
    ManaRegen { value: u32 },
    IncreaseStrength { value: u32 },
    IncreaseIntelligence { value: u32 },
    IncreaseDexterity { value: u32 },
    IncreaseVitality { value: u32 },
    LifeSteal { percentage: f64 },
    CriticalChance { percentage: f64 },
    CriticalDamage { multiplier: f64 },
    SkillPower { percentage: f64 },
    ElementResistance { element: ElementType, value: f64 },
}

/// Per-attribute damage coefficients for weapons.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponScaling {
    pub strength: Option<f64>,
    pub intelligence: Option<f64>,
    pub dexterity: Option<f64>,
}

/// Immutable item template from content data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseItem {
    pub id: ItemId,
    pub name: String,
    pub item_type: ItemType,
    pub tags: Vec<ItemTag>,
    #[serde(default)]
    pub base_modifiers: Vec<ItemModifier>,
    #[serde(default)]
    pub weapon_scaling: Option<WeaponScaling>,
    #[serde(default)]
    pub required_level: Option<u32>,
    #[serde(default)]
    pub required_class: Option<Vec<PlayerClass>>,
    #[serde(default)]
    pub element_type: Option<ElementType>,
    #[serde(default)]
    pub element_modifiers: Option<ElementModifiers>,
}

/// A named prefix or suffix carrying extra modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAffix {
    pub name: String,
    pub modifiers: Vec<ItemModifier>,
}

/// A generated item instance. Immutable after creation.
///
/// The embedded base item carries rarity-scaled modifier magnitudes, so two
/// drops of the same template at different rarities differ in their base
/// modifiers as well as their affixes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub base_item: BaseItem,
    pub rarity: ItemRarity,
    #[serde(default)]
    pub prefix: Option<ItemAffix>,
    #[serde(default)]
    pub suffix: Option<ItemAffix>,
    pub level: Level,
}

impl Item {
    /// All modifiers in effect: base, then prefix, then suffix.
    pub fn all_modifiers(&self) -> impl Iterator<Item = &ItemModifier> {
        self.base_item
            .base_modifiers
            .iter()
            .chain(self.prefix.iter().flat_map(|a| a.modifiers.iter()))
            .chain(self.suffix.iter().flat_map(|a| a.modifiers.iter()))
    }

    pub fn modifier_count(&self) -> usize {
        self.base_item.base_modifiers.len()
            + self.prefix.as_ref().map_or(0, |a| a.modifiers.len())
            + self.suffix.as_ref().map_or(0, |a| a.modifiers.len())
    }

    pub fn affix_count(&self) -> usize {
        self.prefix.is_some() as usize + self.suffix.is_some() as usize
    }

    pub fn has_tag(&self, tag: ItemTag) -> bool {
        self.base_item.tags.contains(&tag)
    }

    pub fn is_two_handed(&self) -> bool {
        self.has_tag(ItemTag::TwoHanded)
    }
}
