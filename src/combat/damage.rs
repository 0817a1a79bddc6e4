//! Damage formulas: element resistance, weapon scaling, skill damage.
//!
//! Every function validates that its floating-point inputs and results are
//! finite. A NaN here is a content defect and aborts rather than leaking
//! into visible damage numbers.

use crate::character::stats::{calculate_total_attributes, calculate_total_stats};
use crate::character::types::{BaseStats, CharacterStats, Player};
use crate::core::constants::DEFAULT_STRENGTH_SCALING;
use crate::core::types::{
    ensure_finite, Damage, ElementModifiers, ElementResistance, ElementType,
};
use crate::items::types::{EquipmentSlot, WeaponScaling};

/// Resistance-adjusted damage.
///
/// `resistance` is in percentage points; negative values are weaknesses and
/// amplify (-50 means x1.5). The result is floored and never below 1.
pub fn elemental_damage(
    base_damage: u32,
    element: ElementType,
    resistance: &ElementResistance,
    attacker_modifier: f64,
) -> Damage {
    let resist = ensure_finite(resistance.get(element), "target resistance");
    let modifier = ensure_finite(attacker_modifier, "attacker element modifier");

    let raw = base_damage as f64 * modifier * (1.0 - resist / 100.0);
    let raw = ensure_finite(raw, "elemental damage");
    Damage((raw.floor() as i64).max(1) as u32)
}

/// Per-element outgoing multipliers from all equipped items, compounding
/// multiplicatively from a neutral 1.0.
pub fn total_element_modifiers(player: &Player) -> ElementModifiers {
    let mut total = ElementModifiers::default();

    for item in player.equipment.iter_equipped() {
        if let Some(item_modifiers) = &item.base_item.element_modifiers {
            for element in ElementType::all() {
                let slot = total.get_mut(element);
                *slot *= ensure_finite(item_modifiers.get(element), "item element modifier");
                ensure_finite(*slot, "total element modifier");
            }
        }
    }

    total
}

/// Base attack damage from stats plus per-axis attribute scaling, each axis
/// floored independently. Without weapon scaling the default is half of
/// strength.
pub fn base_damage_from_stats(
    stats: &CharacterStats,
    attributes: &BaseStats,
    scaling: Option<&WeaponScaling>,
) -> u32 {
    let mut damage = stats.base_damage.value();

    match scaling {
        Some(scaling) => {
            if let Some(coefficient) = scaling.strength {
                let c = ensure_finite(coefficient, "strength scaling");
                damage += (attributes.strength.value() as f64 * c).floor() as u32;
            }
            if let Some(coefficient) = scaling.intelligence {
                let c = ensure_finite(coefficient, "intelligence scaling");
                damage += (attributes.intelligence.value() as f64 * c).floor() as u32;
            }
            if let Some(coefficient) = scaling.dexterity {
                let c = ensure_finite(coefficient, "dexterity scaling");
                damage += (attributes.dexterity.value() as f64 * c).floor() as u32;
            }
        }
        None => {
            damage +=
                (attributes.strength.value() as f64 * DEFAULT_STRENGTH_SCALING).floor() as u32;
        }
    }

    damage
}

/// A basic attack's damage and element before target resistance.
pub struct PhysicalAttack {
    pub damage: u32,
    pub element: ElementType,
}

/// Computes the player's basic attack: stat-scaled weapon damage multiplied
/// by the attacker's total modifier for the weapon's element. Target
/// resistance is applied later via [`elemental_damage`].
pub fn physical_attack(player: &Player) -> PhysicalAttack {
    let attributes = calculate_total_attributes(player);
    let stats = calculate_total_stats(player);

    let weapon = player.equipment.get(EquipmentSlot::MainHand);
    let scaling = weapon.and_then(|item| item.base_item.weapon_scaling.as_ref());
    let element = weapon
        .and_then(|item| item.base_item.element_type)
        .unwrap_or(ElementType::Physical);

    let base = base_damage_from_stats(&stats, &attributes, scaling);
    let modifier = total_element_modifiers(player).get(element);
    let damage = ensure_finite(base as f64 * modifier, "physical attack damage");

    PhysicalAttack {
        damage: damage.floor() as u32,
        element,
    }
}

/// Skill damage before target resistance.
///
/// Base damage is amplified by skill power, then an attribute contribution
/// is added: the weapon-scaling-weighted attribute sum (unfloored) when a
/// scaled weapon is equipped, otherwise raw intelligence. The total is
/// multiplied by the element's outgoing modifier and floored, minimum 1.
pub fn skill_damage(player: &Player, base_damage: u32, scaling: f64, element: ElementType) -> u32 {
    let attributes = calculate_total_attributes(player);
    let stats = calculate_total_stats(player);
    let scaling = ensure_finite(scaling, "skill scaling");

    let amplified =
        base_damage as f64 * (1.0 + ensure_finite(stats.skill_power, "skill power") / 100.0);

    let weapon_scaling = player
        .equipment
        .get(EquipmentSlot::MainHand)
        .and_then(|item| item.base_item.weapon_scaling.as_ref());

    let attribute_weight = match weapon_scaling {
        Some(weights) => {
            let mut weighted = 0.0;
            if let Some(c) = weights.strength {
                weighted += attributes.strength.value() as f64 * ensure_finite(c, "strength scaling");
            }
            if let Some(c) = weights.intelligence {
                weighted +=
                    attributes.intelligence.value() as f64 * ensure_finite(c, "intelligence scaling");
            }
            if let Some(c) = weights.dexterity {
                weighted +=
                    attributes.dexterity.value() as f64 * ensure_finite(c, "dexterity scaling");
            }
            weighted
        }
        None => attributes.intelligence.value() as f64,
    };

    let modifier = total_element_modifiers(player).get(element);
    let total = (amplified + attribute_weight * scaling) * modifier;
    let total = ensure_finite(total, "skill damage");

    (total.floor() as i64).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::stats::tests::{test_weapon, warrior_at_level_5};
    use crate::core::types::ElementModifiers;

    fn modifiers(physical: f64, arcane: f64, fire: f64) -> ElementModifiers {
        ElementModifiers {
            physical,
            arcane,
            fire,
            lightning: 1.0,
            holy: 1.0,
        }
    }

    // === Elemental damage ===

    #[test]
    fn test_weakness_amplifies() {
        let resistance = ElementResistance {
            fire: -50.0,
            ..Default::default()
        };
        // 100 * 1.3 * 1.5 = 195
        assert_eq!(
            elemental_damage(100, ElementType::Fire, &resistance, 1.3),
            Damage(195)
        );
    }

    #[test]
    fn test_high_resistance_floors_down() {
        let resistance = ElementResistance {
            holy: 80.0,
            ..Default::default()
        };
        // 200 * 1.2 * 0.2 lands just below 48 in f64 and floors to 47.
        assert_eq!(
            elemental_damage(200, ElementType::Holy, &resistance, 1.2),
            Damage(47)
        );
    }

    #[test]
    fn test_damage_floor_is_one() {
        let resistance = ElementResistance {
            physical: 99.0,
            ..Default::default()
        };
        assert_eq!(
            elemental_damage(1, ElementType::Physical, &resistance, 1.0),
            Damage(1)
        );
    }

    #[test]
    fn test_resistance_monotonicity() {
        let mut previous = u32::MAX;
        for resist in [-100.0, -50.0, 0.0, 25.0, 50.0, 90.0] {
            let resistance = ElementResistance {
                fire: resist,
                ..Default::default()
            };
            let damage = elemental_damage(100, ElementType::Fire, &resistance, 1.0);
            assert!(
                damage.value() <= previous,
                "damage must not increase with resistance"
            );
            previous = damage.value();
        }
    }

    // === Element modifiers ===

    #[test]
    fn test_no_equipment_is_neutral() {
        let player = warrior_at_level_5();
        let total = total_element_modifiers(&player);
        for element in ElementType::all() {
            assert_eq!(total.get(element), 1.0);
        }
    }

    #[test]
    fn test_modifiers_compound_multiplicatively() {
        let mut player = warrior_at_level_5();
        let mut weapon = test_weapon(vec![]);
        weapon.base_item.element_modifiers = Some(modifiers(1.2, 1.0, 1.0));
        let mut armor = test_weapon(vec![]);
        armor.id = crate::core::types::ItemId::from("test_armor");
        armor.base_item.element_modifiers = Some(modifiers(1.1, 1.0, 0.9));
        player.equipment.set(EquipmentSlot::MainHand, Some(weapon));
        player.equipment.set(EquipmentSlot::Armor, Some(armor));

        let total = total_element_modifiers(&player);
        assert!((total.physical - 1.32).abs() < 1e-9, "1.2 * 1.1, not 1.2 + 1.1");
        assert_eq!(total.fire, 0.9);
    }

    // === Physical attack ===

    #[test]
    fn test_physical_attack_with_scaled_weapon() {
        let mut player = warrior_at_level_5();
        let mut weapon = test_weapon(vec![]);
        weapon.base_item.element_modifiers = Some(modifiers(1.5, 1.0, 1.0));
        player.equipment.set(EquipmentSlot::MainHand, Some(weapon));

        let attack = physical_attack(&player);
        assert_eq!(attack.element, ElementType::Physical);
        // base 20 + floor(STR 28 * 0.8) + floor(DEX 23 * 0.2) = 46, times 1.5.
        assert_eq!(attack.damage, 69);
    }

    #[test]
    fn test_unarmed_defaults_to_half_strength() {
        let player = warrior_at_level_5();
        let attack = physical_attack(&player);
        // base 20 + floor(STR 28 * 0.5) = 34.
        assert_eq!(attack.damage, 34);
        assert_eq!(attack.element, ElementType::Physical);
    }

    // === Skill damage ===

    #[test]
    fn test_skill_damage_unarmed_uses_intelligence() {
        let player = warrior_at_level_5();
        // 50 * 1.2 + INT 18 * 1.0 = 78.
        assert_eq!(skill_damage(&player, 50, 1.0, ElementType::Fire), 78);
    }

    #[test]
    fn test_skill_damage_with_elemental_weapon() {
        let mut player = warrior_at_level_5();
        let mut weapon = test_weapon(vec![]);
        weapon.base_item.element_modifiers = Some(modifiers(1.0, 1.0, 1.5));
        player.equipment.set(EquipmentSlot::MainHand, Some(weapon));

        // (50 * 1.2 + (28 * 0.8 + 23 * 0.2) * 1.0) * 1.5 = 130.5 -> 130.
        assert_eq!(skill_damage(&player, 50, 1.0, ElementType::Fire), 130);
    }

    #[test]
    fn test_skill_damage_minimum_one() {
        let player = warrior_at_level_5();
        assert!(skill_damage(&player, 0, 0.0, ElementType::Arcane) >= 1);
    }
}
