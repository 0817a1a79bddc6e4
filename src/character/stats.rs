//! Derived attribute and stat queries.
//!
//! All functions here are pure: the same player value always produces the
//! same totals, and nothing is cached or mutated.

use super::types::{BaseStats, CharacterStats, Player};
use crate::core::constants::{
    ATTRIBUTES_PER_LEVEL, CRIT_CHANCE_CAP, CRIT_CHANCE_PER_DEXTERITY, HEALTH_PER_VITALITY,
    MANA_PER_INTELLIGENCE, RESISTANCE_CAP,
};
use crate::core::types::{
    ensure_finite, Damage, Dexterity, ElementResistance, Health, Intelligence, Mana, Strength,
    Vitality,
};
use crate::items::types::ItemModifier;

/// Base attributes plus equipment bonuses plus the flat per-level gain.
pub fn calculate_total_attributes(player: &Player) -> BaseStats {
    let mut total = player.base_attributes;

    for item in player.equipment.iter_equipped() {
        for modifier in item.all_modifiers() {
            match *modifier {
                ItemModifier::IncreaseStrength { value } => total.strength += Strength(value),
                ItemModifier::IncreaseIntelligence { value } => {
                    total.intelligence += Intelligence(value)
                }
                ItemModifier::IncreaseDexterity { value } => total.dexterity += Dexterity(value),
                ItemModifier::IncreaseVitality { value } => total.vitality += Vitality(value),
                _ => {}
            }
        }
    }

    let level_bonus = (player.level.value().saturating_sub(1)) * ATTRIBUTES_PER_LEVEL;
    total.strength += Strength(level_bonus);
    total.intelligence += Intelligence(level_bonus);
    total.dexterity += Dexterity(level_bonus);
    total.vitality += Vitality(level_bonus);

    total
}

/// Effective combat stats: class baseline, attribute-derived bonuses, then
/// every equipped item's modifiers summed in.
///
/// Any non-finite intermediate aborts immediately. A NaN crit chance or
/// skill power means broken content data and must not reach combat math.
pub fn calculate_total_stats(player: &Player) -> CharacterStats {
    let attributes = calculate_total_attributes(player);
    let mut stats = player.base_stats;

    stats.max_health += Health(attributes.vitality.value() * HEALTH_PER_VITALITY);
    stats.max_mana += Mana(attributes.intelligence.value() * MANA_PER_INTELLIGENCE);
    stats.critical_chance = (stats.critical_chance
        + attributes.dexterity.value() as f64 * CRIT_CHANCE_PER_DEXTERITY)
        .min(CRIT_CHANCE_CAP);

    for item in player.equipment.iter_equipped() {
        for modifier in item.all_modifiers() {
            match *modifier {
                ItemModifier::IncreaseDamage { value } => stats.base_damage += Damage(value),
                ItemModifier::IncreaseHealth { value } => stats.max_health += Health(value),
                ItemModifier::IncreaseDefense { value } => stats.defense += value,
                ItemModifier::IncreaseMana { value } => stats.max_mana += Mana(value),
                ItemModifier::ManaRegen { value } => stats.mana_regen += value,
                ItemModifier::LifeSteal { percentage } => stats.life_steal += percentage,
                ItemModifier::CriticalChance { percentage } => stats.critical_chance += percentage,
                ItemModifier::CriticalDamage { multiplier } => stats.critical_damage += multiplier,
                ItemModifier::SkillPower { percentage } => stats.skill_power += percentage,
                _ => {}
            }
        }
    }

    stats.critical_chance = ensure_finite(stats.critical_chance, "critical chance");
    stats.critical_damage = ensure_finite(stats.critical_damage, "critical damage");
    stats.life_steal = ensure_finite(stats.life_steal, "life steal");
    stats.skill_power = ensure_finite(stats.skill_power, "skill power");

    stats
}

/// Innate resistances plus equipment ElementResistance modifiers, each
/// element capped.
pub fn calculate_total_resistance(player: &Player) -> ElementResistance {
    let mut total = player.element_resistance;

    for item in player.equipment.iter_equipped() {
        for modifier in item.all_modifiers() {
            if let ItemModifier::ElementResistance { element, value } = *modifier {
                let slot = total.get_mut(element);
                *slot = (*slot + ensure_finite(value, "element resistance")).min(RESISTANCE_CAP);
            }
        }
    }

    total
}
