//! Attack resolution and experience application.

use rand::Rng;

use super::damage::{base_damage_from_stats, elemental_damage, total_element_modifiers};
use super::types::Monster;
use crate::character::stats::{
    calculate_total_attributes, calculate_total_resistance, calculate_total_stats,
};
use crate::character::types::Player;
use crate::core::constants::{
    EXPERIENCE_PER_LEVEL, EXPERIENCE_PER_MONSTER_LEVEL, LEVEL_UP_DAMAGE_GAIN,
    LEVEL_UP_HEALTH_GAIN, LEVEL_UP_MANA_GAIN, LEVEL_UP_MANA_REGEN_GAIN,
};
use crate::core::events::BattleEvent;
use crate::core::types::{Damage, ElementType, Experience, Health, Level, Mana};
use crate::items::types::EquipmentSlot;

pub struct PlayerAttackOutcome {
    pub events: Vec<BattleEvent>,
    pub monster: Monster,
}

pub struct MonsterAttackOutcome {
    pub events: Vec<BattleEvent>,
    pub player: Player,
}

pub struct LevelUpOutcome {
    pub player: Player,
    pub leveled_up: bool,
}

/// Resolves one basic attack from the player.
///
/// Rolls crit, routes damage through the element pipeline using the main
/// hand weapon's element (Physical when unarmed), and emits the attack,
/// life-steal heal and defeat events. The heal is only reported here; the
/// orchestrator applies it to the player.
pub fn player_attack(
    player: &Player,
    monster: &Monster,
    rng: &mut impl Rng,
) -> PlayerAttackOutcome {
    let mut events = Vec::new();

    let stats = calculate_total_stats(player);
    let attributes = calculate_total_attributes(player);

    let weapon = player.equipment.get(EquipmentSlot::MainHand);
    let scaling = weapon.and_then(|item| item.base_item.weapon_scaling.as_ref());
    let element = weapon
        .and_then(|item| item.base_item.element_type)
        .unwrap_or(ElementType::Physical);

    let is_critical = rng.gen::<f64>() < stats.critical_chance;
    let critical_multiplier = if is_critical { stats.critical_damage } else { 1.0 };

    let base = base_damage_from_stats(&stats, &attributes, scaling);
    let critical_base = (base as f64 * critical_multiplier).floor() as u32;

    let attacker_modifier = total_element_modifiers(player).get(element);
    let damage = elemental_damage(
        critical_base,
        element,
        &monster.element_resistance,
        attacker_modifier,
    );

    let mut updated = monster.clone();
    updated.current_health = updated.current_health.saturating_sub(Health(damage.value()));

    events.push(BattleEvent::PlayerAttack {
        damage,
        is_critical,
        target_id: updated.id.clone(),
        target_name: updated.name.clone(),
    });

    if stats.life_steal > 0.0 {
        let heal = (damage.value() as f64 * stats.life_steal).floor() as u32;
        if heal > 0 {
            events.push(BattleEvent::PlayerHeal {
                amount: Health(heal),
            });
        }
    }

    if updated.current_health == Health(0) {
        events.push(BattleEvent::MonsterDefeated {
            monster_id: updated.id.clone(),
            monster_name: updated.name.clone(),
            experience: Experience(updated.level.value() as u64 * EXPERIENCE_PER_MONSTER_LEVEL),
        });
    }

    PlayerAttackOutcome {
        events,
        monster: updated,
    }
}

/// Resolves the monster's counter-attack.
///
/// The monster's flat damage rolls crit, is reduced by the player's defense
/// mitigation (defense / (defense + 100)) and then by the player's Physical
/// resistance.
pub fn monster_attack(
    monster: &Monster,
    player: &Player,
    rng: &mut impl Rng,
) -> MonsterAttackOutcome {
    let mut events = Vec::new();
    let stats = calculate_total_stats(player);

    let is_critical = rng.gen::<f64>() < monster.stats.critical_chance;
    let critical_multiplier = if is_critical {
        monster.stats.critical_damage
    } else {
        1.0
    };
    let critical_base =
        (monster.stats.base_damage.value() as f64 * critical_multiplier).floor() as u32;

    let defense_reduction = stats.defense as f64 / (stats.defense as f64 + 100.0);
    let mitigated = (critical_base as f64 * (1.0 - defense_reduction)).floor() as u32;

    let resistance = calculate_total_resistance(player);
    let damage = elemental_damage(mitigated, ElementType::Physical, &resistance, 1.0);

    let mut updated = player.clone();
    updated.current_health = updated.current_health.saturating_sub(Health(damage.value()));

    events.push(BattleEvent::MonsterAttack {
        damage,
        is_critical,
        attacker_id: monster.id.clone(),
        attacker_name: monster.name.clone(),
    });

    if updated.current_health == Health(0) {
        events.push(BattleEvent::PlayerDefeated);
    }

    MonsterAttackOutcome {
        events,
        player: updated,
    }
}

/// Accumulates experience and advances at most one level per call.
///
/// On level-up the overflow experience carries forward, the base stat block
/// gains flat increases and the same flat amounts are restored to current
/// health and mana, clamped to the new maximums.
pub fn apply_experience(player: &Player, experience: Experience) -> LevelUpOutcome {
    let mut updated = player.clone();
    let new_experience = updated.experience + experience;
    let threshold = Experience(updated.level.value() as u64 * EXPERIENCE_PER_LEVEL);

    if new_experience < threshold {
        updated.experience = new_experience;
        return LevelUpOutcome {
            player: updated,
            leveled_up: false,
        };
    }

    updated.level = Level(updated.level.value() + 1);
    updated.experience = new_experience.saturating_sub(threshold);
    updated.base_stats.max_health += Health(LEVEL_UP_HEALTH_GAIN);
    updated.base_stats.base_damage += Damage(LEVEL_UP_DAMAGE_GAIN);
    updated.base_stats.max_mana += Mana(LEVEL_UP_MANA_GAIN);
    updated.base_stats.mana_regen += LEVEL_UP_MANA_REGEN_GAIN;

    let stats = calculate_total_stats(&updated);
    updated.current_health =
        Health((updated.current_health.value() + LEVEL_UP_HEALTH_GAIN).min(stats.max_health.value()));
    updated.current_mana =
        Mana((updated.current_mana.value() + LEVEL_UP_MANA_GAIN).min(stats.max_mana.value()));

    LevelUpOutcome {
        player: updated,
        leveled_up: true,
    }
}
