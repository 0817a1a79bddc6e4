//! Skill eligibility, selection and effect application.

use rand::Rng;

use super::types::{Skill, SkillEffect, SkillTargetType, SkillType, TriggerCondition};
use crate::character::stats::calculate_total_stats;
use crate::character::types::Player;
use crate::combat::damage::{elemental_damage, skill_damage};
use crate::combat::types::Monster;
use crate::core::constants::MIN_AUTO_TRIGGER_INTERVAL;
use crate::core::events::BattleEvent;
use crate::core::types::{Health, Mana};
use crate::items::types::EquipmentSlot;

/// Everything trigger conditions may inspect.
pub struct TriggerContext<'a> {
    pub player: &'a Player,
    pub monster: Option<&'a Monster>,
    pub last_event: Option<&'a BattleEvent>,
    pub turn: u32,
}

/// True when every condition holds. An empty list always passes.
pub fn check_trigger_conditions(conditions: &[TriggerCondition], ctx: &TriggerContext) -> bool {
    conditions.iter().all(|condition| match *condition {
        TriggerCondition::Always => true,
        TriggerCondition::HealthBelow { percentage } => {
            let stats = calculate_total_stats(ctx.player);
            let fraction =
                ctx.player.current_health.value() as f64 / stats.max_health.value() as f64;
            fraction < percentage
        }
        TriggerCondition::ManaAbove { percentage } => {
            let stats = calculate_total_stats(ctx.player);
            if stats.max_mana.value() == 0 {
                return false;
            }
            let fraction = ctx.player.current_mana.value() as f64 / stats.max_mana.value() as f64;
            fraction >= percentage
        }
        TriggerCondition::EnemyHealthBelow { percentage } => match ctx.monster {
            Some(monster) => {
                let fraction =
                    monster.current_health.value() as f64 / monster.stats.max_health.value() as f64;
                fraction < percentage
            }
            None => false,
        },
        TriggerCondition::CriticalHit => matches!(
            ctx.last_event,
            Some(BattleEvent::PlayerAttack { is_critical: true, .. })
        ),
        TriggerCondition::OnKill => {
            matches!(ctx.last_event, Some(BattleEvent::MonsterDefeated { .. }))
        }
        TriggerCondition::TurnInterval { interval } => {
            interval > 0 && ctx.turn % interval == 0
        }
    })
}

/// Class and weapon-tag gates. A weapon-tag requirement needs a main hand
/// item carrying at least one of the listed tags.
pub fn skill_restrictions_met(skill: &Skill, player: &Player) -> bool {
    if let Some(classes) = &skill.required_class {
        if !classes.contains(&player.class) {
            return false;
        }
    }

    if let Some(tags) = &skill.required_weapon_tags {
        if !tags.is_empty() {
            let Some(weapon) = player.equipment.get(EquipmentSlot::MainHand) else {
                return false;
            };
            if !tags.iter().any(|tag| weapon.has_tag(*tag)) {
                return false;
            }
        }
    }

    true
}

/// True when the player can pay for the skill. Passives are free; Basic and
/// Active skills need both the mana cost and full coverage of the declared
/// color cost.
pub fn resources_available(skill: &Skill, player: &Player) -> bool {
    match skill.skill_type {
        SkillType::Passive => true,
        SkillType::Basic | SkillType::Active => {
            player.current_mana.value() >= skill.mana_cost
                && player.resources.covers(&skill.resource_cost)
        }
    }
}

fn counters_ready(skill: &Skill, player: &Player) -> bool {
    player.skill_cooldowns.get(&skill.id).copied().unwrap_or(0) == 0
        && player.skill_timers.get(&skill.id).copied().unwrap_or(0) == 0
}

/// The turn's skill choice: at most one skill fires; the highest-priority
/// skill blocked only by its resource cost is reported for the
/// NotEnoughMana event.
pub struct SkillSelection {
    pub chosen: Option<Skill>,
    pub starved: Option<Skill>,
}

/// Picks the highest-priority eligible skill. Lower-priority eligible
/// skills are skipped for this turn, not queued.
pub fn select_skill(
    player: &Player,
    monster: Option<&Monster>,
    last_event: Option<&BattleEvent>,
    turn: u32,
) -> SkillSelection {
    let ctx = TriggerContext {
        player,
        monster,
        last_event,
        turn,
    };

    let mut chosen: Option<&Skill> = None;
    let mut starved: Option<&Skill> = None;

    for skill in &player.skills {
        if !counters_ready(skill, player)
            || !skill_restrictions_met(skill, player)
            || !check_trigger_conditions(&skill.trigger_conditions, &ctx)
        {
            continue;
        }

        if !resources_available(skill, player) {
            if starved.map_or(true, |current| skill.priority > current.priority) {
                starved = Some(skill);
            }
            continue;
        }

        if chosen.map_or(true, |current| skill.priority > current.priority) {
            chosen = Some(skill);
        }
    }

    SkillSelection {
        chosen: chosen.cloned(),
        starved: starved.cloned(),
    }
}

/// Decrements every cooldown by one turn, dropping entries that reach zero.
pub fn tick_cooldowns(player: &Player) -> Player {
    let mut updated = player.clone();
    updated.skill_cooldowns = player
        .skill_cooldowns
        .iter()
        .filter(|(_, &cooldown)| cooldown > 1)
        .map(|(id, &cooldown)| (id.clone(), cooldown - 1))
        .collect();
    updated
}

/// Decrements every auto-trigger timer by one turn, floored at zero.
pub fn update_skill_timers(player: &Player) -> Player {
    let mut updated = player.clone();
    updated.skill_timers = player
        .skill_timers
        .iter()
        .map(|(id, &timer)| (id.clone(), timer.saturating_sub(1)))
        .collect();
    updated
}

pub struct SkillOutcome {
    pub events: Vec<BattleEvent>,
    pub player: Player,
    pub monster: Option<Monster>,
}

/// Resolves one skill use.
///
/// Pays the mana and color costs (Passives are free and announce
/// themselves with PassiveTriggered instead of SkillUsed), arms the
/// cooldown and the auto-trigger timer, rolls Basic resource generation,
/// then applies Damage, Heal and LifeDrain effects in declaration order.
/// Buff, Debuff, Stun and DamageOverTime declarations are accepted but
/// currently inert.
pub fn apply_skill_effects(
    skill: &Skill,
    player: &Player,
    monster: Option<&Monster>,
    rng: &mut impl Rng,
) -> SkillOutcome {
    let mut events = Vec::new();
    let mut updated_player = player.clone();
    let mut updated_monster = monster.cloned();

    let stats = calculate_total_stats(&updated_player);

    match skill.skill_type {
        SkillType::Passive => {
            events.push(BattleEvent::PassiveTriggered {
                skill_id: skill.id.clone(),
                skill_name: skill.name.clone(),
            });
        }
        SkillType::Basic | SkillType::Active => {
            updated_player.current_mana =
                updated_player.current_mana.saturating_sub(Mana(skill.mana_cost));
            updated_player.resources.consume(&skill.resource_cost);
            events.push(BattleEvent::SkillUsed {
                skill_id: skill.id.clone(),
                skill_name: skill.name.clone(),
                mana_cost: skill.mana_cost,
            });
        }
    }

    if skill.cooldown > 0 {
        updated_player
            .skill_cooldowns
            .insert(skill.id.clone(), skill.cooldown);
    }
    updated_player.skill_timers.insert(
        skill.id.clone(),
        MIN_AUTO_TRIGGER_INTERVAL.max(skill.cooldown + 1),
    );

    if skill.skill_type == SkillType::Basic {
        for gain in &skill.resource_gain {
            if rng.gen::<f64>() < gain.chance {
                updated_player.resources.grant(gain.color, gain.amount);
            }
        }
    }

    for effect in &skill.effects {
        match *effect {
            SkillEffect::Damage {
                base_damage,
                scaling,
                element,
            } => {
                if skill.target_type != SkillTargetType::Enemy {
                    continue;
                }
                let Some(target) = updated_monster.as_mut() else {
                    continue;
                };
                let raw = skill_damage(&updated_player, base_damage, scaling, element);
                let damage = elemental_damage(raw, element, &target.element_resistance, 1.0);
                target.current_health =
                    target.current_health.saturating_sub(Health(damage.value()));
                events.push(BattleEvent::SkillDamage {
                    skill_name: skill.name.clone(),
                    damage,
                    target_id: target.id.clone(),
                });
            }
            SkillEffect::Heal { base_heal, scaling } => {
                if skill.target_type != SkillTargetType::Self_ {
                    continue;
                }
                let amount = (base_heal as f64 + stats.skill_power * scaling).floor() as u32;
                let headroom = stats
                    .max_health
                    .value()
                    .saturating_sub(updated_player.current_health.value());
                let actual = amount.min(headroom);
                updated_player.current_health += Health(actual);
                events.push(BattleEvent::SkillHeal {
                    skill_name: skill.name.clone(),
                    amount: Health(actual),
                });
            }
            SkillEffect::LifeDrain { percentage } => {
                let last_damage = events.iter().rev().find_map(|event| match event {
                    BattleEvent::SkillDamage { damage, .. } => Some(damage.value()),
                    _ => None,
                });
                let Some(damage) = last_damage else {
                    continue;
                };
                let drain = (damage as f64 * percentage).floor() as u32;
                let headroom = stats
                    .max_health
                    .value()
                    .saturating_sub(updated_player.current_health.value());
                let actual = drain.min(headroom);
                updated_player.current_health += Health(actual);
                events.push(BattleEvent::PlayerHeal {
                    amount: Health(actual),
                });
            }
            SkillEffect::Buff { .. }
            | SkillEffect::Debuff { .. }
            | SkillEffect::Stun { .. }
            | SkillEffect::DamageOverTime { .. } => {}
        }
    }

    SkillOutcome {
        events,
        player: updated_player,
        monster: updated_monster,
    }
}

/// Applies one turn of mana regeneration, clamped to max mana.
pub fn regenerate_mana(player: &Player) -> (Player, Mana) {
    let stats = calculate_total_stats(player);
    let headroom = stats.max_mana.value().saturating_sub(player.current_mana.value());
    let regenerated = stats.mana_regen.min(headroom);

    let mut updated = player.clone();
    updated.current_mana += Mana(regenerated);
    (updated, Mana(regenerated))
}
