//! Session aggregate and the turn orchestrator.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::character::stats::calculate_total_stats;
use crate::character::types::{BaseStats, CharacterStats, Player};
use crate::combat::logic::{apply_experience, monster_attack, player_attack};
use crate::combat::types::{Monster, MonsterTemplate};
use crate::core::constants::{
    EXPERIENCE_PER_MONSTER_LEVEL, GOLD_BASE_DROP, GOLD_PER_MONSTER_LEVEL, GOLD_VARIANCE_MIN,
    GOLD_VARIANCE_SPAN, MONSTER_DAMAGE_PER_LEVEL, MONSTER_HEALTH_PER_LEVEL,
    MONSTER_LEVEL_RANGE_SLACK, STARTING_GOLD,
};
use crate::core::events::BattleEvent;
use crate::core::types::{
    Damage, Dexterity, ElementResistance, Experience, GameError, Gold, Health, Intelligence,
    ItemId, Level, Mana, Strength, Vitality, MonsterId, PlayerClass, PlayerId, SessionId,
    SessionState,
};
use crate::items::generation::roll_loot;
use crate::items::modifiers::tier_modifiers;
use crate::items::types::{BaseItem, EquipmentSlot, Item};
use crate::skills::logic::{
    apply_skill_effects, regenerate_mana, select_skill, tick_cooldowns, update_skill_timers,
};
use crate::skills::types::Skill;

/// The aggregate root. Updated only by [`process_battle_turn`] and
/// [`process_action`], both of which return a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub player: Player,
    pub current_monster: Option<Monster>,
    pub defeated_count: u64,
    pub wave: u32,
    pub state: SessionState,
    pub started_at: DateTime<Utc>,
}

/// Explicit player-driven state transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameAction {
    PauseSession,
    ResumeSession,
    EquipItem { item: Item, slot: EquipmentSlot },
    UnequipItem { slot: EquipmentSlot },
    SellItem { item_id: ItemId },
}

pub struct TurnResult {
    pub events: Vec<BattleEvent>,
    pub session: Session,
    pub dropped_items: Vec<Item>,
}

fn class_base_stats(class: PlayerClass) -> CharacterStats {
    match class {
        PlayerClass::Warrior => CharacterStats {
            max_health: Health(120),
            base_damage: Damage(15),
            defense: 0,
            critical_chance: 0.1,
            critical_damage: 1.5,
            life_steal: 0.0,
            max_mana: Mana(30),
            mana_regen: 5,
            skill_power: 5.0,
        },
        PlayerClass::Mage => CharacterStats {
            max_health: Health(80),
            base_damage: Damage(8),
            defense: 0,
            critical_chance: 0.15,
            critical_damage: 2.0,
            life_steal: 0.0,
            max_mana: Mana(100),
            mana_regen: 15,
            skill_power: 20.0,
        },
        PlayerClass::Rogue => CharacterStats {
            max_health: Health(90),
            base_damage: Damage(12),
            defense: 0,
            critical_chance: 0.25,
            critical_damage: 2.5,
            life_steal: 0.05,
            max_mana: Mana(50),
            mana_regen: 8,
            skill_power: 10.0,
        },
        PlayerClass::Paladin => CharacterStats {
            max_health: Health(110),
            base_damage: Damage(12),
            defense: 0,
            critical_chance: 0.1,
            critical_damage: 1.5,
            life_steal: 0.02,
            max_mana: Mana(60),
            mana_regen: 10,
            skill_power: 15.0,
        },
    }
}

fn class_base_attributes(class: PlayerClass) -> BaseStats {
    match class {
        PlayerClass::Warrior => BaseStats {
            strength: Strength(20),
            intelligence: Intelligence(5),
            dexterity: Dexterity(10),
            vitality: Vitality(15),
        },
        PlayerClass::Mage => BaseStats {
            strength: Strength(5),
            intelligence: Intelligence(20),
            dexterity: Dexterity(10),
            vitality: Vitality(8),
        },
        PlayerClass::Rogue => BaseStats {
            strength: Strength(10),
            intelligence: Intelligence(10),
            dexterity: Dexterity(20),
            vitality: Vitality(10),
        },
        PlayerClass::Paladin => BaseStats {
            strength: Strength(15),
            intelligence: Intelligence(10),
            dexterity: Dexterity(8),
            vitality: Vitality(12),
        },
    }
}

/// Builds a fresh level-1 player for the given class.
pub fn create_initial_player(id: PlayerId, class: PlayerClass, skills: Vec<Skill>) -> Player {
    let base_stats = class_base_stats(class);
    Player {
        id,
        name: class.name().to_string(),
        class,
        level: Level(1),
        experience: Experience(0),
        current_health: base_stats.max_health,
        current_mana: base_stats.max_mana,
        base_stats,
        base_attributes: class_base_attributes(class),
        equipment: Default::default(),
        inventory: Vec::new(),
        skills,
        skill_cooldowns: HashMap::new(),
        skill_timers: HashMap::new(),
        resources: Default::default(),
        element_resistance: ElementResistance::default(),
        gold: Gold(STARTING_GOLD),
    }
}

pub fn create_session(id: SessionId, player: Player) -> Session {
    Session {
        id,
        player,
        current_monster: None,
        defeated_count: 0,
        wave: 1,
        state: SessionState::InProgress,
        started_at: Utc::now(),
    }
}

/// Stamps a live monster out of the template pool.
///
/// Templates whose level band contains the player's level (with a small
/// tolerance above the band) are eligible; one is drawn uniformly and its
/// level jitters by -1..=1 around the player, floored at 1. Health and
/// damage scale linearly with the rolled level.
pub fn spawn_monster(
    templates: &[MonsterTemplate],
    player_level: Level,
    rng: &mut impl Rng,
) -> Result<Monster, GameError> {
    if templates.is_empty() {
        return Err(GameError::invalid_action("no monster templates available"));
    }

    let suitable: Vec<&MonsterTemplate> = templates
        .iter()
        .filter(|template| {
            player_level.value() >= template.level_range.min
                && player_level.value() <= template.level_range.max + MONSTER_LEVEL_RANGE_SLACK
        })
        .collect();

    let template = if suitable.is_empty() {
        &templates[0]
    } else {
        suitable[rng.gen_range(0..suitable.len())]
    };

    let jitter: i64 = rng.gen_range(-1..=1);
    let level = Level((player_level.value() as i64 + jitter).max(1) as u32);

    let max_health = Health(template.base_health + level.value() * MONSTER_HEALTH_PER_LEVEL);

    Ok(Monster {
        id: MonsterId(format!("{}_{:08x}", template.id, rng.gen::<u32>())),
        name: template.name.clone(),
        tier: template.tier,
        level,
        current_health: max_health,
        stats: CharacterStats {
            max_health,
            base_damage: Damage(template.base_damage + level.value() * MONSTER_DAMAGE_PER_LEVEL),
            defense: template.defense,
            critical_chance: template.critical_chance,
            critical_damage: template.critical_damage,
            life_steal: 0.0,
            max_mana: Mana(0),
            mana_regen: 0,
            skill_power: 0.0,
        },
        element_resistance: template.element_resistance,
        loot_table: template.loot_table.clone(),
    })
}

fn apply_heal_events(player: &mut Player, events: &[BattleEvent]) {
    let stats = calculate_total_stats(player);
    for event in events {
        if let BattleEvent::PlayerHeal { amount } = event {
            player.current_health = Health(
                (player.current_health.value() + amount.value()).min(stats.max_health.value()),
            );
        }
    }
}

/// Resolves one battle turn.
///
/// The sequence is fixed: spawn if needed, regenerate mana, tick cooldowns
/// and timers, fire the highest-priority eligible skill or fall back to a
/// basic attack, apply life-steal, then either handle the defeat (XP, loot,
/// gold, next spawn) or let the monster counter-attack.
pub fn process_battle_turn(
    session: &Session,
    base_items: &HashMap<ItemId, BaseItem>,
    monster_templates: &[MonsterTemplate],
    turn: u32,
    rng: &mut impl Rng,
) -> Result<TurnResult, GameError> {
    if session.state != SessionState::InProgress {
        return Err(GameError::invalid_action("session is not in progress"));
    }

    let mut events = Vec::new();
    let mut player = session.player.clone();
    let mut wave = session.wave;
    let mut defeated_count = session.defeated_count;

    let mut monster = match &session.current_monster {
        Some(monster) => monster.clone(),
        None => {
            let spawned = spawn_monster(monster_templates, player.level, rng)?;
            events.push(BattleEvent::WaveStart {
                wave,
                monster_name: spawned.name.clone(),
            });
            spawned
        }
    };

    let (regenerated_player, regenerated) = regenerate_mana(&player);
    player = regenerated_player;
    if regenerated > Mana(0) {
        events.push(BattleEvent::ManaRegenerated { amount: regenerated });
    }

    player = tick_cooldowns(&player);
    player = update_skill_timers(&player);

    let selection = select_skill(&player, Some(&monster), events.last(), turn);

    if let Some(starved) = &selection.starved {
        let outranks_choice = selection
            .chosen
            .as_ref()
            .map_or(true, |chosen| starved.priority > chosen.priority);
        if outranks_choice {
            events.push(BattleEvent::NotEnoughMana {
                skill_name: starved.name.clone(),
            });
        }
    }

    match selection.chosen {
        Some(skill) => {
            let outcome = apply_skill_effects(&skill, &player, Some(&monster), rng);
            events.extend(outcome.events);
            player = outcome.player;
            if let Some(updated) = outcome.monster {
                monster = updated;
            }
        }
        None => {
            let outcome = player_attack(&player, &monster, rng);
            apply_heal_events(&mut player, &outcome.events);
            events.extend(outcome.events);
            monster = outcome.monster;
        }
    }

    let mut dropped_items = Vec::new();

    if monster.current_health == Health(0) {
        // Skill kills do not pass through player_attack, so make sure the
        // defeat is on the record before awarding anything.
        let already_recorded = events
            .iter()
            .any(|event| matches!(event, BattleEvent::MonsterDefeated { .. }));
        if !already_recorded {
            events.push(BattleEvent::MonsterDefeated {
                monster_id: monster.id.clone(),
                monster_name: monster.name.clone(),
                experience: Experience(
                    monster.level.value() as u64 * EXPERIENCE_PER_MONSTER_LEVEL,
                ),
            });
        }

        let experience = events
            .iter()
            .find_map(|event| match event {
                BattleEvent::MonsterDefeated { experience, .. } => Some(*experience),
                _ => None,
            })
            .unwrap_or(Experience(0));

        let outcome = apply_experience(&player, experience);
        player = outcome.player;
        if outcome.leveled_up {
            events.push(BattleEvent::PlayerLevelUp {
                new_level: player.level,
            });
        }

        let drops = roll_loot(
            &monster.loot_table,
            base_items,
            monster.level,
            monster.tier,
            rng,
        );
        for item in &drops {
            events.push(BattleEvent::ItemDropped { item: item.clone() });
        }
        player.inventory.extend(drops.iter().cloned());
        dropped_items = drops;

        let base_gold = ((monster.level.value() as u64 * GOLD_PER_MONSTER_LEVEL + GOLD_BASE_DROP)
            as f64
            * (GOLD_VARIANCE_MIN + rng.gen::<f64>() * GOLD_VARIANCE_SPAN))
            .floor();
        let gold = Gold(
            (base_gold * tier_modifiers(monster.tier).gold_multiplier).floor() as u64,
        );
        if gold > Gold(0) {
            events.push(BattleEvent::GoldDropped { amount: gold });
            player.gold += gold;
        }

        events.push(BattleEvent::WaveCleared { wave });
        defeated_count += 1;
        wave += 1;

        monster = spawn_monster(monster_templates, player.level, rng)?;
        events.push(BattleEvent::WaveStart {
            wave,
            monster_name: monster.name.clone(),
        });
    } else {
        let outcome = monster_attack(&monster, &player, rng);
        events.extend(outcome.events);
        player = outcome.player;
    }

    let state = if player.current_health == Health(0) {
        SessionState::Completed
    } else {
        session.state
    };

    Ok(TurnResult {
        events,
        session: Session {
            id: session.id.clone(),
            player,
            current_monster: Some(monster),
            defeated_count,
            wave,
            state,
            started_at: session.started_at,
        },
        dropped_items,
    })
}

fn strip_weapon_skills(skills: Vec<Skill>, class: PlayerClass) -> Vec<Skill> {
    skills
        .into_iter()
        .filter(|skill| {
            let tags_required = skill
                .required_weapon_tags
                .as_ref()
                .map_or(false, |tags| !tags.is_empty());
            let class_bound = skill
                .required_class
                .as_ref()
                .map_or(false, |classes| classes.contains(&class));
            !tags_required || class_bound
        })
        .collect()
}

fn weapon_skills_for<'a>(
    catalog: &'a [Skill],
    item: &Item,
    class: PlayerClass,
) -> impl Iterator<Item = &'a Skill> + 'a {
    let tags = item.base_item.tags.clone();
    let item_class_ok = move |skill: &Skill| match &skill.required_class {
        Some(classes) if !classes.is_empty() => classes.contains(&class),
        _ => true,
    };
    catalog.iter().filter(move |skill| {
        let Some(required) = &skill.required_weapon_tags else {
            return false;
        };
        !required.is_empty()
            && required.iter().any(|tag| tags.contains(tag))
            && item_class_ok(skill)
    })
}

/// Handles an explicit player action, returning the new session.
///
/// EquipItem overwrites the slot without re-running the equip check; that
/// validation belongs to the caller. Equipping a two-handed main hand
/// weapon vacates the off hand into the inventory, and main hand changes
/// swap the weapon-granted skills in and out of the player's skill list.
pub fn process_action(
    session: &Session,
    action: GameAction,
    skill_catalog: &[Skill],
) -> Result<Session, GameError> {
    match action {
        GameAction::PauseSession => {
            if session.state != SessionState::InProgress {
                return Err(GameError::invalid_action("session is not in progress"));
            }
            Ok(Session {
                state: SessionState::Paused,
                ..session.clone()
            })
        }
        GameAction::ResumeSession => {
            if session.state != SessionState::Paused {
                return Err(GameError::invalid_action("session is not paused"));
            }
            Ok(Session {
                state: SessionState::InProgress,
                ..session.clone()
            })
        }
        GameAction::EquipItem { item, slot } => {
            let mut player = session.player.clone();

            player.inventory.retain(|owned| owned.id != item.id);

            if slot == EquipmentSlot::MainHand && item.is_two_handed() {
                if let Some(off_hand) = player.equipment.set(EquipmentSlot::OffHand, None) {
                    player.inventory.push(off_hand);
                }
            }

            if slot == EquipmentSlot::MainHand {
                let mut skills = strip_weapon_skills(player.skills, player.class);
                for weapon_skill in weapon_skills_for(skill_catalog, &item, player.class) {
                    if !skills.iter().any(|s| s.id == weapon_skill.id) {
                        skills.push(weapon_skill.clone());
                    }
                }
                player.skills = skills;
            }

            if let Some(displaced) = player.equipment.set(slot, Some(item)) {
                player.inventory.push(displaced);
            }

            Ok(Session {
                player,
                ..session.clone()
            })
        }
        GameAction::UnequipItem { slot } => {
            let mut player = session.player.clone();
            if let Some(removed) = player.equipment.set(slot, None) {
                if slot == EquipmentSlot::MainHand {
                    player.skills = strip_weapon_skills(player.skills, player.class);
                }
                player.inventory.push(removed);
            }
            Ok(Session {
                player,
                ..session.clone()
            })
        }
        GameAction::SellItem { item_id } => {
            let mut player = session.player.clone();
            let position = player
                .inventory
                .iter()
                .position(|item| item.id == item_id)
                .ok_or(GameError::ItemNotFound {
                    item_id: item_id.clone(),
                })?;
            let item = player.inventory.remove(position);
            player.gold += crate::items::value::item_value(&item);
            Ok(Session {
                player,
                ..session.clone()
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::combat::types::LevelRange;
    use crate::core::types::MonsterTier;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    pub(crate) fn rat_template() -> MonsterTemplate {
        MonsterTemplate {
            id: MonsterId::from("giant_rat"),
            name: "Giant Rat".to_string(),
            level_range: LevelRange { min: 1, max: 5 },
            base_health: 30,
            base_damage: 5,
            defense: 0,
            critical_chance: 0.05,
            critical_damage: 1.5,
            tier: MonsterTier::Common,
            element_resistance: ElementResistance::default(),
            loot_table: Vec::new(),
        }
    }

    fn fresh_session() -> Session {
        let player = create_initial_player(PlayerId::from("p1"), PlayerClass::Warrior, Vec::new());
        create_session(SessionId::from("s1"), player)
    }

    // === Construction ===

    #[test]
    fn test_initial_player_matches_class_table() {
        let player = create_initial_player(PlayerId::from("p1"), PlayerClass::Mage, Vec::new());
        assert_eq!(player.base_stats.max_mana, Mana(100));
        assert_eq!(player.base_attributes.intelligence, Intelligence(20));
        assert_eq!(player.current_health, Health(80));
        assert_eq!(player.gold, Gold(STARTING_GOLD));
        assert_eq!(player.name, "Mage");
    }

    #[test]
    fn test_spawn_monster_scales_with_level() {
        let templates = vec![rat_template()];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let monster = spawn_monster(&templates, Level(3), &mut rng).unwrap();

        assert!(monster.level.value() >= 2 && monster.level.value() <= 4);
        assert_eq!(
            monster.current_health,
            Health(30 + monster.level.value() * 10)
        );
        assert_eq!(
            monster.stats.base_damage,
            Damage(5 + monster.level.value() * 2)
        );
    }

    #[test]
    fn test_spawn_with_no_templates_fails() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(spawn_monster(&[], Level(1), &mut rng).is_err());
    }

    // === Turn processing ===

    #[test]
    fn test_turn_rejected_when_paused() {
        let mut session = fresh_session();
        session.state = SessionState::Paused;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result =
            process_battle_turn(&session, &HashMap::new(), &[rat_template()], 1, &mut rng);
        assert!(matches!(result, Err(GameError::InvalidAction { .. })));
    }

    #[test]
    fn test_first_turn_spawns_and_attacks() {
        let session = fresh_session();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result =
            process_battle_turn(&session, &HashMap::new(), &[rat_template()], 1, &mut rng)
                .unwrap();

        assert!(matches!(result.events[0], BattleEvent::WaveStart { wave: 1, .. }));
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::PlayerAttack { .. })));
        assert!(result.session.current_monster.is_some());
    }

    #[test]
    fn test_turn_is_deterministic() {
        let session = fresh_session();
        let templates = [rat_template()];
        let a = process_battle_turn(
            &session,
            &HashMap::new(),
            &templates,
            1,
            &mut ChaCha8Rng::seed_from_u64(99),
        )
        .unwrap();
        let b = process_battle_turn(
            &session,
            &HashMap::new(),
            &templates,
            1,
            &mut ChaCha8Rng::seed_from_u64(99),
        )
        .unwrap();

        assert_eq!(a.events, b.events);
        assert_eq!(a.session, b.session);
    }

    #[test]
    fn test_defeat_increments_counters_and_respawns() {
        let mut session = fresh_session();
        let mut weakling = spawn_monster(
            &[rat_template()],
            Level(1),
            &mut ChaCha8Rng::seed_from_u64(5),
        )
        .unwrap();
        weakling.current_health = Health(1);
        session.current_monster = Some(weakling);

        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let result =
            process_battle_turn(&session, &HashMap::new(), &[rat_template()], 1, &mut rng)
                .unwrap();

        assert_eq!(result.session.defeated_count, 1);
        assert_eq!(result.session.wave, 2);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::MonsterDefeated { .. })));
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::WaveCleared { wave: 1 })));
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::GoldDropped { .. })));
        // A fresh monster is already waiting.
        let next = result.session.current_monster.unwrap();
        assert!(next.current_health > Health(0));
    }

    // === Actions ===

    #[test]
    fn test_pause_resume_round_trip() {
        let session = fresh_session();
        let paused = process_action(&session, GameAction::PauseSession, &[]).unwrap();
        assert_eq!(paused.state, SessionState::Paused);

        let err = process_action(&paused, GameAction::PauseSession, &[]);
        assert!(matches!(err, Err(GameError::InvalidAction { .. })));

        let resumed = process_action(&paused, GameAction::ResumeSession, &[]).unwrap();
        assert_eq!(resumed.state, SessionState::InProgress);
    }

    #[test]
    fn test_sell_missing_item_fails() {
        let session = fresh_session();
        let result = process_action(
            &session,
            GameAction::SellItem {
                item_id: ItemId::from("nope"),
            },
            &[],
        );
        assert!(matches!(result, Err(GameError::ItemNotFound { .. })));
    }
}
