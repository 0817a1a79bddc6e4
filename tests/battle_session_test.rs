//! Integration test: Session Orchestration
//!
//! Drives whole battle turns through the public API: spawn, wave
//! progression on a kill, defeat handling, pause/resume gating, and the
//! equipment actions that swap weapon-granted skills in and out.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use darkspire::character::stats::calculate_total_stats;
use darkspire::character::types::Player;
use darkspire::content::GameContent;
use darkspire::core::events::BattleEvent;
use darkspire::core::session::{
    create_initial_player, create_session, process_action, process_battle_turn, spawn_monster,
    GameAction, Session,
};
use darkspire::core::types::{
    Dexterity, Experience, Health, ItemId, Level, PlayerClass, PlayerId, SessionId, SessionState,
    SkillId,
};
use darkspire::items::generation::generate_item;
use darkspire::items::types::{EquipmentSlot, ItemRarity};

fn loaded_content() -> GameContent {
    GameContent::load_default().expect("bundled content must parse")
}

fn fresh_session(class: PlayerClass) -> (GameContent, Session) {
    let content = loaded_content();
    let skills = content
        .starting_skills(class)
        .expect("class skills resolve against the catalog");
    let player = create_initial_player(PlayerId::from("tester"), class, skills);
    let session = create_session(SessionId::from("test_session"), player);
    (content, session)
}

fn item_from_data(content: &GameContent, id: &str, rng: &mut ChaCha8Rng) -> darkspire::items::types::Item {
    let base = content
        .base_items
        .get(&ItemId::from(id))
        .unwrap_or_else(|| panic!("{id} ships in the bundled data"));
    generate_item(base, Level(1), ItemRarity::Common, rng)
}

// =========================================================================
// Turn processing: spawn, determinism, wave progression
// =========================================================================

#[test]
fn test_first_turn_spawns_a_monster_and_announces_the_wave() {
    let (content, session) = fresh_session(PlayerClass::Warrior);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let result = process_battle_turn(
        &session,
        &content.base_items,
        &content.monster_templates,
        1,
        &mut rng,
    )
    .expect("turn on a fresh session succeeds");

    assert!(result.session.current_monster.is_some());
    assert!(
        result
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::WaveStart { wave: 1, .. })),
        "the first turn should announce wave 1"
    );
}

#[test]
fn test_identical_seeds_give_identical_turns() {
    let (content, session) = fresh_session(PlayerClass::Rogue);

    let mut rng_a = ChaCha8Rng::seed_from_u64(77);
    let mut rng_b = ChaCha8Rng::seed_from_u64(77);
    let a = process_battle_turn(
        &session,
        &content.base_items,
        &content.monster_templates,
        1,
        &mut rng_a,
    )
    .expect("turn succeeds");
    let b = process_battle_turn(
        &session,
        &content.base_items,
        &content.monster_templates,
        1,
        &mut rng_b,
    )
    .expect("turn succeeds");

    assert_eq!(a.session, b.session, "same seed must replay identically");
    assert_eq!(a.events, b.events);
}

#[test]
fn test_killing_blow_advances_the_wave() {
    let (content, mut session) = fresh_session(PlayerClass::Warrior);
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    let mut monster = spawn_monster(&content.monster_templates, Level(1), &mut rng)
        .expect("templates exist for level 1");
    monster.current_health = Health(1);
    let monster_level = monster.level;
    session.current_monster = Some(monster);

    let result = process_battle_turn(
        &session,
        &content.base_items,
        &content.monster_templates,
        1,
        &mut rng,
    )
    .expect("turn succeeds");

    let expected_xp = Experience(u64::from(monster_level.value()) * 10);
    assert!(
        result.events.iter().any(|e| matches!(
            e,
            BattleEvent::MonsterDefeated { experience, .. } if *experience == expected_xp
        )),
        "a 1 HP monster dies to any hit and pays level x 10 experience"
    );
    assert!(result
        .events
        .iter()
        .any(|e| matches!(e, BattleEvent::GoldDropped { .. })));
    assert!(result
        .events
        .iter()
        .any(|e| matches!(e, BattleEvent::WaveCleared { wave: 1 })));
    assert!(
        result
            .events
            .iter()
            .any(|e| matches!(e, BattleEvent::WaveStart { wave: 2, .. })),
        "the next wave spawns within the same turn"
    );
    assert_eq!(result.session.defeated_count, 1);
    assert_eq!(result.session.wave, 2);
    assert!(
        result.session.current_monster.is_some(),
        "the replacement monster is already on the field"
    );
}

#[test]
fn test_player_defeat_completes_the_session() {
    let (content, mut session) = fresh_session(PlayerClass::Mage);
    let mut rng = ChaCha8Rng::seed_from_u64(13);

    let mut monster = spawn_monster(&content.monster_templates, Level(1), &mut rng)
        .expect("templates exist for level 1");
    monster.current_health = Health(1_000_000);
    session.current_monster = Some(monster);
    session.player.current_health = Health(1);
    // Second Wind would trigger below 30% health and heal through the kill.
    session
        .player
        .skills
        .retain(|s| s.id != SkillId::from("second_wind"));

    let result = process_battle_turn(
        &session,
        &content.base_items,
        &content.monster_templates,
        1,
        &mut rng,
    )
    .expect("turn succeeds");

    assert_eq!(result.session.state, SessionState::Completed);
    assert!(result
        .events
        .iter()
        .any(|e| matches!(e, BattleEvent::PlayerDefeated)));
}

// =========================================================================
// Pause / resume gating
// =========================================================================

#[test]
fn test_paused_sessions_reject_battle_turns() {
    let (content, session) = fresh_session(PlayerClass::Paladin);
    let mut rng = ChaCha8Rng::seed_from_u64(21);

    let paused = process_action(&session, GameAction::PauseSession, &content.skills)
        .expect("pausing an in-progress session succeeds");
    assert_eq!(paused.state, SessionState::Paused);

    assert!(
        process_battle_turn(
            &paused,
            &content.base_items,
            &content.monster_templates,
            1,
            &mut rng,
        )
        .is_err(),
        "turns must not run while paused"
    );

    let resumed = process_action(&paused, GameAction::ResumeSession, &content.skills)
        .expect("resuming a paused session succeeds");
    assert_eq!(resumed.state, SessionState::InProgress);

    assert!(
        process_action(&resumed, GameAction::ResumeSession, &content.skills).is_err(),
        "resuming an in-progress session is an invalid action"
    );
}

// =========================================================================
// Equipment actions and weapon-granted skills
// =========================================================================

#[test]
fn test_two_handed_weapon_vacates_the_off_hand() {
    let (content, mut session) = fresh_session(PlayerClass::Warrior);
    let mut rng = ChaCha8Rng::seed_from_u64(29);

    let shield = item_from_data(&content, "wooden_shield", &mut rng);
    let shield_id = shield.id.clone();
    session.player.equipment.set(EquipmentSlot::OffHand, Some(shield));

    let axe = item_from_data(&content, "great_axe", &mut rng);
    let axe_id = axe.id.clone();

    let after = process_action(
        &session,
        GameAction::EquipItem {
            item: axe,
            slot: EquipmentSlot::MainHand,
        },
        &content.skills,
    )
    .expect("equip succeeds");

    assert!(after
        .player
        .equipment
        .get(EquipmentSlot::MainHand)
        .is_some_and(|item| item.id == axe_id));
    assert!(
        after.player.equipment.get(EquipmentSlot::OffHand).is_none(),
        "a two-handed weapon needs both hands"
    );
    assert!(
        after.player.inventory.iter().any(|item| item.id == shield_id),
        "the displaced shield returns to the inventory"
    );
}

#[test]
fn test_weapon_swap_grants_and_strips_weapon_skills() {
    let (content, session) = fresh_session(PlayerClass::Warrior);
    let mut rng = ChaCha8Rng::seed_from_u64(37);
    let slash = SkillId::from("slash");

    assert!(
        !session.player.skills.iter().any(|s| s.id == slash),
        "slash only comes from a bladed weapon"
    );

    let sword = item_from_data(&content, "iron_sword", &mut rng);
    let with_sword = process_action(
        &session,
        GameAction::EquipItem {
            item: sword,
            slot: EquipmentSlot::MainHand,
        },
        &content.skills,
    )
    .expect("equip succeeds");
    assert!(with_sword.player.skills.iter().any(|s| s.id == slash));

    let bare = process_action(
        &with_sword,
        GameAction::UnequipItem {
            slot: EquipmentSlot::MainHand,
        },
        &content.skills,
    )
    .expect("unequip succeeds");
    assert!(!bare.player.skills.iter().any(|s| s.id == slash));
    assert!(
        bare.player
            .skills
            .iter()
            .any(|s| s.id == SkillId::from("power_strike")),
        "class-granted skills survive the swap"
    );
}

// =========================================================================
// Derived stats through equipment
// =========================================================================

fn crit_ring() -> darkspire::items::types::Item {
    use darkspire::items::types::{BaseItem, Item, ItemModifier, ItemTag, ItemType};

    Item {
        id: ItemId::from("test_crit_ring"),
        base_item: BaseItem {
            id: ItemId::from("test_crit_ring"),
            name: "Test Crit Ring".to_string(),
            item_type: ItemType::Accessory,
            tags: vec![ItemTag::Ring],
            base_modifiers: vec![ItemModifier::CriticalChance { percentage: 0.10 }],
            weapon_scaling: None,
            required_level: None,
            required_class: None,
            element_type: None,
            element_modifiers: None,
        },
        rarity: ItemRarity::Common,
        prefix: None,
        suffix: None,
        level: Level(1),
    }
}

fn dexterous_player(content: &GameContent) -> Player {
    let skills = content
        .starting_skills(PlayerClass::Rogue)
        .expect("rogue skills resolve");
    let mut player = create_initial_player(PlayerId::from("dex"), PlayerClass::Rogue, skills);
    player.base_attributes.dexterity = Dexterity(500);
    player
}

#[test]
fn test_equipment_crit_applies_after_the_dexterity_cap() {
    let content = loaded_content();
    let mut player = dexterous_player(&content);

    let capped = calculate_total_stats(&player).critical_chance;
    assert!(
        (capped - 0.75).abs() < 1e-9,
        "500 dexterity should pin attribute crit at the 75% cap, got {capped}"
    );

    player.equipment.set(EquipmentSlot::Ring1, Some(crit_ring()));
    let with_ring = calculate_total_stats(&player).critical_chance;
    assert!(
        (with_ring - 0.85).abs() < 1e-9,
        "equipment crit stacks past the attribute cap, got {with_ring}"
    );
}
