//! Headless engine: runs sessions turn by turn without any frontend,
//! for batch simulation and balance checks.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::content::{ContentError, GameContent};
use crate::core::events::BattleEvent;
use crate::core::session::{
    create_initial_player, create_session, process_action, process_battle_turn, GameAction,
    Session,
};
use crate::core::types::{GameError, Level, PlayerClass, PlayerId, SessionId, SessionState};
use crate::items::equipment::valid_slots_for_item;
use crate::items::generation::generate_item;
use crate::items::types::{EquipmentSlot, Item, ItemModifier, ItemRarity};

#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub class: PlayerClass,
    pub max_turns: u32,
    pub seed: u64,
    pub auto_equip: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            class: PlayerClass::Warrior,
            max_turns: 1000,
            seed: 0,
            auto_equip: true,
        }
    }
}

/// Aggregate results of a simulation run.
#[derive(Debug, Clone, Default)]
pub struct SimulationStats {
    pub turns_run: u32,
    pub monsters_defeated: u64,
    pub final_level: u32,
    pub final_wave: u32,
    pub gold: u64,
    pub items_dropped: usize,
    pub skills_used: u64,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub critical_hits: u64,
    pub level_ups: u32,
    pub died: bool,
}

/// Rough desirability score used by auto-equip. Weighted sum of the item's
/// modifiers, nudged up by rarity so a Legendary sidegrade wins ties.
pub fn score_item(item: &Item) -> f64 {
    let mut score = 0.0;
    for modifier in item.all_modifiers() {
        score += match *modifier {
            ItemModifier::IncreaseDamage { value } => value as f64 * 2.0,
            ItemModifier::IncreaseHealth { value } => value as f64 * 0.5,
            ItemModifier::IncreaseDefense { value } => value as f64,
            ItemModifier::IncreaseMana { value } => value as f64 * 0.3,
            ItemModifier::ManaRegen { value } => value as f64 * 2.0,
            ItemModifier::IncreaseStrength { value }
            | ItemModifier::IncreaseIntelligence { value }
            | ItemModifier::IncreaseDexterity { value }
            | ItemModifier::IncreaseVitality { value } => value as f64 * 1.5,
            ItemModifier::LifeSteal { percentage } => percentage * 100.0,
            ItemModifier::CriticalChance { percentage } => percentage * 200.0,
            ItemModifier::CriticalDamage { multiplier } => multiplier * 50.0,
            ItemModifier::SkillPower { percentage } => percentage,
            ItemModifier::ElementResistance { value, .. } => value * 0.5,
        };
    }
    let rarity_bonus = match item.rarity {
        ItemRarity::Common => 1.0,
        ItemRarity::Magic => 1.1,
        ItemRarity::Rare => 1.25,
        ItemRarity::Legendary => 1.5,
    };
    score * rarity_bonus
}

pub struct HeadlessEngine {
    content: GameContent,
    session: Session,
    rng: ChaCha8Rng,
    turn: u32,
    auto_equip: bool,
}

impl HeadlessEngine {
    /// Creates an engine with a fresh character of the configured class,
    /// granted their class skills and wearing their starter kit.
    pub fn new(content: GameContent, config: EngineConfig) -> Result<Self, ContentError> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let skills = content.starting_skills(config.class)?;
        let mut player = create_initial_player(
            PlayerId(format!("sim_{}", config.seed)),
            config.class,
            skills,
        );

        for base_item in content.starter_items(config.class) {
            let item = generate_item(base_item, Level(1), ItemRarity::Common, &mut rng);
            let open_slot = valid_slots_for_item(&item, player.class, player.level.value())
                .into_iter()
                .find(|&slot| player.equipment.get(slot).is_none());
            if let Some(slot) = open_slot {
                player.equipment.set(slot, Some(item));
            }
        }

        let session = create_session(SessionId(format!("session_{}", config.seed)), player);

        Ok(Self {
            content,
            session,
            rng,
            turn: 0,
            auto_equip: config.auto_equip,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Advances the session one turn.
    pub fn step(&mut self) -> Result<Vec<BattleEvent>, GameError> {
        self.turn += 1;
        let result = process_battle_turn(
            &self.session,
            &self.content.base_items,
            &self.content.monster_templates,
            self.turn,
            &mut self.rng,
        )?;
        self.session = result.session;
        Ok(result.events)
    }

    /// Runs until the character dies or the turn budget is exhausted.
    pub fn run(&mut self, max_turns: u32) -> Result<SimulationStats, GameError> {
        let mut stats = SimulationStats::default();

        for _ in 0..max_turns {
            if self.session.state != SessionState::InProgress {
                break;
            }
            let events = self.step()?;
            stats.turns_run += 1;
            let mut dropped = false;
            for event in &events {
                match event {
                    BattleEvent::PlayerAttack {
                        damage,
                        is_critical,
                        ..
                    } => {
                        stats.damage_dealt += u64::from(damage.value());
                        if *is_critical {
                            stats.critical_hits += 1;
                        }
                    }
                    BattleEvent::SkillDamage { damage, .. } => {
                        stats.damage_dealt += u64::from(damage.value());
                    }
                    BattleEvent::MonsterAttack { damage, .. } => {
                        stats.damage_taken += u64::from(damage.value());
                    }
                    BattleEvent::ItemDropped { .. } => {
                        stats.items_dropped += 1;
                        dropped = true;
                    }
                    BattleEvent::SkillUsed { .. } => stats.skills_used += 1,
                    BattleEvent::PlayerLevelUp { .. } => stats.level_ups += 1,
                    _ => {}
                }
            }
            if self.auto_equip && dropped {
                self.equip_upgrades()?;
            }
        }

        stats.monsters_defeated = self.session.defeated_count;
        stats.final_level = self.session.player.level.value();
        stats.final_wave = self.session.wave;
        stats.gold = self.session.player.gold.value();
        stats.died = self.session.state == SessionState::Completed;
        Ok(stats)
    }

    /// Equips any inventory item that out-scores the current occupant of a
    /// slot it can legally fill. Empty slots count as score zero.
    fn equip_upgrades(&mut self) -> Result<(), GameError> {
        loop {
            let player = &self.session.player;
            let mut best: Option<(Item, EquipmentSlot, f64)> = None;

            let main_hand_two_handed = player
                .equipment
                .get(EquipmentSlot::MainHand)
                .is_some_and(|weapon| weapon.is_two_handed());

            for item in &player.inventory {
                let score = score_item(item);
                for slot in valid_slots_for_item(item, player.class, player.level.value()) {
                    if slot == EquipmentSlot::OffHand && main_hand_two_handed {
                        continue;
                    }
                    let current = player.equipment.get(slot).map(score_item).unwrap_or(0.0);
                    let gain = score - current;
                    if gain > 0.0 && best.as_ref().map_or(true, |(_, _, g)| gain > *g) {
                        best = Some((item.clone(), slot, gain));
                    }
                }
            }

            let Some((item, slot, _)) = best else {
                return Ok(());
            };
            self.session = process_action(
                &self.session,
                GameAction::EquipItem { item, slot },
                &self.content.skills,
            )?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_starts_with_class_kit() {
        let content = GameContent::load_default().unwrap();
        let engine = HeadlessEngine::new(
            content,
            EngineConfig {
                class: PlayerClass::Rogue,
                seed: 1,
                ..Default::default()
            },
        )
        .unwrap();

        let player = &engine.session().player;
        assert!(!player.skills.is_empty());
        assert!(player.equipment.iter_equipped().count() >= 2);
    }

    #[test]
    fn test_run_makes_progress() {
        let content = GameContent::load_default().unwrap();
        let mut engine = HeadlessEngine::new(
            content,
            EngineConfig {
                class: PlayerClass::Warrior,
                seed: 42,
                ..Default::default()
            },
        )
        .unwrap();

        let stats = engine.run(200).unwrap();
        assert!(stats.turns_run > 0);
        assert!(
            stats.monsters_defeated > 0,
            "a level-1 warrior should clear at least one rat in 200 turns"
        );
    }

    #[test]
    fn test_score_item_prefers_more_modifiers() {
        let content = GameContent::load_default().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let base = content
            .base_items
            .get(&crate::core::types::ItemId::from("iron_sword"))
            .unwrap();

        let common = generate_item(base, Level(1), ItemRarity::Common, &mut rng);
        let legendary = generate_item(base, Level(1), ItemRarity::Legendary, &mut rng);
        assert!(
            score_item(&legendary) > score_item(&common),
            "a Legendary roll of the same base should out-score the Common one"
        );
    }

    #[test]
    fn test_auto_equip_empties_upgrades_from_inventory() {
        let content = GameContent::load_default().unwrap();
        let mut engine = HeadlessEngine::new(
            content.clone(),
            EngineConfig {
                class: PlayerClass::Warrior,
                seed: 11,
                ..Default::default()
            },
        )
        .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let base = content
            .base_items
            .get(&crate::core::types::ItemId::from("plate_armor"))
            .unwrap();
        // Legendary body armor at level 1 beats whatever the kit rolled.
        let mut upgrade = generate_item(base, Level(1), ItemRarity::Legendary, &mut rng);
        upgrade.base_item.required_level = None;
        let upgrade_id = upgrade.id.clone();
        engine.session.player.inventory.push(upgrade);

        engine.equip_upgrades().unwrap();

        let player = &engine.session.player;
        assert!(
            !player.inventory.iter().any(|item| item.id == upgrade_id),
            "the upgrade should leave the inventory"
        );
        assert!(player
            .equipment
            .get(EquipmentSlot::Armor)
            .is_some_and(|item| item.id == upgrade_id));
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let content = GameContent::load_default().unwrap();
        let config = EngineConfig {
            class: PlayerClass::Mage,
            seed: 7,
            ..Default::default()
        };

        let mut a = HeadlessEngine::new(content.clone(), config).unwrap();
        let mut b = HeadlessEngine::new(content, config).unwrap();
        a.run(100).unwrap();
        b.run(100).unwrap();

        assert_eq!(a.session(), b.session());
    }
}
