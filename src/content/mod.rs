//! Bundled content data: item templates, monster templates, skills and the
//! per-class starting kits.
//!
//! The JSON here is schema-validated upstream; loading still rejects
//! non-finite numbers so a bad coefficient never reaches the damage math.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::combat::types::MonsterTemplate;
use crate::core::types::{ElementType, ItemId, PlayerClass, SkillId};
use crate::items::types::BaseItem;
use crate::skills::types::{Skill, SkillEffect};

const ITEMS_JSON: &str = include_str!("../../data/items.json");
const MONSTERS_JSON: &str = include_str!("../../data/monsters.json");
const SKILLS_JSON: &str = include_str!("../../data/skills.json");
const CLASS_SKILLS_JSON: &str = include_str!("../../data/class_skills.json");
const STARTER_EQUIPMENT_JSON: &str = include_str!("../../data/starter_equipment.json");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("malformed content data: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("non-finite value in content data: {what}")]
    NonFinite { what: String },
    #[error("unknown skill reference: {skill_id}")]
    UnknownSkill { skill_id: SkillId },
}

#[derive(Debug, Deserialize)]
struct ItemsFile {
    items: Vec<BaseItem>,
}

#[derive(Debug, Deserialize)]
struct MonstersFile {
    monsters: Vec<MonsterTemplate>,
}

#[derive(Debug, Deserialize)]
struct SkillsFile {
    skills: Vec<Skill>,
}

#[derive(Debug, Deserialize)]
struct ClassSkillsFile {
    class_skills: HashMap<PlayerClass, Vec<SkillId>>,
}

#[derive(Debug, Deserialize)]
struct StarterEquipmentFile {
    starter_equipment: HashMap<PlayerClass, Vec<ItemId>>,
}

/// All loaded game content, keyed for the orchestrator.
#[derive(Debug, Clone)]
pub struct GameContent {
    pub base_items: HashMap<ItemId, BaseItem>,
    pub monster_templates: Vec<MonsterTemplate>,
    pub skills: Vec<Skill>,
    pub class_skills: HashMap<PlayerClass, Vec<SkillId>>,
    pub starter_equipment: HashMap<PlayerClass, Vec<ItemId>>,
}

fn check_finite(value: f64, what: impl FnOnce() -> String) -> Result<(), ContentError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ContentError::NonFinite { what: what() })
    }
}

fn validate_items(items: &[BaseItem]) -> Result<(), ContentError> {
    for item in items {
        if let Some(scaling) = &item.weapon_scaling {
            for coefficient in [scaling.strength, scaling.intelligence, scaling.dexterity] {
                if let Some(value) = coefficient {
                    check_finite(value, || format!("weapon scaling on {}", item.id))?;
                }
            }
        }
        if let Some(modifiers) = &item.element_modifiers {
            for element in ElementType::all() {
                check_finite(modifiers.get(element), || {
                    format!("element modifier on {}", item.id)
                })?;
            }
        }
    }
    Ok(())
}

fn validate_skills(skills: &[Skill]) -> Result<(), ContentError> {
    for skill in skills {
        for effect in &skill.effects {
            let scaling = match *effect {
                SkillEffect::Damage { scaling, .. } => scaling,
                SkillEffect::Heal { scaling, .. } => scaling,
                SkillEffect::LifeDrain { percentage } => percentage,
                _ => continue,
            };
            check_finite(scaling, || format!("effect scaling on skill {}", skill.id))?;
        }
        for gain in &skill.resource_gain {
            check_finite(gain.chance, || {
                format!("resource gain chance on skill {}", skill.id)
            })?;
        }
    }
    Ok(())
}

fn validate_monsters(monsters: &[MonsterTemplate]) -> Result<(), ContentError> {
    for monster in monsters {
        check_finite(monster.critical_chance, || {
            format!("critical chance on monster {}", monster.id)
        })?;
        check_finite(monster.critical_damage, || {
            format!("critical damage on monster {}", monster.id)
        })?;
        for entry in &monster.loot_table {
            check_finite(entry.drop_chance, || {
                format!("drop chance on monster {}", monster.id)
            })?;
        }
    }
    Ok(())
}

impl GameContent {
    /// Loads the compiled-in content data.
    pub fn load_default() -> Result<Self, ContentError> {
        Self::from_json(
            ITEMS_JSON,
            MONSTERS_JSON,
            SKILLS_JSON,
            CLASS_SKILLS_JSON,
            STARTER_EQUIPMENT_JSON,
        )
    }

    pub fn from_json(
        items: &str,
        monsters: &str,
        skills: &str,
        class_skills: &str,
        starter_equipment: &str,
    ) -> Result<Self, ContentError> {
        let items: ItemsFile = serde_json::from_str(items)?;
        let monsters: MonstersFile = serde_json::from_str(monsters)?;
        let skills: SkillsFile = serde_json::from_str(skills)?;
        let class_skills: ClassSkillsFile = serde_json::from_str(class_skills)?;
        let starter_equipment: StarterEquipmentFile = serde_json::from_str(starter_equipment)?;

        validate_items(&items.items)?;
        validate_skills(&skills.skills)?;
        validate_monsters(&monsters.monsters)?;

        Ok(GameContent {
            base_items: items
                .items
                .into_iter()
                .map(|item| (item.id.clone(), item))
                .collect(),
            monster_templates: monsters.monsters,
            skills: skills.skills,
            class_skills: class_skills.class_skills,
            starter_equipment: starter_equipment.starter_equipment,
        })
    }

    /// Resolves the skill list a fresh character of this class starts with.
    pub fn starting_skills(&self, class: PlayerClass) -> Result<Vec<Skill>, ContentError> {
        let Some(ids) = self.class_skills.get(&class) else {
            return Ok(Vec::new());
        };
        ids.iter()
            .map(|id| {
                self.skills
                    .iter()
                    .find(|skill| &skill.id == id)
                    .cloned()
                    .ok_or_else(|| ContentError::UnknownSkill {
                        skill_id: id.clone(),
                    })
            })
            .collect()
    }

    /// The base items a fresh character of this class starts with. Missing
    /// references are skipped, matching loot's treatment of content gaps.
    pub fn starter_items(&self, class: PlayerClass) -> Vec<&BaseItem> {
        self.starter_equipment
            .get(&class)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.base_items.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }
}
