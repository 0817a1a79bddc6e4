//! Skills: definitions, the five-color resource economy, eligibility and
//! effect application.

pub mod logic;
pub mod types;

pub use logic::{
    apply_skill_effects, check_trigger_conditions, regenerate_mana, resources_available,
    select_skill, skill_restrictions_met, tick_cooldowns, update_skill_timers, SkillOutcome,
    SkillSelection, TriggerContext,
};
pub use types::{
    ResourceColor, ResourceGain, ResourcePool, Skill, SkillEffect, SkillTargetType, SkillType,
    TriggerCondition,
};
