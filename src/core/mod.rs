//! Core: shared value types, events, the session orchestrator and the
//! headless engine.

pub mod constants;
pub mod engine;
pub mod events;
pub mod session;
pub mod types;

pub use engine::{score_item, EngineConfig, HeadlessEngine, SimulationStats};
pub use events::BattleEvent;
pub use session::{
    create_initial_player, create_session, process_action, process_battle_turn, spawn_monster,
    GameAction, Session, TurnResult,
};
pub use types::{
    ensure_finite, Damage, Dexterity, ElementModifiers, ElementResistance, ElementType,
    Experience, GameError, Gold, Health, Intelligence, ItemId, Level, Mana, MonsterId,
    MonsterTier, PlayerClass, PlayerId, SessionId, SessionState, SkillId, Strength, Vitality,
};
