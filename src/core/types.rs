//! Core value types shared across the engine.
//!
//! Every game quantity gets its own newtype so that, e.g., a `Mana` can never
//! be added to a `Health` by accident. The inner value is public for use in
//! formulas, but APIs should traffic in the branded type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! game_unit {
    ($(#[$meta:meta])* $name:ident, $inner:ty) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            pub fn value(self) -> $inner {
                self.0
            }

            pub fn saturating_sub(self, rhs: Self) -> Self {
                Self(self.0.saturating_sub(rhs.0))
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl std::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

game_unit!(Damage, u32);
game_unit!(Health, u32);
game_unit!(Mana, u32);
game_unit!(Level, u32);
game_unit!(Experience, u64);
game_unit!(Gold, u64);
game_unit!(Strength, u32);
game_unit!(Intelligence, u32);
game_unit!(Dexterity, u32);
game_unit!(Vitality, u32);

macro_rules! string_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(PlayerId);
string_id!(ItemId);
string_id!(MonsterId);
string_id!(SessionId);
string_id!(SkillId);

/// The four playable archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    Warrior,
    Mage,
    Rogue,
    Paladin,
}

impl PlayerClass {
    pub fn all() -> [PlayerClass; 4] {
        [
            PlayerClass::Warrior,
            PlayerClass::Mage,
            PlayerClass::Rogue,
            PlayerClass::Paladin,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerClass::Warrior => "Warrior",
            PlayerClass::Mage => "Mage",
            PlayerClass::Rogue => "Rogue",
            PlayerClass::Paladin => "Paladin",
        }
    }
}

/// Attack elements. Every attack carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Physical,
    Arcane,
    Fire,
    Lightning,
    Holy,
}

impl ElementType {
    pub fn all() -> [ElementType; 5] {
        [
            ElementType::Physical,
            ElementType::Arcane,
            ElementType::Fire,
            ElementType::Lightning,
            ElementType::Holy,
        ]
    }
}

/// Per-element resistance in percentage points. Negative values are
/// weaknesses and amplify incoming damage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementResistance {
    pub physical: f64,
    pub arcane: f64,
    pub fire: f64,
    pub lightning: f64,
    pub holy: f64,
}

impl ElementResistance {
    pub fn get(&self, element: ElementType) -> f64 {
        match element {
            ElementType::Physical => self.physical,
            ElementType::Arcane => self.arcane,
            ElementType::Fire => self.fire,
            ElementType::Lightning => self.lightning,
            ElementType::Holy => self.holy,
        }
    }

    pub fn get_mut(&mut self, element: ElementType) -> &mut f64 {
        match element {
            ElementType::Physical => &mut self.physical,
            ElementType::Arcane => &mut self.arcane,
            ElementType::Fire => &mut self.fire,
            ElementType::Lightning => &mut self.lightning,
            ElementType::Holy => &mut self.holy,
        }
    }
}

/// Per-element outgoing damage multipliers. Neutral is 1.0 on every axis;
/// equipment modifiers compound multiplicatively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementModifiers {
    pub physical: f64,
    pub arcane: f64,
    pub fire: f64,
    pub lightning: f64,
    pub holy: f64,
}

impl Default for ElementModifiers {
    fn default() -> Self {
        Self {
            physical: 1.0,
            arcane: 1.0,
            fire: 1.0,
            lightning: 1.0,
            holy: 1.0,
        }
    }
}

impl ElementModifiers {
    pub fn get(&self, element: ElementType) -> f64 {
        match element {
            ElementType::Physical => self.physical,
            ElementType::Arcane => self.arcane,
            ElementType::Fire => self.fire,
            ElementType::Lightning => self.lightning,
            ElementType::Holy => self.holy,
        }
    }

    pub fn get_mut(&mut self, element: ElementType) -> &mut f64 {
        match element {
            ElementType::Physical => &mut self.physical,
            ElementType::Arcane => &mut self.arcane,
            ElementType::Fire => &mut self.fire,
            ElementType::Lightning => &mut self.lightning,
            ElementType::Holy => &mut self.holy,
        }
    }
}

/// Monster difficulty classification. Biases drop rate, rarity weights and
/// gold rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterTier {
    Common,
    Elite,
    Rare,
    Boss,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    InProgress,
    Paused,
    Completed,
}

/// Domain errors returned (never panicked) from orchestrator-level
/// operations when a request is structurally invalid for the current state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("invalid action: {message}")]
    InvalidAction { message: String },
    #[error("item not found: {item_id}")]
    ItemNotFound { item_id: ItemId },
    #[error("monster not found: {monster_id}")]
    MonsterNotFound { monster_id: MonsterId },
    #[error("session not found: {session_id}")]
    SessionNotFound { session_id: SessionId },
}

impl GameError {
    pub fn invalid_action(message: impl Into<String>) -> Self {
        GameError::InvalidAction {
            message: message.into(),
        }
    }
}

/// Validates that a computed quantity is finite.
///
/// A NaN or infinity here means malformed content data or a logic defect
/// (e.g. a bad scaling coefficient) and must not propagate into
/// player-visible numbers, so this aborts instead of defaulting.
pub fn ensure_finite(value: f64, what: &str) -> f64 {
    assert!(
        value.is_finite(),
        "non-finite value for {what}: {value} - content or formula defect"
    );
    value
}
