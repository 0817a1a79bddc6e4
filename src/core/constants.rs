// Attribute-derived stat scaling
pub const HEALTH_PER_VITALITY: u32 = 5;
pub const MANA_PER_INTELLIGENCE: u32 = 3;
pub const CRIT_CHANCE_PER_DEXTERITY: f64 = 0.005;
pub const CRIT_CHANCE_CAP: f64 = 0.75;

// Flat attribute gain per level above 1 (applies to all four attributes)
pub const ATTRIBUTES_PER_LEVEL: u32 = 2;

// Unarmed fallback: damage scales at half strength when no weapon scaling
// is defined
pub const DEFAULT_STRENGTH_SCALING: f64 = 0.5;

// Elemental resistance cap from equipment, in percentage points
pub const RESISTANCE_CAP: f64 = 75.0;

// Leveling
pub const EXPERIENCE_PER_LEVEL: u64 = 100;
pub const EXPERIENCE_PER_MONSTER_LEVEL: u64 = 10;
pub const LEVEL_UP_HEALTH_GAIN: u32 = 10;
pub const LEVEL_UP_DAMAGE_GAIN: u32 = 2;
pub const LEVEL_UP_MANA_GAIN: u32 = 5;
pub const LEVEL_UP_MANA_REGEN_GAIN: u32 = 1;

// Monster spawning: templates match when the player's level is within
// [min, max + MONSTER_LEVEL_RANGE_SLACK]; the spawned level jitters by
// -1..=+1 around the player's
pub const MONSTER_LEVEL_RANGE_SLACK: u32 = 2;
pub const MONSTER_HEALTH_PER_LEVEL: u32 = 10;
pub const MONSTER_DAMAGE_PER_LEVEL: u32 = 2;

// Gold rewards: (level * 10 + 20) with +-20% variance, then tier multiplier
pub const GOLD_PER_MONSTER_LEVEL: u64 = 10;
pub const GOLD_BASE_DROP: u64 = 20;
pub const GOLD_VARIANCE_MIN: f64 = 0.8;
pub const GOLD_VARIANCE_SPAN: f64 = 0.4;

// Skill auto-trigger spacing: a used skill cannot re-fire for
// max(MIN_AUTO_TRIGGER_INTERVAL, cooldown + 1) turns
pub const MIN_AUTO_TRIGGER_INTERVAL: u32 = 2;

// Item economy
pub const ITEM_VALUE_PER_LEVEL: u64 = 10;
pub const ITEM_VALUE_PER_MODIFIER: u64 = 15;
pub const ITEM_SELL_RATIO: f64 = 0.5;
pub const STARTING_GOLD: u64 = 100;
