//! Monster-tier loot biasing.
//!
//! Each tier scales the per-entry drop chance and shifts the rarity weights
//! before the loot roll. Higher tiers also pay out more gold.

use crate::core::types::MonsterTier;
use crate::items::generation::RarityWeights;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierModifiers {
    pub drop_rate_multiplier: f64,
    pub rarity_bonus: RarityBonus,
    pub gold_multiplier: f64,
}

/// Additive rarity-weight adjustments, in weight points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RarityBonus {
    pub common: f64,
    pub magic: f64,
    pub rare: f64,
    pub legendary: f64,
}

pub fn tier_modifiers(tier: MonsterTier) -> TierModifiers {
    match tier {
        MonsterTier::Common => TierModifiers {
            drop_rate_multiplier: 0.3,
            rarity_bonus: RarityBonus {
                common: 0.0,
                magic: 0.0,
                rare: -5.0,
                legendary: -10.0,
            },
            gold_multiplier: 0.8,
        },
        MonsterTier::Elite => TierModifiers {
            drop_rate_multiplier: 0.5,
            rarity_bonus: RarityBonus {
                common: -10.0,
                magic: 5.0,
                rare: 5.0,
                legendary: 0.0,
            },
            gold_multiplier: 1.5,
        },
        MonsterTier::Rare => TierModifiers {
            drop_rate_multiplier: 0.8,
            rarity_bonus: RarityBonus {
                common: -20.0,
                magic: 5.0,
                rare: 10.0,
                legendary: 5.0,
            },
            gold_multiplier: 3.0,
        },
        MonsterTier::Boss => TierModifiers {
            drop_rate_multiplier: 1.0,
            rarity_bonus: RarityBonus {
                common: -30.0,
                magic: 0.0,
                rare: 20.0,
                legendary: 10.0,
            },
            gold_multiplier: 5.0,
        },
        MonsterTier::Legendary => TierModifiers {
            drop_rate_multiplier: 1.0,
            rarity_bonus: RarityBonus {
                common: -50.0,
                magic: -10.0,
                rare: 30.0,
                legendary: 30.0,
            },
            gold_multiplier: 10.0,
        },
    }
}

/// Applies the tier's additive bonuses, flooring each weight at zero.
pub fn adjust_rarity_weights(base: RarityWeights, tier: MonsterTier) -> RarityWeights {
    let bonus = tier_modifiers(tier).rarity_bonus;
    RarityWeights {
        common: (base.common + bonus.common).max(0.0),
        magic: (base.magic + bonus.magic).max(0.0),
        rare: (base.rare + bonus.rare).max(0.0),
        legendary: (base.legendary + bonus.legendary).max(0.0),
    }
}

/// Scales the drop chance by the tier multiplier, clamped to [0, 1].
pub fn adjust_drop_chance(base_chance: f64, tier: MonsterTier) -> f64 {
    (base_chance * tier_modifiers(tier).drop_rate_multiplier).min(1.0)
}
