//! Player model, attributes and derived stats.

pub mod stats;
pub mod types;

pub use stats::{calculate_total_attributes, calculate_total_resistance, calculate_total_stats};
pub use types::{BaseStats, CharacterStats, Player};
