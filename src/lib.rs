//! Darkspire - deterministic combat and progression core for a terminal
//! hack-and-slash RPG.
//!
//! One battle turn is one pure function call: inject a session, content
//! tables and an RNG, get back events and the next session value. All
//! randomness flows through the injected generator, so runs are fully
//! reproducible from a seed.

pub mod character;
pub mod combat;
pub mod content;
pub mod core;
pub mod items;
pub mod skills;
