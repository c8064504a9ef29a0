//! Combat engine for Dungeon Quest.
//!
//! Resolves one directed attack at a time: variance, critical hits, the
//! damage floor, and the dodge, block, defense mitigation pipeline. Bosses
//! get a turn function that may substitute their special ability. Every
//! random draw goes through a [`Roller`], so tests can script outcomes.

pub mod combat;
pub mod error;
pub mod roller;

pub use combat::{
    AttackOutcome, FLEE_CHANCE, Mitigation, attempt_flee, boss_turn, foe_turn, mitigate,
    resolve_attack,
};
pub use error::{MechError, MechResult};
pub use roller::{Roller, ScriptedRoller, VARIANCE};
