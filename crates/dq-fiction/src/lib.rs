//! Game session for Dungeon Quest: The Dark Tower.
//!
//! Turns player input into game actions. The parser maps free text onto a
//! [`Command`], and [`GameSession`] dispatches it against the model in
//! `dq-core`, the combat engine in `dq-mechanics`, and the save layer in
//! `dq-save`, answering each command with a [`Turn`] of display text. An
//! optional [`Narrator`] adds flavor lines on top.

/// Session configuration.
pub mod config;
/// The Dark Tower world.
pub mod content;
/// Error types for the game session.
pub mod error;
/// Flavor-text narration.
pub mod narrator;
/// Command parsing.
pub mod parser;
/// The dispatcher-facing game session.
pub mod session;

pub use config::GameConfig;
pub use content::{Scenario, dark_tower};
pub use error::{FictionError, FictionResult};
pub use narrator::{Cue, Narration, Narrator};
pub use parser::{Command, parse_command, suggest_verb};
pub use session::{GameSession, Outcome, Turn};
