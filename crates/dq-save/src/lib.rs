//! Save-game persistence for Dungeon Quest.
//!
//! A running game is captured into a [`SaveDocument`]: a typed,
//! human-readable JSON tree where room connections are stored as target
//! room *names*. Restoring runs in two passes: every room is rebuilt first,
//! then connections are wired through a name index. Entities are rebuilt
//! from a [`Catalog`] of prototypes so static data comes from the game's
//! own definitions while mutable state (health, cooldowns, puzzle progress,
//! dialogue position) comes from the document.
//!
//! [`SaveManager`] maps save names onto files in a save directory.

pub mod capture;
pub mod catalog;
pub mod error;
pub mod manager;
pub mod restore;
pub mod schema;

pub use capture::capture;
pub use catalog::Catalog;
pub use error::{SaveError, SaveResult};
pub use manager::{DEFAULT_SAVE_DIR, SAVE_EXTENSION, SaveInfo, SaveManager, sanitize_name};
pub use restore::{Restored, restore};
pub use schema::{
    BossDoc, EnemyDoc, ItemDoc, NpcDoc, PlayerDoc, PuzzleDoc, RoomDoc, SAVE_VERSION, SaveDocument,
    StatsDoc,
};
