//! Core model for Dungeon Quest: the data the game is made of.
//!
//! This crate defines combatants (player, enemies, bosses), the item and
//! equipment model, puzzles, NPCs, rooms and the room graph. It holds no
//! randomness and does no I/O: combat resolution lives in `dq-mechanics`
//! and persistence in `dq-save`.

/// Direction names for room exits.
pub mod direction;
/// Enemies, bosses, and the `Foe` wrapper stored in rooms.
pub mod enemy;
/// Error types used throughout the crate.
pub mod error;
/// Clamped health track.
pub mod health;
/// Items and equipment bonuses.
pub mod item;
/// Non-player characters with cycling dialogue.
pub mod npc;
/// The player character, inventory, and equipment slots.
pub mod player;
/// Puzzles and their attempt state machine.
pub mod puzzle;
/// Rooms and their contents.
pub mod room;
/// Whole-game state: world, player, and current room.
pub mod state;
/// Combat statistics and the `Combatant` capability.
pub mod stats;
/// The room graph, stored as an arena keyed by stable room keys.
pub mod world;

pub use direction::Direction;
pub use enemy::{Boss, Enemy, Foe};
pub use error::{CoreError, CoreResult};
pub use health::Health;
pub use item::{Item, ItemKind, Slot};
pub use npc::{Npc, NpcState};
pub use player::{Equipped, Player, UseEffect};
pub use puzzle::{Attempt, Puzzle, PuzzleKind, PuzzleState};
pub use room::Room;
pub use state::GameState;
pub use stats::{CombatStats, Combatant};
pub use world::World;
