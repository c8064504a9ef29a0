//! Error types for the game session.
//!
//! The `Display` text of every variant is the message shown to the player.

use thiserror::Error;

/// Result type for session operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Everything a command can fail with. None of these end the session.
#[derive(Debug, Error)]
pub enum FictionError {
    /// The input did not match any command.
    #[error("Unknown command '{input}'.{}", did_you_mean(.suggestion))]
    UnknownCommand {
        /// The raw input.
        input: String,
        /// A close known verb, if any.
        suggestion: Option<String>,
    },

    /// The command is missing an argument.
    #[error("{0}")]
    Incomplete(String),

    /// The game has ended; only loading a save is possible.
    #[error("The game is over. Load a save to keep playing.")]
    GameOver,

    /// No exit in that direction.
    #[error("You cannot go that way.")]
    NoExit,

    /// The destination is locked and needs no key.
    #[error("The way is locked.")]
    Locked,

    /// The destination is locked with a key.
    #[error("The way is locked. You need the {0} to enter.")]
    LockedWithKey(String),

    /// Living enemies bar the way.
    #[error("You cannot leave while enemies are still alive!")]
    EnemiesBlock,

    /// The named item is not in the room.
    #[error("There is no '{0}' here.")]
    ItemNotHere(String),

    /// There is nothing to fight.
    #[error("There are no enemies to attack here.")]
    NoEnemies,

    /// There is nothing to run from.
    #[error("There are no enemies to flee from.")]
    NothingToFlee,

    /// No living enemy matches the name.
    #[error("No enemy named '{0}' here.")]
    NoSuchEnemy(String),

    /// Tried to unlock a room that is open.
    #[error("That way is not locked.")]
    NotLocked,

    /// The player lacks the key.
    #[error("You need the {0} to unlock this door.")]
    MissingKey(String),

    /// No puzzle matches the name.
    #[error("There is no puzzle called '{0}' here.")]
    NoSuchPuzzle(String),

    /// No NPC matches the name.
    #[error("There is nobody called '{0}' here.")]
    NoSuchNpc(String),

    /// The room has no NPCs.
    #[error("There is nobody here to talk to.")]
    NobodyHere,

    /// A model operation failed.
    #[error(transparent)]
    Core(#[from] dq_core::CoreError),

    /// Combat could not be resolved.
    #[error(transparent)]
    Combat(#[from] dq_mechanics::MechError),

    /// Saving or loading failed.
    #[error(transparent)]
    Save(#[from] dq_save::SaveError),
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(verb) => format!(" Did you mean '{verb}'?"),
        None => " Type 'help' for available commands.".to_string(),
    }
}
