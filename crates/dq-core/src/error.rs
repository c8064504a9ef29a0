//! Error types for the game model.

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by model constructors and model operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// A required text field was empty.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// A numeric field that must be strictly positive was zero.
    #[error("{0} must be positive")]
    NotPositive(&'static str),

    /// A probability lies outside `[0, 1]`.
    #[error("{field} must be between 0 and 1, got {value}")]
    ChanceOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The critical-hit multiplier is below 1.0.
    #[error("crit multiplier must be at least 1.0, got {0}")]
    CritMultiplierTooLow(f64),

    /// A room key or room name is already taken.
    #[error("room already exists: \"{0}\"")]
    DuplicateRoom(String),

    /// The requested room key does not exist in the world.
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// A room was connected to itself.
    #[error("cannot connect room \"{0}\" to itself")]
    SelfConnection(String),

    /// The puzzle has already been solved.
    #[error("The puzzle is already solved.")]
    PuzzleSolved,

    /// The puzzle has no attempts left.
    #[error("No attempts left.")]
    NoAttemptsLeft,

    /// The named item is not in the player's inventory.
    #[error("You don't have '{0}'.")]
    ItemNotInInventory(String),

    /// The item is neither a weapon nor armor.
    #[error("{0} cannot be equipped.")]
    NotEquippable(String),

    /// The named item is not in an equipment slot.
    #[error("{0} is not equipped.")]
    NotEquipped(String),

    /// The item has no use effect.
    #[error("You cannot use {0}.")]
    NotUsable(String),

    /// An item was placed into a slot that does not accept its kind.
    #[error("{item} does not fit the {slot} slot")]
    WrongSlot {
        /// The item name.
        item: String,
        /// The slot it was offered to.
        slot: &'static str,
    },
}
