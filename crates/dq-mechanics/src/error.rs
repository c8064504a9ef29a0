//! Error types for the combat engine.

/// Errors that can occur during combat resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// A dead combatant tried to attack.
    #[error("{0} is dead and cannot attack")]
    AttackerDead(String),
}

/// Convenience result type for combat operations.
pub type MechResult<T> = Result<T, MechError>;
