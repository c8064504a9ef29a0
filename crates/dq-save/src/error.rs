//! Error types for persistence.

use std::path::PathBuf;

use dq_core::CoreError;

/// Result type for persistence operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors that can occur while saving or loading a game.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The save name was empty.
    #[error("save name cannot be empty")]
    EmptyName,

    /// No save file exists under this name.
    #[error("save file does not exist: {0}")]
    NotFound(String),

    /// The file could not be parsed as a save document.
    #[error("malformed save document: {0}")]
    Malformed(String),

    /// The document could not be encoded.
    #[error("cannot encode save document: {0}")]
    Encode(String),

    /// A connection or the current room names a room that is not in the document.
    #[error("save document references unknown room: {0}")]
    UnknownRoom(String),

    /// A restored entity failed validation.
    #[error("invalid saved state: {0}")]
    Invalid(#[from] CoreError),

    /// Filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
}

impl SaveError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
