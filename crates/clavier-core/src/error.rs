//! Error types for clavier-core

use thiserror::Error;

/// Result type alias for clavier-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in clavier-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Note name parsing error (letter outside A-G, or a malformed octave)
    #[error("invalid note name: {0}")]
    InvalidNoteName(String),
}
