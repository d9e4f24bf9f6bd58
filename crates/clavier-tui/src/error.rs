//! Error types for clavier-tui

use thiserror::Error;

/// Result type alias for clavier-tui operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in clavier-tui
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file error
    #[error("configuration error: {0}")]
    Config(String),

    /// MIDI device error
    #[error("MIDI error: {0}")]
    Midi(String),

    /// JACK connection error
    #[error("JACK error: {0}")]
    Jack(#[from] jack::Error),

    /// Note name / range error from the core
    #[error(transparent)]
    Note(#[from] clavier_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
