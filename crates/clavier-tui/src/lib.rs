//! clavier-tui - Terminal virtual piano
//!
//! An on-screen piano keyboard in the terminal, playable with the mouse or a
//! connected MIDI controller. Note events go out to a sampler over a JACK
//! MIDI port; pressed keys are highlighted as they sound.
//!
//! The interpretation and geometry logic lives in `clavier-core`; this crate
//! is the shell around it:
//!
//! - ratatui/crossterm rendering and mouse capture
//! - midir controller input feeding the event loop over a channel
//! - JACK MIDI output implementing the core's `Sampler` trait
//! - TOML configuration and a clap CLI

pub mod config;
pub mod error;
pub mod midi;
pub mod pointer;
pub mod ui;

// Re-export main types
pub use config::{Config, MidiSettings, RangeSettings, Theme};
pub use error::{Error, Result};
pub use midi::{is_jack_running, JackSampler, MidiDeviceInfo, MidiInputManager, NullSampler};
pub use pointer::{hit_test, PointerInput};
pub use ui::{cell_layout, cell_sizing, outer_block, render_invalid_interval, render_piano};
