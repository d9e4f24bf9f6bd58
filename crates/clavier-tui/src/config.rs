//! Configuration file support for clavier
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/clavier/config.toml`
//! - macOS: `~/Library/Application Support/clavier/config.toml`
//! - Windows: `%APPDATA%\clavier\config.toml`

use crate::error::{Error, Result};
use clavier_core::NoteRange;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keyboard range
    pub range: RangeSettings,
    /// MIDI configuration
    pub midi: MidiSettings,
    /// UI/Theme configuration
    pub theme: Theme,
}

impl Config {
    /// Load configuration from the default config file location
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Err(Error::Config(format!("config file not found at {:?}", path)))
        }
    }

    /// Load configuration or return default if not found
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "clavier") {
            Ok(proj_dirs.config_dir().join("config.toml"))
        } else {
            Err(Error::Config("could not determine config directory".to_string()))
        }
    }

    /// Create a default config file with comments
    pub fn create_default_config_file() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = r#"# clavier configuration file

[range]
# Visible keyboard range. Both bounds must be white keys between A0 and C8,
# with first_key strictly below last_key.
first_key = "A0"
last_key = "C8"

[midi]
# JACK client name
client_name = "clavier"

# MIDI output port name (connect this to your sampler)
port_name = "sampler_out"

# MIDI channel (0-15)
channel = 0

# Velocity for mouse-played notes (1-127)
velocity = 127

# MIDI input device for controller input (partial name match, optional).
# When unset, the piano is played with the mouse.
# input_device = "Arturia"

[theme]
# Colors for the keyboard display
white_key_color = "white"
black_key_color = "dark_gray"
pressed_key_color = "cyan"
border_color = "cyan"
invalid_color = "red"

# Show note names on white keys
show_note_names = true
"#;

        fs::write(&path, content)?;
        Ok(path)
    }

    /// Parse the configured range into a NoteRange (bounds are note names).
    pub fn note_range(&self) -> Result<NoteRange> {
        Ok(NoteRange::parse(&self.range.first_key, &self.range.last_key)?)
    }
}

/// Keyboard range settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeSettings {
    /// First visible key (note name, white key)
    pub first_key: String,
    /// Last visible key (note name, white key)
    pub last_key: String,
}

impl Default for RangeSettings {
    fn default() -> Self {
        Self {
            first_key: "A0".to_string(),
            last_key: "C8".to_string(),
        }
    }
}

/// MIDI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MidiSettings {
    /// JACK client name
    pub client_name: String,
    /// MIDI output port name
    pub port_name: String,
    /// MIDI channel (0-15)
    pub channel: u8,
    /// Velocity for mouse-played notes (1-127)
    pub velocity: u8,
    /// MIDI input device for controller input (partial name match)
    pub input_device: Option<String>,
}

impl Default for MidiSettings {
    fn default() -> Self {
        Self {
            client_name: "clavier".to_string(),
            port_name: "sampler_out".to_string(),
            channel: 0,
            velocity: 127,
            input_device: None,
        }
    }
}

/// Theme/UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// White key color
    pub white_key_color: String,
    /// Black key color
    pub black_key_color: String,
    /// Pressed key color
    pub pressed_key_color: String,
    /// Border color
    pub border_color: String,
    /// Color of the invalid-interval message
    pub invalid_color: String,
    /// Show note names on white keys
    pub show_note_names: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            white_key_color: "white".to_string(),
            black_key_color: "dark_gray".to_string(),
            pressed_key_color: "cyan".to_string(),
            border_color: "cyan".to_string(),
            invalid_color: "red".to_string(),
            show_note_names: true,
        }
    }
}

impl Theme {
    /// Parse a color string to a ratatui Color
    pub fn parse_color(s: &str) -> ratatui::style::Color {
        use ratatui::style::Color;
        match s.to_lowercase().as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "gray" | "grey" => Color::Gray,
            "dark_gray" | "dark_grey" => Color::DarkGray,
            "white" => Color::White,
            // RGB hex, e.g. "#1e90ff"
            s if s.starts_with('#') && s.len() == 7 => {
                match (
                    u8::from_str_radix(&s[1..3], 16),
                    u8::from_str_radix(&s[3..5], 16),
                    u8::from_str_radix(&s[5..7], 16),
                ) {
                    (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
                    _ => Color::White,
                }
            }
            _ => Color::White,
        }
    }

    pub fn white_key(&self) -> ratatui::style::Color {
        Self::parse_color(&self.white_key_color)
    }

    pub fn black_key(&self) -> ratatui::style::Color {
        Self::parse_color(&self.black_key_color)
    }

    pub fn pressed_key(&self) -> ratatui::style::Color {
        Self::parse_color(&self.pressed_key_color)
    }

    pub fn border(&self) -> ratatui::style::Color {
        Self::parse_color(&self.border_color)
    }

    pub fn invalid(&self) -> ratatui::style::Color {
        Self::parse_color(&self.invalid_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.range.first_key, "A0");
        assert_eq!(config.range.last_key, "C8");
        assert_eq!(config.midi.velocity, 127);
        assert_eq!(config.note_range().unwrap(), NoteRange::FULL_PIANO);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.range.first_key, config.range.first_key);
        assert_eq!(parsed.midi.port_name, config.midi.port_name);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.range.first_key = "C2".to_string();
        config.range.last_key = "C6".to_string();
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let parsed: Config = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let range = parsed.note_range().unwrap();
        assert_eq!(range.start, 36);
        assert_eq!(range.end, 84);
    }

    #[test]
    fn test_bad_range_is_an_error() {
        let mut config = Config::default();
        config.range.first_key = "H0".to_string();
        assert!(config.note_range().is_err());
    }

    #[test]
    fn test_color_parsing() {
        use ratatui::style::Color;
        assert_eq!(Theme::parse_color("cyan"), Color::Cyan);
        assert_eq!(Theme::parse_color("dark_gray"), Color::DarkGray);
        assert_eq!(Theme::parse_color("#ff0000"), Color::Rgb(255, 0, 0));
        assert_eq!(Theme::parse_color("no_such_color"), Color::White);
    }
}
