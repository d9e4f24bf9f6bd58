//! clavier - terminal virtual piano
//!
//! Renders a piano keyboard in the terminal, playable with the mouse or a
//! connected MIDI controller, and forwards note events to a sampler over
//! JACK MIDI.

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::time::Duration;

use clavier_core::{
    key_code, white_keys_in_range, KeyGeometry, NoteRange, NoteState, RawMidiMessage, Sampler,
    PIANO_HIGH, PIANO_LOW,
};
use clavier_tui::{
    config::Config,
    midi::{is_jack_running, JackSampler, MidiInputManager, NullSampler},
    pointer::PointerInput,
    ui,
};

#[derive(Parser)]
#[command(name = "clavier")]
#[command(author, version, about = "Terminal virtual piano", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path (default: ~/.config/clavier/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// First visible key (note name, e.g. "A0" or "C2")
    #[arg(long)]
    first_key: Option<String>,

    /// Last visible key (note name, e.g. "C8" or "C6")
    #[arg(long)]
    last_key: Option<String>,

    /// MIDI input device for controller input (partial name match).
    /// Without this the piano is played with the mouse.
    #[arg(short, long)]
    device: Option<String>,

    /// JACK client name
    #[arg(long)]
    client_name: Option<String>,

    /// MIDI channel (0-15)
    #[arg(long)]
    channel: Option<u8>,

    /// Velocity for mouse-played notes (1-127)
    #[arg(long)]
    velocity: Option<u8>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default configuration file
    Init,
    /// Show the configuration file path
    ConfigPath,
    /// List available MIDI input devices
    ListDevices,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let path = Config::create_default_config_file()?;
            println!("Created default config at: {}", path.display());
            return Ok(());
        }
        Some(Commands::ConfigPath) => {
            let path = Config::config_path()?;
            println!("{}", path.display());
            return Ok(());
        }
        Some(Commands::ListDevices) => {
            let devices = MidiInputManager::list_devices()?;
            if devices.is_empty() {
                println!("No MIDI input devices found");
            } else {
                println!("Available MIDI input devices:");
                for device in devices {
                    println!("  [{}] {}", device.port_index, device.name);
                }
            }
            return Ok(());
        }
        None => {}
    }

    // Load config
    let mut config = if let Some(path) = cli.config {
        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        Config::load_or_default()
    };

    // Apply CLI overrides
    if let Some(first_key) = cli.first_key {
        config.range.first_key = first_key;
    }
    if let Some(last_key) = cli.last_key {
        config.range.last_key = last_key;
    }
    if let Some(device) = cli.device {
        config.midi.input_device = Some(device);
    }
    if let Some(client_name) = cli.client_name {
        config.midi.client_name = client_name;
    }
    if let Some(channel) = cli.channel {
        config.midi.channel = channel.min(15);
    }
    if let Some(velocity) = cli.velocity {
        config.midi.velocity = velocity.clamp(1, 127);
    }

    run_tui(config)
}

fn run_tui(config: Config) -> Result<()> {
    let range = config.note_range()?;

    // Playback collaborator: JACK when available, otherwise silent
    let (mut sampler, port_name): (Box<dyn Sampler>, Option<String>) = if is_jack_running() {
        match JackSampler::from_settings(&config.midi) {
            Ok(sampler) => {
                let port = sampler.port_name().to_string();
                (Box::new(sampler), Some(port))
            }
            Err(e) => {
                log::warn!("failed to create JACK output: {}", e);
                (Box::new(NullSampler::default()), None)
            }
        }
    } else {
        log::warn!("JACK is not running, playing silently");
        (Box::new(NullSampler::default()), None)
    };

    // Device collaborator: polyphonic controller input when a device is
    // configured, monophonic mouse input otherwise
    let mut midi_manager = None;
    let mut device_rx = None;
    let mut device_name = None;
    if let Some(ref name) = config.midi.input_device {
        let (mut manager, rx) = MidiInputManager::new();
        let device = manager.open_by_name(name)?;
        device_name = Some(device.name);
        midi_manager = Some(manager);
        device_rx = Some(rx);
    }
    let mut state = if device_rx.is_some() {
        NoteState::polyphonic()
    } else {
        NoteState::monophonic()
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(
        &mut terminal,
        &config,
        range,
        &mut state,
        sampler.as_mut(),
        device_rx.as_ref(),
        device_name.as_deref(),
        port_name.as_deref(),
    );

    // Cleanup
    if let Some(mut manager) = midi_manager {
        manager.close_all();
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    result
}

#[allow(clippy::too_many_arguments)]
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &Config,
    mut range: NoteRange,
    state: &mut NoteState,
    sampler: &mut dyn Sampler,
    device_rx: Option<&crossbeam_channel::Receiver<RawMidiMessage>>,
    device_name: Option<&str>,
    port_name: Option<&str>,
) -> Result<()> {
    let theme = &config.theme;
    let mouse_input = device_rx.is_none();
    let mut pointer = PointerInput::new(config.midi.velocity);

    // Range selector options: the white keys of the full piano, like the
    // original's first/last key dropdowns. Arrow keys step through them.
    let options = white_key_options();

    loop {
        // Geometry is recomputed from (range, area) each frame; the same
        // keys are used for rendering and pointer hit-testing.
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let block = ui::outer_block(range, device_name, port_name, theme);
        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        let keys: Vec<KeyGeometry> = if range.is_valid() {
            ui::cell_layout(range, inner)
        } else {
            Vec::new()
        };

        terminal.draw(|frame| {
            frame.render_widget(block.clone(), area);
            if range.is_valid() {
                ui::render_piano(frame, inner, &keys, &state.sounding_keys(), theme);
            } else {
                ui::render_invalid_interval(frame, inner, range, theme);
            }
        })?;

        // Device-originated messages, in arrival order
        if let Some(rx) = device_rx {
            while let Ok(msg) = rx.try_recv() {
                state.handle(msg, sampler);
            }
        }

        // Terminal events
        if !event::poll(Duration::from_millis(16))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    state.stop_all(sampler);
                    return Ok(());
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    state.stop_all(sampler);
                    return Ok(());
                }
                // Range selection: arrows move the bounds one white key at
                // a time. An invalid combination is shown as such, never
                // handed to the layout engine.
                KeyCode::Left => {
                    if let Some(code) = step_white(&options, range.start, -1) {
                        state.stop_all(sampler);
                        range.start = code;
                    }
                }
                KeyCode::Right => {
                    if let Some(code) = step_white(&options, range.start, 1) {
                        state.stop_all(sampler);
                        range.start = code;
                    }
                }
                KeyCode::Down => {
                    if let Some(code) = step_white(&options, range.end, -1) {
                        state.stop_all(sampler);
                        range.end = code;
                    }
                }
                KeyCode::Up => {
                    if let Some(code) = step_white(&options, range.end, 1) {
                        state.stop_all(sampler);
                        range.end = code;
                    }
                }
                _ => {}
            },
            Event::Mouse(mouse) if mouse_input && range.is_valid() => {
                // cell centers, in the keyboard's coordinate space; clicks
                // on the border land outside every key
                let x = mouse.column as f64 - inner.x as f64 + 0.5;
                let y = mouse.row as f64 - inner.y as f64 + 0.5;
                if let Some(msg) = pointer.handle(mouse.kind, x, y, &keys) {
                    state.handle(msg, sampler);
                }
            }
            _ => {}
        }
    }
}

/// The selectable range bounds: white keys of the full piano, as codes.
fn white_key_options() -> Vec<u8> {
    white_keys_in_range(PIANO_LOW, PIANO_HIGH)
        .iter()
        .filter_map(|name| key_code(name).ok())
        .collect()
}

/// Step a range bound to the neighboring entry in the option list. Bounds
/// off the list (or stepping past either end) leave the range unchanged.
fn step_white(options: &[u8], code: u8, delta: isize) -> Option<u8> {
    let index = options.iter().position(|&c| c == code)? as isize + delta;
    usize::try_from(index)
        .ok()
        .and_then(|i| options.get(i))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_key_options() {
        let options = white_key_options();
        assert_eq!(options.len(), 52);
        assert_eq!(options.first(), Some(&21)); // A0
        assert_eq!(options.last(), Some(&108)); // C8
    }

    #[test]
    fn test_step_white() {
        let options = white_key_options();
        assert_eq!(step_white(&options, 21, 1), Some(23)); // A0 -> B0
        assert_eq!(step_white(&options, 60, -1), Some(59)); // C4 -> B3
        assert_eq!(step_white(&options, 21, -1), None); // below A0
        assert_eq!(step_white(&options, 108, 1), None); // above C8
        assert_eq!(step_white(&options, 61, 1), None); // C#4 is not selectable
    }
}
