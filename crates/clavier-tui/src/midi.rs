//! MIDI collaborators: controller input and sampler output.
//!
//! Input comes from a MIDI controller via midir; raw 3-byte messages are
//! forwarded over a channel into the single-threaded event loop, in device
//! order. Output implements the core's [`Sampler`] trait over a JACK MIDI
//! port; whatever sampler the port is wired to does the actual sound.

use crate::config::MidiSettings;
use crate::error::{Error, Result};
use clavier_core::{RawMidiMessage, Sampler, VoiceId};
use crossbeam_channel::{unbounded, Receiver, Sender};
use midir::{MidiInput, MidiInputConnection};
use std::collections::HashMap;
use std::sync::mpsc;

/// Information about an available MIDI input device.
#[derive(Debug, Clone)]
pub struct MidiDeviceInfo {
    /// Device name (as reported by the system)
    pub name: String,
    /// Port index (for opening)
    pub port_index: usize,
}

/// MIDI input manager.
///
/// Owns device connections explicitly: connections live as long as the
/// manager, `close_all` (or drop) tears them down. Incoming messages are
/// validated to the fixed 3-byte shape once, here, before anything else
/// sees them.
pub struct MidiInputManager {
    /// Channel for sending messages to the event loop
    message_tx: Sender<RawMidiMessage>,
    /// Active connections (kept alive)
    connections: Vec<MidiInputConnection<()>>,
}

impl MidiInputManager {
    /// Create a new MIDI input manager and the receiving end of its
    /// message channel.
    pub fn new() -> (Self, Receiver<RawMidiMessage>) {
        let (tx, rx) = unbounded();
        (
            Self {
                message_tx: tx,
                connections: Vec::new(),
            },
            rx,
        )
    }

    /// List available MIDI input devices.
    pub fn list_devices() -> Result<Vec<MidiDeviceInfo>> {
        let midi_in = MidiInput::new("clavier-probe")
            .map_err(|e| Error::Midi(format!("failed to create MIDI input: {}", e)))?;

        let ports = midi_in.ports();
        let mut devices = Vec::new();
        for (index, port) in ports.iter().enumerate() {
            let name = midi_in
                .port_name(port)
                .unwrap_or_else(|_| format!("Unknown Device {}", index));
            devices.push(MidiDeviceInfo {
                name,
                port_index: index,
            });
        }

        Ok(devices)
    }

    /// Open a MIDI input device by name (partial match, case-insensitive).
    pub fn open_by_name(&mut self, name: &str) -> Result<MidiDeviceInfo> {
        let devices = Self::list_devices()?;
        let name_lower = name.to_lowercase();

        let device = devices
            .into_iter()
            .find(|d| d.name.to_lowercase().contains(&name_lower))
            .ok_or_else(|| Error::Midi(format!("no MIDI device found matching '{}'", name)))?;

        self.open_by_index(device.port_index)
    }

    /// Open a MIDI input device by port index.
    pub fn open_by_index(&mut self, port_index: usize) -> Result<MidiDeviceInfo> {
        let midi_in = MidiInput::new("clavier")
            .map_err(|e| Error::Midi(format!("failed to create MIDI input: {}", e)))?;

        let ports = midi_in.ports();
        let port = ports
            .get(port_index)
            .ok_or_else(|| Error::Midi(format!("invalid MIDI port index: {}", port_index)))?;

        let name = midi_in
            .port_name(port)
            .unwrap_or_else(|_| format!("Unknown Device {}", port_index));

        let device_info = MidiDeviceInfo {
            name: name.clone(),
            port_index,
        };

        let tx = self.message_tx.clone();

        let connection = midi_in
            .connect(
                port,
                "clavier-input",
                move |timestamp, bytes, _| {
                    log::debug!("[MIDI RAW] timestamp={} bytes={:?}", timestamp, bytes);
                    if let Some(msg) = RawMidiMessage::from_bytes(bytes) {
                        let _ = tx.send(msg);
                    }
                },
                (),
            )
            .map_err(|e| Error::Midi(format!("failed to connect to MIDI device: {}", e)))?;

        self.connections.push(connection);

        log::info!("connected to MIDI device: {} (port {})", name, port_index);

        Ok(device_info)
    }

    /// Close all connections.
    pub fn close_all(&mut self) {
        self.connections.clear();
    }
}

/// Sampler backed by a JACK MIDI output port.
///
/// Note-ons and note-offs are queued to the JACK process callback; the
/// sampled instrument is whatever synth the port is connected to. Voice
/// handles map back to the key they started so `stop` can emit the matching
/// note-off.
pub struct JackSampler {
    /// Sender for raw messages to the JACK process callback
    tx: mpsc::Sender<[u8; 3]>,
    /// Full port name
    port_name: String,
    /// MIDI channel for outgoing messages
    channel: u8,
    /// Key that each live voice is sounding
    voices: HashMap<VoiceId, u8>,
    next_voice: u64,
    /// Keep the client alive
    _client: jack::AsyncClient<(), JackMidiHandler>,
}

impl JackSampler {
    /// Create a new JACK-backed sampler output.
    pub fn new(client_name: &str, port_name: &str, channel: u8) -> Result<Self> {
        let (client, _status) =
            jack::Client::new(client_name, jack::ClientOptions::NO_START_SERVER)?;

        let midi_out = client.register_port(port_name, jack::MidiOut::default())?;
        let (tx, rx) = mpsc::channel();

        let handler = JackMidiHandler { midi_out, rx };
        let active_client = client.activate_async((), handler)?;

        let full_port_name = format!("{}:{}", client_name, port_name);
        log::info!("JACK MIDI output created: {}", full_port_name);

        Ok(Self {
            tx,
            port_name: full_port_name,
            channel: channel & 0x0F,
            voices: HashMap::new(),
            next_voice: 0,
            _client: active_client,
        })
    }

    /// Create from settings.
    pub fn from_settings(settings: &MidiSettings) -> Result<Self> {
        Self::new(&settings.client_name, &settings.port_name, settings.channel)
    }

    /// Get the full port name for connections.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl Sampler for JackSampler {
    fn start(&mut self, key: u8, velocity: u8) -> VoiceId {
        let voice = VoiceId(self.next_voice);
        self.next_voice += 1;
        self.voices.insert(voice, key);
        let _ = self
            .tx
            .send([0x90 | self.channel, key & 0x7F, velocity & 0x7F]);
        voice
    }

    fn stop(&mut self, voice: VoiceId) {
        if let Some(key) = self.voices.remove(&voice) {
            let _ = self.tx.send([0x80 | self.channel, key & 0x7F, 0]);
        }
    }
}

/// JACK process handler for MIDI output
struct JackMidiHandler {
    midi_out: jack::Port<jack::MidiOut>,
    rx: mpsc::Receiver<[u8; 3]>,
}

impl jack::ProcessHandler for JackMidiHandler {
    fn process(&mut self, _client: &jack::Client, ps: &jack::ProcessScope) -> jack::Control {
        let mut writer = self.midi_out.writer(ps);

        while let Ok(bytes) = self.rx.try_recv() {
            let raw = jack::RawMidi {
                time: 0, // immediate
                bytes: &bytes,
            };
            let _ = writer.write(&raw);
        }

        jack::Control::Continue
    }
}

/// Sampler that only logs, used when JACK is unavailable and in tests.
#[derive(Debug, Default)]
pub struct NullSampler {
    next_voice: u64,
}

impl Sampler for NullSampler {
    fn start(&mut self, key: u8, velocity: u8) -> VoiceId {
        let voice = VoiceId(self.next_voice);
        self.next_voice += 1;
        log::debug!("sampler start: key={} vel={} voice={:?}", key, velocity, voice);
        voice
    }

    fn stop(&mut self, voice: VoiceId) {
        log::debug!("sampler stop: voice={:?}", voice);
    }
}

/// Check if JACK is running.
pub fn is_jack_running() -> bool {
    jack::Client::new("clavier-probe", jack::ClientOptions::NO_START_SERVER).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sampler_voice_ids_are_unique() {
        let mut sampler = NullSampler::default();
        let a = sampler.start(60, 127);
        let b = sampler.start(60, 127);
        let c = sampler.start(64, 100);
        assert_ne!(a, b);
        assert_ne!(b, c);
        sampler.stop(a);
        sampler.stop(b);
        sampler.stop(c);
    }
}
