//! Raw MIDI message ingestion and semantic event classification.
//!
//! A [`RawMidiMessage`] is a fixed 3-byte channel message, validated once at
//! the boundary. [`classify`] turns it into a [`MidiEvent`] with no state and
//! no side effects; every possible input maps to some event, unhandled
//! status families land on [`MidiEvent::Unknown`].

/// A raw 3-byte MIDI message: status, key/controller, velocity/value.
///
/// The status byte's high nibble encodes the event family; the low nibble is
/// the channel, which the classifier ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMidiMessage([u8; 3]);

/// Controller number for the "all notes off" channel mode message.
pub const CC_ALL_NOTES_OFF: u8 = 123;

impl RawMidiMessage {
    pub fn new(status: u8, key: u8, velocity: u8) -> Self {
        Self([status, key, velocity])
    }

    /// Validate a raw byte slice into a message. Anything that is not
    /// exactly three bytes is rejected; a device delivering short or SysEx
    /// traffic never reaches the classifier.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            &[status, key, velocity] => Some(Self([status, key, velocity])),
            _ => None,
        }
    }

    /// Pointer note-on encoding: full velocity on channel 0.
    pub fn note_on(key: u8) -> Self {
        Self([0x90, key, 127])
    }

    /// Pointer note-off encoding.
    pub fn note_off(key: u8) -> Self {
        Self([0x80, key, 0])
    }

    /// Channel mode "all notes off" message.
    pub fn all_notes_off() -> Self {
        Self([0xB0, CC_ALL_NOTES_OFF, 0])
    }

    pub fn status(&self) -> u8 {
        self.0[0]
    }

    /// Key code for note messages, controller number for control changes.
    pub fn key(&self) -> u8 {
        self.0[1]
    }

    /// Velocity for note messages, value for control changes.
    pub fn velocity(&self) -> u8 {
        self.0[2]
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        self.0
    }

    /// Classify this message into a semantic event.
    pub fn event(&self) -> MidiEvent {
        classify(*self)
    }
}

/// Semantic MIDI event kinds, derived purely from a raw message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn,
    NoteOff,
    AfterTouch,
    ControlChange,
    SustainOn,
    SustainOff,
    AllNotesOff,
    Unknown,
}

/// Classify a raw message by its status high nibble.
///
/// A note-on with velocity zero is the standard MIDI idiom for note-off and
/// is classified as such. The sustain window 64..=69 and the >= 64 pedal
/// threshold are kept exactly as the behavior this replaces, standard or not.
pub fn classify(msg: RawMidiMessage) -> MidiEvent {
    match msg.status() >> 4 {
        0x8 => MidiEvent::NoteOff,
        0x9 => {
            if msg.velocity() != 0 {
                MidiEvent::NoteOn
            } else {
                MidiEvent::NoteOff
            }
        }
        0xA => MidiEvent::AfterTouch,
        0xB => {
            if (64..=69).contains(&msg.key()) {
                if msg.velocity() >= 64 {
                    MidiEvent::SustainOn
                } else {
                    MidiEvent::SustainOff
                }
            } else if msg.key() == CC_ALL_NOTES_OFF && msg.velocity() == 0 {
                MidiEvent::AllNotesOff
            } else {
                MidiEvent::ControlChange
            }
        }
        _ => MidiEvent::Unknown,
    }
}
