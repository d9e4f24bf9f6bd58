//! clavier-core - MIDI event interpretation and keyboard geometry
//!
//! The pure-logic layer behind the clavier virtual piano:
//!
//! - Note codec: MIDI key codes <-> note names, white/black classification
//! - Range analysis: key enumeration, white-key counting, interval validity
//! - MIDI classification: raw 3-byte messages -> semantic events
//! - Note state: the set of currently-sounding notes, mono or poly
//! - Keyboard layout: per-key pixel geometry for arbitrary ranges
//!
//! Everything here is synchronous and side-effect-free except [`NoteState`],
//! which drives the injected [`Sampler`] as part of its transitions. There is
//! no I/O and no UI; the terminal front end lives in `clavier-tui`.
//!
//! # Example
//!
//! ```
//! use clavier_core::{layout, KeySizing, NoteRange, NoteState, RawMidiMessage};
//! # use clavier_core::{Sampler, VoiceId};
//! # struct Silent(u64);
//! # impl Sampler for Silent {
//! #     fn start(&mut self, _: u8, _: u8) -> VoiceId { self.0 += 1; VoiceId(self.0) }
//! #     fn stop(&mut self, _: VoiceId) {}
//! # }
//!
//! let range = NoteRange::parse("A0", "C8").unwrap();
//! assert!(range.is_valid());
//!
//! let keys = layout(range, &KeySizing::default());
//! assert_eq!(keys.len(), 88);
//!
//! # let mut sampler = Silent(0);
//! let mut state = NoteState::polyphonic();
//! state.handle(RawMidiMessage::note_on(60), &mut sampler);
//! assert!(state.is_sounding(60));
//! ```

pub mod error;
pub mod event;
pub mod layout;
pub mod note;
pub mod range;
pub mod state;

// Re-export main types
pub use error::{Error, Result};
pub use event::{classify, MidiEvent, RawMidiMessage, CC_ALL_NOTES_OFF};
pub use layout::{layout, KeyGeometry, KeyKind, KeySizing};
pub use note::{
    full_note_of, is_white_key, key_code, note_name_of, octave_of, NOTE_NAMES, PIANO_HIGH,
    PIANO_LOW,
};
pub use range::{
    is_interval_valid, keys_in_range, white_key_count, white_keys_in_range, NoteRange,
};
pub use state::{NoteState, Polyphony, Sampler, SoundingNote, VoiceId};
