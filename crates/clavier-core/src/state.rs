//! Sounding-note state: the set of currently playing notes.
//!
//! [`NoteState`] is the single owner of what is audible and what is drawn
//! pressed. Every transition starts or stops voices on the [`Sampler`] in the
//! same call that mutates the set, so audio and highlighting never diverge.

use crate::event::{MidiEvent, RawMidiMessage};

/// Opaque handle to a playing voice, owned by the playback collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceId(pub u64);

/// The playback collaborator: an external sampled-instrument player.
///
/// `start` is called on every accepted note-on, `stop` on every note-off or
/// all-notes-off that affects a sounding note. A handle is never stopped
/// without a prior start.
pub trait Sampler {
    fn start(&mut self, key: u8, velocity: u8) -> VoiceId;
    fn stop(&mut self, voice: VoiceId);
}

/// Whether note-ons stack (device input) or replace (pointer input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polyphony {
    Poly,
    Mono,
}

/// A playing note: the voice handle paired with the message that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundingNote {
    pub voice: VoiceId,
    pub message: RawMidiMessage,
}

/// The in-memory set of currently-sounding notes.
#[derive(Debug, Clone)]
pub struct NoteState {
    polyphony: Polyphony,
    sounding: Vec<SoundingNote>,
}

impl NoteState {
    /// Polyphonic state for device input: concurrent notes stack, duplicate
    /// same-key note-ons are kept in raw event order.
    pub fn polyphonic() -> Self {
        Self::new(Polyphony::Poly)
    }

    /// Monophonic state for pointer input: at most one note sounds, and a
    /// note-on for the key already held is a no-op (no re-trigger while the
    /// button stays down).
    pub fn monophonic() -> Self {
        Self::new(Polyphony::Mono)
    }

    pub fn new(polyphony: Polyphony) -> Self {
        Self {
            polyphony,
            sounding: Vec::new(),
        }
    }

    pub fn polyphony(&self) -> Polyphony {
        self.polyphony
    }

    /// Apply one raw message: classify it, transition the sounding set, and
    /// start/stop sampler voices accordingly. Events the state does not care
    /// about (sustain, aftertouch, plain CC, unknown) are dropped.
    pub fn handle(&mut self, msg: RawMidiMessage, sampler: &mut dyn Sampler) {
        match msg.event() {
            MidiEvent::NoteOn => self.note_on(msg, sampler),
            MidiEvent::NoteOff => self.note_off(msg, sampler),
            MidiEvent::AllNotesOff => self.stop_all(sampler),
            _ => {}
        }
    }

    fn note_on(&mut self, msg: RawMidiMessage, sampler: &mut dyn Sampler) {
        match self.polyphony {
            Polyphony::Poly => {
                let voice = sampler.start(msg.key(), msg.velocity());
                self.sounding.push(SoundingNote { voice, message: msg });
            }
            Polyphony::Mono => {
                // Same key still held: ignore, the note keeps ringing.
                if let [note] = self.sounding.as_slice() {
                    if note.message.key() == msg.key() {
                        return;
                    }
                }
                self.stop_all(sampler);
                let voice = sampler.start(msg.key(), msg.velocity());
                self.sounding.push(SoundingNote { voice, message: msg });
            }
        }
    }

    fn note_off(&mut self, msg: RawMidiMessage, sampler: &mut dyn Sampler) {
        match self.polyphony {
            Polyphony::Poly => {
                // A note-off with no matching sounding note filters to
                // nothing, which is the intended no-op.
                self.sounding.retain(|note| {
                    if note.message.key() == msg.key() {
                        sampler.stop(note.voice);
                        false
                    } else {
                        true
                    }
                });
            }
            Polyphony::Mono => self.stop_all(sampler),
        }
    }

    /// Stop every voice and clear the set.
    pub fn stop_all(&mut self, sampler: &mut dyn Sampler) {
        for note in self.sounding.drain(..) {
            sampler.stop(note.voice);
        }
    }

    /// Snapshot of the sounding notes, in start order.
    pub fn sounding(&self) -> &[SoundingNote] {
        &self.sounding
    }

    /// Key codes currently sounding, the renderer's pressed-key set.
    pub fn sounding_keys(&self) -> Vec<u8> {
        self.sounding.iter().map(|n| n.message.key()).collect()
    }

    pub fn is_sounding(&self, key: u8) -> bool {
        self.sounding.iter().any(|n| n.message.key() == key)
    }

    pub fn len(&self) -> usize {
        self.sounding.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounding.is_empty()
    }
}
