//! Pointer input: turns mouse events on the rendered keyboard into raw
//! MIDI messages.
//!
//! Press and drag-onto-key send `[0x90, key, velocity]` with the configured
//! mouse velocity, release over a key sends `[0x80, key, 0]`, dragging off
//! the keys sends the all-notes-off message `[0xB0, 123, 0]`. The
//! monophonic note state downstream deduplicates the repeated note-ons a
//! drag produces.

use clavier_core::{KeyGeometry, KeyKind, RawMidiMessage};
use crossterm::event::{MouseButton, MouseEventKind};

/// Find the key under a point. Black keys overlap white keys and sit on
/// top, so they are tested first.
pub fn hit_test(keys: &[KeyGeometry], x: f64, y: f64) -> Option<u8> {
    keys.iter()
        .filter(|k| k.kind == KeyKind::Black)
        .chain(keys.iter().filter(|k| k.kind == KeyKind::White))
        .find(|k| k.contains(x, y))
        .map(|k| k.key)
}

/// Tracks the mouse button across events and synthesizes messages.
#[derive(Debug)]
pub struct PointerInput {
    /// Velocity for the note-ons this pointer produces (1-127)
    velocity: u8,
    button_down: bool,
}

impl PointerInput {
    pub fn new(velocity: u8) -> Self {
        Self {
            velocity,
            button_down: false,
        }
    }

    fn note_on(&self, key: u8) -> RawMidiMessage {
        RawMidiMessage::new(0x90, key, self.velocity)
    }

    /// Translate one mouse event into a raw message, if any. `x`/`y` are in
    /// the same coordinate space as `keys` (the caller subtracts the
    /// keyboard area's origin).
    pub fn handle(
        &mut self,
        kind: MouseEventKind,
        x: f64,
        y: f64,
        keys: &[KeyGeometry],
    ) -> Option<RawMidiMessage> {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.button_down = true;
                hit_test(keys, x, y).map(|key| self.note_on(key))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.button_down = false;
                hit_test(keys, x, y).map(RawMidiMessage::note_off)
            }
            MouseEventKind::Drag(MouseButton::Left) if self.button_down => {
                match hit_test(keys, x, y) {
                    Some(key) => Some(self.note_on(key)),
                    // dragged off the keyboard while held: silence everything
                    None => Some(RawMidiMessage::all_notes_off()),
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clavier_core::{layout, KeySizing, NoteRange};

    fn octave_keys() -> Vec<KeyGeometry> {
        // C4..C5, W=24, B=12
        let sizing = KeySizing {
            white_width: 24.0,
            white_height: 75.0,
            black_width: 12.0,
            black_height: 47.0,
            offset: 0.0,
        };
        layout(NoteRange::new(60, 72), &sizing)
    }

    #[test]
    fn test_hit_test_prefers_black_keys() {
        let keys = octave_keys();
        // C#4 spans x 18..30; above the black key height it is C4 or D4
        assert_eq!(hit_test(&keys, 20.0, 10.0), Some(61));
        assert_eq!(hit_test(&keys, 20.0, 60.0), Some(60));
        assert_eq!(hit_test(&keys, 28.0, 60.0), Some(62));
    }

    #[test]
    fn test_hit_test_outside_keyboard() {
        let keys = octave_keys();
        assert_eq!(hit_test(&keys, -1.0, 10.0), None);
        assert_eq!(hit_test(&keys, 500.0, 10.0), None);
        assert_eq!(hit_test(&keys, 20.0, 80.0), None);
    }

    #[test]
    fn test_press_and_release() {
        let keys = octave_keys();
        let mut pointer = PointerInput::new(127);

        let msg = pointer.handle(MouseEventKind::Down(MouseButton::Left), 2.0, 60.0, &keys);
        assert_eq!(msg, Some(RawMidiMessage::note_on(60)));

        let msg = pointer.handle(MouseEventKind::Up(MouseButton::Left), 2.0, 60.0, &keys);
        assert_eq!(msg, Some(RawMidiMessage::note_off(60)));
    }

    #[test]
    fn test_note_on_carries_configured_velocity() {
        let keys = octave_keys();
        let mut pointer = PointerInput::new(90);

        let msg = pointer.handle(MouseEventKind::Down(MouseButton::Left), 2.0, 60.0, &keys);
        assert_eq!(msg, Some(RawMidiMessage::new(0x90, 60, 90)));

        // drag onto another key keeps the same velocity
        let msg = pointer.handle(MouseEventKind::Drag(MouseButton::Left), 30.0, 60.0, &keys);
        assert_eq!(msg, Some(RawMidiMessage::new(0x90, 62, 90)));

        // note-off stays velocity 0 regardless
        let msg = pointer.handle(MouseEventKind::Up(MouseButton::Left), 30.0, 60.0, &keys);
        assert_eq!(msg, Some(RawMidiMessage::new(0x80, 62, 0)));
    }

    #[test]
    fn test_drag_across_keys() {
        let keys = octave_keys();
        let mut pointer = PointerInput::new(127);

        pointer.handle(MouseEventKind::Down(MouseButton::Left), 2.0, 60.0, &keys);
        let msg = pointer.handle(MouseEventKind::Drag(MouseButton::Left), 30.0, 60.0, &keys);
        assert_eq!(msg, Some(RawMidiMessage::note_on(62)));

        // dragging off the keyboard silences everything
        let msg = pointer.handle(MouseEventKind::Drag(MouseButton::Left), 30.0, 80.0, &keys);
        assert_eq!(msg, Some(RawMidiMessage::all_notes_off()));
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let keys = octave_keys();
        let mut pointer = PointerInput::new(127);
        let msg = pointer.handle(MouseEventKind::Drag(MouseButton::Left), 2.0, 60.0, &keys);
        assert_eq!(msg, None);
    }

    #[test]
    fn test_other_buttons_are_ignored() {
        let keys = octave_keys();
        let mut pointer = PointerInput::new(127);
        let msg = pointer.handle(MouseEventKind::Down(MouseButton::Right), 2.0, 60.0, &keys);
        assert_eq!(msg, None);
        let msg = pointer.handle(MouseEventKind::Moved, 2.0, 60.0, &keys);
        assert_eq!(msg, None);
    }
}
