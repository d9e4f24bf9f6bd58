//! Keyboard geometry: per-key positions and sizes for rendering.
//!
//! Geometry is a pure function of the note range and the sizing parameters.
//! Recomputing with the same inputs yields bit-identical results, so callers
//! are free to memoize on those inputs.
//!
//! White keys sit side by side at multiples of the white-key width. Black
//! keys overlap their neighbors; their positions come from three derived
//! spacings (see [`layout`]) accumulated letter by letter, the classic piano
//! construction where the C#/D# pair and the F#/G#/A# triplet are spaced
//! differently.

use crate::note::{full_note_of, is_white_key, note_letter};
use crate::range::NoteRange;

/// White or black key classification for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    White,
    Black,
}

/// Geometry of a single key. `y` is always 0; keys hang from the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyGeometry {
    pub key: u8,
    pub kind: KeyKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl KeyGeometry {
    /// Point-in-rectangle test, used for pointer hit-testing.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Sizing parameters for the keyboard: key dimensions plus an overall
/// horizontal offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeySizing {
    pub white_width: f64,
    pub white_height: f64,
    pub black_width: f64,
    pub black_height: f64,
    /// Horizontal offset applied to every key (used for centering).
    pub offset: f64,
}

impl KeySizing {
    /// Default white-key width when nothing is derived from a container.
    pub const DEFAULT_NOTE_WIDTH: f64 = 38.0;

    /// Derive all four dimensions from a single white-key width, using the
    /// proportions of a real piano key.
    pub fn from_note_width(white_width: f64) -> Self {
        let white_height = white_width * 3.125;
        Self {
            white_width,
            white_height,
            black_width: white_width * 0.6,
            black_height: white_height * 0.63,
            offset: 0.0,
        }
    }

    /// Stretch the keyboard across a container: the white-key width is the
    /// container width divided by the white-key count (floored), and the
    /// rounding remainder becomes a centering offset.
    pub fn fit_horizontally(container_width: f64, range: NoteRange) -> Self {
        let white_keys = range.white_key_count() as f64;
        let note_width = (container_width / white_keys).floor();
        let mut sizing = Self::from_note_width(note_width);
        sizing.offset = (container_width - white_keys * note_width) / 2.0;
        sizing
    }

    /// Keep a caller-chosen key width and center the keyboard in the
    /// container. The keyboard may spill out of a narrow container.
    pub fn align_center(container_width: f64, note_width: f64, range: NoteRange) -> Self {
        let white_keys = range.white_key_count() as f64;
        let mut sizing = Self::from_note_width(note_width);
        sizing.offset = (container_width - white_keys * note_width) / 2.0;
        sizing
    }
}

impl Default for KeySizing {
    fn default() -> Self {
        Self::from_note_width(Self::DEFAULT_NOTE_WIDTH)
    }
}

/// Base offset consumed by black keys that logically sit before the range's
/// first white key. Indexed by the first key's letter so a range starting
/// mid-octave still positions its black keys correctly.
fn initial_offset(code: u8, w: f64, b: f64, l: f64, l1: f64, l2: f64) -> f64 {
    match note_letter(code) {
        'E' => w - l1,
        'B' => w - l2,
        'D' => (w - l) / 2.0,
        'G' => w - l - b / 2.0,
        'A' => b / 2.0,
        _ => 0.0,
    }
}

/// Horizontal span a key contributes to the running black-key offset.
fn key_advance(code: u8, b: f64, l: f64, l1: f64, l2: f64) -> f64 {
    if !is_white_key(code) {
        return b;
    }
    match note_letter(code) {
        'C' | 'E' => l1,
        'F' | 'B' => l2,
        _ => l,
    }
}

/// Compute the geometry of every key in `range` under `sizing`.
///
/// Bounds are normalized to white keys first: a black start moves up one
/// semitone, a black end moves down one. The returned sequence covers the
/// normalized bounds inclusive, in ascending key order.
pub fn layout(range: NoteRange, sizing: &KeySizing) -> Vec<KeyGeometry> {
    let mut start = range.start;
    let mut end = range.end;
    if !is_white_key(start) {
        log::warn!(
            "layout range starts on black key {}, using {} instead",
            full_note_of(start),
            full_note_of(start + 1)
        );
        start += 1;
    }
    if !is_white_key(end) {
        end -= 1;
    }
    if start > end {
        return Vec::new();
    }

    let w = sizing.white_width;
    let b = sizing.black_width;
    // L: spacing around black keys in the D/G/A pattern.
    let l = w / 2.0;
    // L1: C-to-C# spacing, also the D#-to-F gap.
    let l1 = (3.0 * w - 2.0 * b - l) / 2.0;
    // L2: F-to-F# spacing, also the A#-to-B gap.
    let l2 = (4.0 * w - 3.0 * b - 2.0 * l) / 2.0;

    let mut keys = Vec::with_capacity((end - start + 1) as usize);
    let mut white_index: usize = 0;
    let mut running = initial_offset(start, w, b, l, l1, l2);

    for code in start..=end {
        if is_white_key(code) {
            keys.push(KeyGeometry {
                key: code,
                kind: KeyKind::White,
                x: white_index as f64 * w + sizing.offset,
                y: 0.0,
                width: w,
                height: sizing.white_height,
            });
            white_index += 1;
        } else {
            keys.push(KeyGeometry {
                key: code,
                kind: KeyKind::Black,
                x: running + sizing.offset,
                y: 0.0,
                width: b,
                height: sizing.black_height,
            });
        }
        running += key_advance(code, b, l, l1, l2);
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizing(w: f64, b: f64) -> KeySizing {
        KeySizing {
            white_width: w,
            white_height: w * 3.125,
            black_width: b,
            black_height: w * 2.0,
            offset: 0.0,
        }
    }

    #[test]
    fn test_full_piano_key_count() {
        let keys = layout(NoteRange::FULL_PIANO, &KeySizing::default());
        assert_eq!(keys.len(), 88);
        assert_eq!(keys.first().map(|k| k.key), Some(21));
        assert_eq!(keys.last().map(|k| k.key), Some(108));
    }

    #[test]
    fn test_white_key_width_sum() {
        let sizing = KeySizing::default();
        let keys = layout(NoteRange::FULL_PIANO, &sizing);
        let white_sum: f64 = keys
            .iter()
            .filter(|k| k.kind == KeyKind::White)
            .map(|k| k.width)
            .sum();
        assert_eq!(white_sum, 52.0 * sizing.white_width);
    }

    #[test]
    fn test_white_keys_tile_contiguously() {
        let sizing = KeySizing::default();
        let keys = layout(NoteRange::FULL_PIANO, &sizing);
        let whites: Vec<&KeyGeometry> =
            keys.iter().filter(|k| k.kind == KeyKind::White).collect();
        for (index, key) in whites.iter().enumerate() {
            assert_eq!(key.x, index as f64 * sizing.white_width);
        }
    }

    #[test]
    fn test_black_key_positions_one_octave() {
        // C4..C5 with W=24, B=12: L=12, L1=18, L2=18
        let keys = layout(NoteRange::new(60, 72), &sizing(24.0, 12.0));
        assert_eq!(keys.len(), 13);

        let x_of = |key: u8| keys.iter().find(|k| k.key == key).map(|k| k.x).unwrap();
        assert_eq!(x_of(61), 18.0); // C#4: L1
        assert_eq!(x_of(63), 42.0); // D#4: L1 + B + L
        assert_eq!(x_of(66), 90.0); // F#4: .. + B + L1 + L2
        assert_eq!(x_of(68), 114.0); // G#4: .. + B + L
        assert_eq!(x_of(70), 138.0); // A#4: .. + B + L

        // each black key straddles the boundary of its two white neighbors
        assert!(x_of(61) < 24.0 && x_of(61) + 12.0 > 24.0);
        assert!(x_of(66) < 96.0 && x_of(66) + 12.0 > 96.0);
    }

    #[test]
    fn test_black_bounds_are_normalized() {
        // C#4 .. A#4 normalizes to D4 .. A4
        let keys = layout(NoteRange::new(61, 70), &KeySizing::default());
        assert_eq!(keys.first().map(|k| k.key), Some(62));
        assert_eq!(keys.last().map(|k| k.key), Some(69));
    }

    #[test]
    fn test_initial_offset_seeds_mid_octave_start() {
        let sizing = sizing(24.0, 12.0);
        // full octave and a range starting at D4 must agree on black key
        // positions relative to their own white keys
        let full = layout(NoteRange::new(60, 72), &sizing);
        let partial = layout(NoteRange::new(62, 72), &sizing);

        let x_in = |keys: &[KeyGeometry], key: u8| {
            keys.iter().find(|k| k.key == key).map(|k| k.x).unwrap()
        };
        // D#4 relative to D4's left edge is the same in both ranges
        let full_rel = x_in(&full, 63) - x_in(&full, 62);
        let partial_rel = x_in(&partial, 63) - x_in(&partial, 62);
        assert_eq!(full_rel, partial_rel);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let range = NoteRange::new(48, 84);
        let sizing = KeySizing::from_note_width(17.0);
        assert_eq!(layout(range, &sizing), layout(range, &sizing));
    }

    #[test]
    fn test_offset_shifts_everything() {
        let mut sizing = KeySizing::default();
        let base = layout(NoteRange::FULL_PIANO, &sizing);
        sizing.offset = 10.0;
        let shifted = layout(NoteRange::FULL_PIANO, &sizing);
        for (a, b) in base.iter().zip(&shifted) {
            assert_eq!(a.x + 10.0, b.x);
        }
    }

    #[test]
    fn test_fit_horizontally() {
        let range = NoteRange::FULL_PIANO;
        let sizing = KeySizing::fit_horizontally(1000.0, range);
        // floor(1000 / 52) = 19, remainder centered
        assert_eq!(sizing.white_width, 19.0);
        assert_eq!(sizing.offset, (1000.0 - 52.0 * 19.0) / 2.0);
    }

    #[test]
    fn test_all_keys_top_aligned() {
        for key in layout(NoteRange::FULL_PIANO, &KeySizing::default()) {
            assert_eq!(key.y, 0.0);
        }
    }
}
