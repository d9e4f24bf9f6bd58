//! Range analysis: enumerating keys, counting white keys, validating
//! intervals against the full piano span (A0..C8).

use crate::error::Result;
use crate::note::{full_note_of, is_white_key, key_code, PIANO_HIGH, PIANO_LOW};

/// An inclusive range of MIDI key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteRange {
    pub start: u8,
    pub end: u8,
}

impl NoteRange {
    /// The full 88-key piano span, A0..C8.
    pub const FULL_PIANO: NoteRange = NoteRange {
        start: PIANO_LOW,
        end: PIANO_HIGH,
    };

    pub fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }

    /// Parse a range from two note names (or numeric codes).
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(key_code(start)?, key_code(end)?))
    }

    /// A range is valid iff both bounds sit inside the piano span and the
    /// start strictly precedes the end.
    pub fn is_valid(&self) -> bool {
        is_interval_valid(self.start, self.end)
    }

    /// All key codes in the range.
    pub fn codes(&self) -> impl Iterator<Item = u8> {
        self.start..=self.end
    }

    /// All keys in the range as full note names.
    pub fn keys(&self) -> Vec<String> {
        keys_in_range(self.start, self.end)
    }

    pub fn white_key_count(&self) -> usize {
        white_key_count(self.start, self.end)
    }
}

/// Every key from `start` to `end` inclusive, as full note names.
pub fn keys_in_range(start: u8, end: u8) -> Vec<String> {
    (start..=end).map(full_note_of).collect()
}

/// Count of white keys in `[start, end]`.
pub fn white_key_count(start: u8, end: u8) -> usize {
    (start..=end).filter(|&c| is_white_key(c)).count()
}

/// White keys in `[start, end]` as full note names.
///
/// This is the option list for range selectors: start/end choices are
/// restricted to white keys of the full piano.
pub fn white_keys_in_range(start: u8, end: u8) -> Vec<String> {
    (start..=end)
        .filter(|&c| is_white_key(c))
        .map(full_note_of)
        .collect()
}

/// True iff both bounds lie inside A0..C8 and `start` strictly precedes
/// `end`. Equal or reversed bounds are invalid, as are bounds outside the
/// instrument span even when numerically orderable.
pub fn is_interval_valid(start: u8, end: u8) -> bool {
    (PIANO_LOW..=PIANO_HIGH).contains(&start)
        && (PIANO_LOW..=PIANO_HIGH).contains(&end)
        && start < end
}
