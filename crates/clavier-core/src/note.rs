//! Note codec: conversions between MIDI key codes and note names.
//!
//! The canonical representation everywhere in this crate is the numeric MIDI
//! key code (`u8`, 0-127). Note name strings like `C#4` or `Bb2` exist only
//! at the boundary and are parsed exactly once via [`key_code`].

use crate::error::{Error, Result};

/// The 12 semitone names of an octave, sharp spelling only.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Lowest key of a full piano: A0
pub const PIANO_LOW: u8 = 21;

/// Highest key of a full piano: C8
pub const PIANO_HIGH: u8 = 108;

/// MIDI octave of a key code (octave -1 starts at code 0).
pub fn octave_of(code: u8) -> i8 {
    (code / 12) as i8 - 1
}

/// Semitone name of a key code, without the octave.
pub fn note_name_of(code: u8) -> &'static str {
    NOTE_NAMES[(code % 12) as usize]
}

/// Full note name of a key code, e.g. `60` -> `"C4"`.
pub fn full_note_of(code: u8) -> String {
    format!("{}{}", note_name_of(code), octave_of(code))
}

/// A key is white iff its semitone name carries no sharp.
pub fn is_white_key(code: u8) -> bool {
    !note_name_of(code).contains('#')
}

/// First letter of a key's semitone name (`'C'` for both C and C#).
pub(crate) fn note_letter(code: u8) -> char {
    note_name_of(code).as_bytes()[0] as char
}

/// Parse a note name into a MIDI key code.
///
/// The format is `<Letter>[#|b]<Octave>`: `C#5`, `D4`, `A0`, `Cb3`. No double
/// accidentals. Flats are accepted on input but never produced on output;
/// `full_note_of` always spells sharps.
///
/// A purely numeric string is passed through as a code unchanged, mirroring
/// the number-or-name duality of call sites that store either form.
pub fn key_code(name: &str) -> Result<u8> {
    let invalid = || Error::InvalidNoteName(name.to_string());

    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
        return name.parse::<u8>().map_err(|_| invalid());
    }

    let mut chars = name.chars();
    let letter_offset: i32 = match chars.next() {
        Some('C') => 0,
        Some('D') => 2,
        Some('E') => 4,
        Some('F') => 5,
        Some('G') => 7,
        Some('A') => 9,
        Some('B') => 11,
        _ => return Err(invalid()),
    };

    let rest = chars.as_str();
    let (accidental_offset, octave_str): (i32, &str) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('b') => (-1, &rest[1..]),
        _ => (0, rest),
    };

    let octave: i32 = octave_str.parse().map_err(|_| invalid())?;
    let code = 12 + octave * 12 + letter_offset + accidental_offset;
    u8::try_from(code).ok().filter(|&c| c <= 127).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_note_of() {
        assert_eq!(full_note_of(21), "A0");
        assert_eq!(full_note_of(60), "C4");
        assert_eq!(full_note_of(61), "C#4");
        assert_eq!(full_note_of(108), "C8");
        assert_eq!(full_note_of(0), "C-1");
    }

    #[test]
    fn test_octave_of() {
        assert_eq!(octave_of(0), -1);
        assert_eq!(octave_of(21), 0);
        assert_eq!(octave_of(60), 4);
        assert_eq!(octave_of(127), 9);
    }

    #[test]
    fn test_round_trip_all_codes() {
        for code in 0..=127u8 {
            assert_eq!(key_code(&full_note_of(code)), Ok(code));
        }
    }

    #[test]
    fn test_is_white_key_matches_spelling() {
        for code in 0..=127u8 {
            assert_eq!(is_white_key(code), !full_note_of(code).contains('#'));
        }
        assert!(is_white_key(60)); // C4
        assert!(!is_white_key(61)); // C#4
    }

    #[test]
    fn test_flats_accepted_on_input() {
        assert_eq!(key_code("Db4"), Ok(61));
        assert_eq!(key_code("Bb2"), Ok(46));
        // Cb wraps down into the previous octave
        assert_eq!(key_code("Cb4"), Ok(59));
    }

    #[test]
    fn test_numeric_passthrough() {
        assert_eq!(key_code("60"), Ok(60));
        assert_eq!(key_code("0"), Ok(0));
    }

    #[test]
    fn test_invalid_names() {
        assert!(key_code("H4").is_err());
        assert!(key_code("").is_err());
        assert!(key_code("C#").is_err());
        assert!(key_code("C#x").is_err());
        assert!(key_code("G12").is_err()); // above 127
        assert!(key_code("300").is_err());
    }
}
