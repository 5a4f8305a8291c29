//! Pitch token resolution
//!
//! Turns a `PitchToken` into a MIDI note number (or a rest). Note names are
//! spelled `[A-G](#|b)?<octave>` with C4 = 60, and flats are folded onto the
//! sharp spelling before the semitone lookup.

use super::errors::TokenError;
use super::percussion::percussion_note;
use super::score::PitchToken;

/// Token that produces no sounding event
pub const REST: &str = "rest";

/// Chromatic pitch classes, sharp spellings only
const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// A resolved pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pitch {
    /// MIDI note number 0-127
    Note(u8),
    Rest,
}

/// Resolve a pitch token
///
/// # Rules
/// - Integers 0-127 pass through unchanged
/// - `"rest"` resolves to `Pitch::Rest` on any channel
/// - On percussion channels every other name is a drum name (unknown → kick)
/// - Otherwise the name is parsed as a note name
pub fn resolve_pitch(token: &PitchToken, is_percussion: bool) -> Result<Pitch, TokenError> {
    match token {
        PitchToken::Number(n) => match u8::try_from(*n) {
            Ok(note) if note <= 127 => Ok(Pitch::Note(note)),
            _ => Err(TokenError::InvalidPitch(n.to_string())),
        },
        PitchToken::Name(name) if name == REST => Ok(Pitch::Rest),
        PitchToken::Name(name) if is_percussion => Ok(Pitch::Note(percussion_note(name))),
        PitchToken::Name(name) => note_name_to_midi(name).map(Pitch::Note),
    }
}

/// Map a flat spelling onto its enharmonic sharp spelling
///
/// Naturals and sharps are returned unchanged.
fn canonical_spelling(spelling: &str) -> &str {
    match spelling {
        "Cb" => "B",
        "Db" => "C#",
        "Eb" => "D#",
        "Fb" => "E",
        "Gb" => "F#",
        "Ab" => "G#",
        "Bb" => "A#",
        other => other,
    }
}

/// Parse a note name like `"C4"`, `"Eb3"` or `"F#-1"` to a MIDI note number
///
/// The octave is taken as written, so `Cb4` resolves to the same number as
/// `B4`.
pub fn note_name_to_midi(name: &str) -> Result<u8, TokenError> {
    let invalid = || TokenError::InvalidPitch(name.to_string());

    let letter = match name.chars().next() {
        Some(c @ 'A'..='G') => c,
        _ => return Err(invalid()),
    };
    let rest = &name[1..];

    let (spelling, octave_text) = match rest.chars().next() {
        Some(accidental @ ('#' | 'b')) => (format!("{}{}", letter, accidental), &rest[1..]),
        Some(c) if c.is_ascii_digit() || c == '-' => (letter.to_string(), rest),
        _ => return Err(invalid()),
    };

    let octave: i32 = octave_text.parse().map_err(|_| invalid())?;

    let semitone = NOTE_NAMES
        .iter()
        .position(|n| *n == canonical_spelling(&spelling))
        .ok_or_else(invalid)?;

    let midi = (octave + 1) * 12 + semitone as i32;
    if (0..=127).contains(&midi) {
        Ok(midi as u8)
    } else {
        Err(invalid())
    }
}
