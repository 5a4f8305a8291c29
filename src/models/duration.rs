//! Named note durations
//!
//! Each name maps to a length in beats (quarter note = 1 beat).

use std::collections::HashMap;

use num_rational::Rational64;
use once_cell::sync::Lazy;

use super::errors::TokenError;

static DURATION_MAP: Lazy<HashMap<&'static str, Rational64>> = Lazy::new(|| {
    HashMap::from([
        ("whole", Rational64::from_integer(4)),
        ("dotted_whole", Rational64::from_integer(6)),
        ("half", Rational64::from_integer(2)),
        ("dotted_half", Rational64::from_integer(3)),
        ("quarter", Rational64::from_integer(1)),
        ("dotted_quarter", Rational64::new(3, 2)),
        ("eighth", Rational64::new(1, 2)),
        ("dotted_eighth", Rational64::new(3, 4)),
        ("sixteenth", Rational64::new(1, 4)),
        ("16th", Rational64::new(1, 4)),
        ("dotted_sixteenth", Rational64::new(3, 8)),
        ("thirty-second", Rational64::new(1, 8)),
        ("32nd", Rational64::new(1, 8)),
    ])
});

/// Length of a named duration in beats
pub fn duration_beats(token: &str) -> Option<Rational64> {
    DURATION_MAP.get(token).copied()
}

/// Convert a duration name to MIDI ticks
///
/// `ticks = round(beats * ticks_per_beat)`, halves rounded away from zero.
pub fn resolve_duration(token: &str, ticks_per_beat: u16) -> Result<u32, TokenError> {
    let beats = duration_beats(token).ok_or_else(|| {
        log::error!("Unknown duration: {}", token);
        TokenError::UnknownDuration(token.to_string())
    })?;

    let ticks = (beats * Rational64::from_integer(ticks_per_beat as i64)).round();
    Ok(ticks.to_integer() as u32)
}
