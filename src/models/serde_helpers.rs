//! Serde helpers for the note score wire format

use num_rational::Rational64;
use serde::Serializer;

/// Finest beat subdivision kept from a JSON beat number
///
/// Divisible by 2, 3 and 5, so dotted, triplet and quintuplet positions stay
/// exact.
pub const BEAT_GRID: i64 = 3840;

/// Convert a JSON beat number into an exact rational
///
/// Short fractions such as `1.1` or `1.3333333333333333` become `11/10` and
/// `4/3`. Anything finer than `1/BEAT_GRID` is float noise and snaps to the
/// nearest grid step. Fails for NaN, infinities and values outside the `i64`
/// range.
pub fn beat_from_f64(value: f64) -> Result<Rational64, String> {
    if !value.is_finite() {
        return Err(format!("beat {} is not a finite number", value));
    }
    let beat = Rational64::approximate_float(value)
        .ok_or_else(|| format!("beat {} is not representable as a rational", value))?;
    if *beat.denom() <= BEAT_GRID {
        return Ok(beat);
    }
    let steps = (value * BEAT_GRID as f64).round() as i64;
    Ok(Rational64::new(steps, BEAT_GRID))
}

/// Serialize a beat as a plain JSON number (integer when whole)
pub fn serialize_beat<S>(beat: &Rational64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if beat.is_integer() {
        serializer.serialize_i64(beat.to_integer())
    } else {
        serializer.serialize_f64(*beat.numer() as f64 / *beat.denom() as f64)
    }
}
