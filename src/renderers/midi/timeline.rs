//! Bar/beat to absolute tick conversion
//!
//! Every bar is `BEATS_PER_BAR` beats long. The score carries no meter, so
//! other meters need a new contract here.

use super::defaults::BEATS_PER_BAR;
use crate::models::Beat;

/// Absolute tick of a beat inside a bar
///
/// Beat 1 of bar 1 is tick 0. `bar_index` and `beat` must both be at least
/// 1; earlier positions clamp to tick 0. Returns `None` when the tick does
/// not fit in a `u64`.
///
/// # Example
/// - bar = 2, beat = 1, tpq = 480
/// - absolute beat = 4 + 1 = 5
/// - tick = (5 - 1) * 480 = 1920
pub fn absolute_tick(bar_index: u32, beat: Beat, ticks_per_beat: u16) -> Option<u64> {
    // Widened to i128: every u32 bar, i64 ratio and u16 resolution fits
    let numer = *beat.numer() as i128;
    let denom = *beat.denom() as i128;
    let bar_offset = (bar_index as i128 - 1) * BEATS_PER_BAR as i128;

    // (absolute beat - 1) * ticks_per_beat, over `denom`
    let scaled = (bar_offset * denom + numer - denom) * ticks_per_beat as i128;
    if scaled <= 0 {
        return Some(0);
    }

    // Round half away from zero
    let ticks = (2 * scaled + denom) / (2 * denom);
    u64::try_from(ticks).ok()
}
