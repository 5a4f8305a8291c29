//! Default values and per-call settings for MIDI encoding
//!
//! Provides the fixed constants of the encoder and the `EncodingContext`
//! the caller hands to every encode call.

use serde::{Deserialize, Serialize};

use super::error::{EncodeError, Result};

/// Default tempo in beats per minute
pub const DEFAULT_TEMPO_BPM: u32 = 120;

/// Default ticks per quarter note (MIDI resolution)
pub const DEFAULT_TPQ: u16 = 480;

/// Channel 9 (10 in 1-indexed) is reserved for drums
pub const PERCUSSION_CHANNEL: u8 = 9;

/// Loudest velocity emitted on the percussion channel
pub const PERCUSSION_VELOCITY_CAP: u8 = 80;

/// Fixed 4/4 meter
pub const BEATS_PER_BAR: i64 = 4;

/// Largest SMF metrical division (15 bits)
pub const MAX_TPQ: u16 = 0x7FFF;

/// Largest tick position representable as an SMF delta time (28 bits)
pub const MAX_TICK: u64 = 0x0FFF_FFFF;

const MICROSECONDS_PER_MINUTE: u32 = 60_000_000;

/// Largest value of the 24-bit tempo meta event
const MAX_TEMPO: u32 = 0xFF_FFFF;

/// Settings for a single encode call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingContext {
    /// Ticks per quarter-note beat, written as the file's division
    pub ticks_per_beat: u16,

    /// Tempo written to the first track
    pub bpm: u32,
}

impl Default for EncodingContext {
    fn default() -> Self {
        Self {
            ticks_per_beat: DEFAULT_TPQ,
            bpm: DEFAULT_TEMPO_BPM,
        }
    }
}

impl EncodingContext {
    pub fn with_bpm(bpm: u32) -> Self {
        Self {
            bpm,
            ..Self::default()
        }
    }

    /// Check that both settings fit the SMF fields they are written to
    pub fn validate(&self) -> Result<()> {
        if self.ticks_per_beat == 0 || self.ticks_per_beat > MAX_TPQ {
            return Err(EncodeError::InvalidResolution(self.ticks_per_beat));
        }
        if self.bpm == 0 || MICROSECONDS_PER_MINUTE / self.bpm > MAX_TEMPO {
            return Err(EncodeError::InvalidTempo(self.bpm));
        }
        Ok(())
    }

    /// Microseconds per quarter note for the tempo meta event
    pub fn microseconds_per_beat(&self) -> u32 {
        MICROSECONDS_PER_MINUTE / self.bpm
    }
}
