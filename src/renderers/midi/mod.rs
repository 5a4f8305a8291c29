//! Note score to Standard MIDI File encoding
//!
//! This module turns a `NoteScore` into SMF Format 1 bytes, one track per
//! score channel.
//!
//! # Pipeline
//! 1. `channels`: assign MIDI channel numbers (percussion on 9)
//! 2. `converter`: resolve pitches, durations and bar/beat positions into
//!    NoteOn/NoteOff pairs
//! 3. `scheduler`: sort each channel's events and compute delta times
//! 4. `write`: serialize tracks and the tempo with `midly`
//!
//! # Usage
//! ```rust,ignore
//! use score_midi_wasm::renderers::midi::{encode, EncodingContext};
//!
//! let bytes = encode(&score, &EncodingContext::with_bpm(96))?;
//! ```

pub mod channels;
pub mod converter;
pub mod defaults;
pub mod error;
pub mod scheduler;
pub mod timeline;
pub mod write;

use std::path::Path;

use crate::models::NoteScore;

pub use defaults::{EncodingContext, DEFAULT_TEMPO_BPM, DEFAULT_TPQ, PERCUSSION_CHANNEL};
pub use error::{EncodeError, EventLocation, Result};
pub use timeline::absolute_tick;
pub use write::write_smf;

/// Encode a score as Standard MIDI File bytes
///
/// The first invalid event aborts the whole encode. Encoding the same score
/// with the same context always yields the same bytes.
pub fn encode(score: &NoteScore, ctx: &EncodingContext) -> Result<Vec<u8>> {
    ctx.validate()?;
    let assigned = channels::assign_channels(score)?;

    let mut tracks = Vec::with_capacity(score.channels.len());
    for (channel, number) in score.channels.iter().zip(assigned) {
        let events = converter::materialize_channel(channel, ctx)?;
        tracks.push(write::ChannelTrack {
            name: &channel.name,
            channel: number,
            events: scheduler::schedule(events),
        });
    }

    let mut out = Vec::new();
    write_smf(&tracks, ctx, &mut out)?;

    log::info!(
        "Encoded {} channels ({} events) at {} BPM: {} bytes",
        score.channels.len(),
        score.event_count(),
        ctx.bpm,
        out.len()
    );

    Ok(out)
}

/// Encode a score and write it to a `.mid` file
pub fn encode_to_file(score: &NoteScore, ctx: &EncodingContext, path: impl AsRef<Path>) -> Result<()> {
    let bytes = encode(score, ctx)?;
    std::fs::write(path.as_ref(), &bytes)?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), path.as_ref().display());
    Ok(())
}
