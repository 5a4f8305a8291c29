//! MIDI channel assignment
//!
//! - The `"perc"` channel always plays on channel 9
//! - Every other channel gets the next free number, skipping 9

use std::collections::HashSet;

use super::defaults::PERCUSSION_CHANNEL;
use super::error::{EncodeError, Result};
use crate::models::NoteScore;

/// Number of MIDI channels available to melodic tracks
pub const MELODIC_CHANNEL_COUNT: usize = 15;

/// Melodic channel number for the n-th non-percussion channel (0-based)
pub fn melodic_channel(index: usize) -> Option<u8> {
    if index >= MELODIC_CHANNEL_COUNT {
        return None;
    }
    let channel = index as u8;
    if channel >= PERCUSSION_CHANNEL {
        Some(channel + 1)
    } else {
        Some(channel)
    }
}

/// Assign a MIDI channel to each score channel, in score order
pub fn assign_channels(score: &NoteScore) -> Result<Vec<u8>> {
    let mut seen = HashSet::new();
    for channel in &score.channels {
        if !seen.insert(channel.name.as_str()) {
            return Err(EncodeError::DuplicateChannel(channel.name.clone()));
        }
    }

    let requested = score.channels.iter().filter(|c| !c.is_percussion()).count();
    if requested > MELODIC_CHANNEL_COUNT {
        return Err(EncodeError::ChannelExhausted { requested });
    }

    let mut next_melodic = 0;
    let mut assigned = Vec::with_capacity(score.channels.len());
    for channel in &score.channels {
        if channel.is_percussion() {
            assigned.push(PERCUSSION_CHANNEL);
        } else {
            let number = melodic_channel(next_melodic)
                .ok_or(EncodeError::ChannelExhausted { requested })?;
            assigned.push(number);
            next_melodic += 1;
        }
    }

    Ok(assigned)
}
