use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};

use super::converter::NoteKind;
use super::defaults::EncodingContext;
use super::error::{EncodeError, Result};
use super::scheduler::ScheduledEvent;

/// One score channel, ready for serialization
#[derive(Debug, Clone)]
pub struct ChannelTrack<'a> {
    pub name: &'a str,
    pub channel: u8,         // MIDI channel 0-15 (9 = drums)
    pub events: Vec<ScheduledEvent>,
}

/// Write channel tracks to a Standard MIDI File (SMF) Format 1
///
/// One `MTrk` per channel, in the given order. The first track also carries
/// the tempo. Zero tracks is valid and produces a header-only file.
pub fn write_smf(tracks: &[ChannelTrack], ctx: &EncodingContext, out: &mut Vec<u8>) -> Result<()> {
    let smf_tracks = tracks
        .iter()
        .enumerate()
        .map(|(index, track)| {
            let tempo = (index == 0).then(|| ctx.microseconds_per_beat());
            build_channel_track(track, tempo)
        })
        .collect();

    let header = Header {
        format: Format::Parallel,
        timing: Timing::Metrical(ctx.ticks_per_beat.into()),
    };

    let smf = Smf {
        header,
        tracks: smf_tracks,
    };

    smf.write(out)
        .map_err(|e| EncodeError::Midi(format!("Failed to write MIDI: {}", e)))?;

    Ok(())
}

fn build_channel_track<'a>(track: &ChannelTrack<'a>, tempo: Option<u32>) -> Track<'a> {
    let mut events = Vec::with_capacity(track.events.len() + 3);

    // Track name
    events.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(track.name.as_bytes())),
    });

    if let Some(microseconds_per_quarter) = tempo {
        events.push(TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(microseconds_per_quarter.into())),
        });
    }

    for scheduled in &track.events {
        let note = scheduled.event;
        let message = match note.kind {
            NoteKind::On => MidiMessage::NoteOn {
                key: note.key.into(),
                vel: note.velocity.into(),
            },
            NoteKind::Off => MidiMessage::NoteOff {
                key: note.key.into(),
                vel: 0.into(),
            },
        };
        events.push(TrackEvent {
            delta: scheduled.delta.into(),
            kind: TrackEventKind::Midi {
                channel: track.channel.into(),
                message,
            },
        });
    }

    // End of track
    events.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    events
}
