//! Score channel to MIDI note events
//!
//! Flattens a channel's sections and bars into an unordered list of
//! absolute-time NoteOn/NoteOff pairs.

use super::defaults::{EncodingContext, MAX_TICK, PERCUSSION_VELOCITY_CAP};
use super::error::{EncodeError, EventLocation, Result};
use super::timeline::absolute_tick;
use crate::models::{resolve_duration, resolve_pitch, Bar, Beat, Channel, Event, Pitch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NoteKind {
    // Declaration order is the sort order at equal ticks
    Off,
    On,
}

/// A NoteOn or NoteOff at an absolute tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicroEvent {
    pub tick: u32,
    pub kind: NoteKind,
    pub key: u8,
    /// Always 0 for `NoteKind::Off`
    pub velocity: u8,
}

impl MicroEvent {
    pub fn on(tick: u32, key: u8, velocity: u8) -> Self {
        Self { tick, kind: NoteKind::On, key, velocity }
    }

    pub fn off(tick: u32, key: u8) -> Self {
        Self { tick, kind: NoteKind::Off, key, velocity: 0 }
    }
}

/// Convert every event of a channel to NoteOn/NoteOff pairs
///
/// Rests produce nothing. The first invalid event aborts the whole channel.
pub fn materialize_channel(channel: &Channel, ctx: &EncodingContext) -> Result<Vec<MicroEvent>> {
    let mut events = Vec::with_capacity(channel.event_count() * 2);

    for section in &channel.sections {
        for bar in &section.bars {
            if bar.index == 0 {
                return Err(EncodeError::InvalidBar {
                    channel: channel.name.clone(),
                    section: section.name.clone(),
                });
            }
            for (index, event) in bar.events.iter().enumerate() {
                let location = || EventLocation {
                    channel: channel.name.clone(),
                    section: section.name.clone(),
                    bar: bar.index,
                    event: index,
                };
                materialize_event(channel, event, bar, ctx, location, &mut events)?;
            }
        }
    }

    log::debug!(
        "Channel '{}': {} events -> {} note messages",
        channel.name,
        channel.event_count(),
        events.len()
    );

    Ok(events)
}

fn materialize_event(
    channel: &Channel,
    event: &Event,
    bar: &Bar,
    ctx: &EncodingContext,
    location: impl Fn() -> EventLocation,
    out: &mut Vec<MicroEvent>,
) -> Result<()> {
    if event.velocity > 127 {
        return Err(EncodeError::InvalidVelocity {
            velocity: event.velocity,
            location: location(),
        });
    }
    if event.beat < Beat::from_integer(1) {
        return Err(EncodeError::InvalidBeat {
            beat: event.beat.to_string(),
            location: location(),
        });
    }

    let is_percussion = channel.is_percussion();
    let key = match resolve_pitch(&event.pitch, is_percussion)
        .map_err(|e| EncodeError::from_token(e, location()))?
    {
        Pitch::Note(key) => key,
        Pitch::Rest => return Ok(()),
    };

    let duration = resolve_duration(&event.duration, ctx.ticks_per_beat)
        .map_err(|e| EncodeError::from_token(e, location()))?;

    // A sounding note lasts at least one tick so its NoteOff follows its NoteOn
    let length = duration.max(1) as u64;
    let (start, end) = match absolute_tick(bar.index, event.beat, ctx.ticks_per_beat) {
        Some(start) => (start, start.saturating_add(length)),
        None => (u64::MAX, u64::MAX),
    };
    if end > MAX_TICK {
        return Err(EncodeError::TickOverflow { tick: end, location: location() });
    }

    let velocity = if is_percussion {
        event.velocity.min(PERCUSSION_VELOCITY_CAP)
    } else {
        event.velocity
    };

    out.push(MicroEvent::on(start as u32, key, velocity));
    out.push(MicroEvent::off(end as u32, key));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PitchToken, Section};

    fn channel(name: &str, bars: Vec<Bar>) -> Channel {
        Channel::new(name, vec![Section::new("A", bars)])
    }

    #[test]
    fn test_melody_bar() {
        let ch = channel(
            "melody",
            vec![Bar::new(1, vec![
                Event::on_beat(1, "C4", "quarter", 80),
                Event::on_beat(2, "D4", "eighth", 70),
            ])],
        );

        let events = materialize_channel(&ch, &EncodingContext::default()).unwrap();
        assert_eq!(
            events,
            vec![
                MicroEvent::on(0, 60, 80),
                MicroEvent::off(480, 60),
                MicroEvent::on(480, 62, 70),
                MicroEvent::off(720, 62),
            ]
        );
    }

    #[test]
    fn test_rest_produces_nothing() {
        let ch = channel(
            "melody",
            vec![Bar::new(1, vec![
                Event::on_beat(1, "rest", "half", 0),
                Event::on_beat(3, "E4", "half", 75),
            ])],
        );

        let events = materialize_channel(&ch, &EncodingContext::default()).unwrap();
        assert_eq!(events, vec![MicroEvent::on(960, 64, 75), MicroEvent::off(1920, 64)]);
    }

    #[test]
    fn test_percussion_velocity_cap() {
        let ch = channel(
            "perc",
            vec![Bar::new(1, vec![
                Event::on_beat(1, "kick", "quarter", 110),
                Event::on_beat(2, "snare", "quarter", 50),
                Event::on_beat(3, "hihat", "quarter", 80),
            ])],
        );

        let events = materialize_channel(&ch, &EncodingContext::default()).unwrap();
        let velocities: Vec<u8> = events
            .iter()
            .filter(|e| e.kind == NoteKind::On)
            .map(|e| e.velocity)
            .collect();
        assert_eq!(velocities, vec![80, 50, 80]);
    }

    #[test]
    fn test_melodic_velocity_not_capped() {
        let ch = channel("lead", vec![Bar::new(1, vec![Event::on_beat(1, "A4", "quarter", 120)])]);
        let events = materialize_channel(&ch, &EncodingContext::default()).unwrap();
        assert_eq!(events[0].velocity, 120);
    }

    #[test]
    fn test_position_from_bar_index_not_order() {
        let ch = channel(
            "melody",
            vec![
                Bar::new(3, vec![Event::on_beat(1, "G4", "quarter", 64)]),
                Bar::new(1, vec![Event::on_beat(1, "C4", "quarter", 64)]),
            ],
        );

        let events = materialize_channel(&ch, &EncodingContext::default()).unwrap();
        assert_eq!(events[0], MicroEvent::on(3840, 67, 64));
        assert_eq!(events[2], MicroEvent::on(0, 60, 64));
    }

    #[test]
    fn test_sections_share_the_bar_timeline() {
        let ch = Channel::new(
            "bass",
            vec![
                Section::new("Intro", vec![Bar::new(1, vec![Event::on_beat(1, "C2", "whole", 90)])]),
                Section::new("Verse", vec![Bar::new(2, vec![Event::on_beat(1, "F2", "whole", 90)])]),
            ],
        );

        let events = materialize_channel(&ch, &EncodingContext::default()).unwrap();
        assert_eq!(events[2], MicroEvent::on(1920, 41, 90));
        assert_eq!(events[3], MicroEvent::off(3840, 41));
    }

    #[test]
    fn test_invalid_pitch_reports_location() {
        let ch = Channel::new(
            "melody",
            vec![Section::new("Chorus", vec![Bar::new(5, vec![
                Event::on_beat(1, "C4", "quarter", 80),
                Event::on_beat(2, "X9", "quarter", 80),
            ])])],
        );

        let err = materialize_channel(&ch, &EncodingContext::default()).unwrap_err();
        match err {
            EncodeError::InvalidPitch { token, location } => {
                assert_eq!(token, "X9");
                assert_eq!(location.channel, "melody");
                assert_eq!(location.section, "Chorus");
                assert_eq!(location.bar, 5);
                assert_eq!(location.event, 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_duration_aborts() {
        let ch = channel("melody", vec![Bar::new(1, vec![Event::on_beat(1, "C4", "forever", 80)])]);
        let err = materialize_channel(&ch, &EncodingContext::default()).unwrap_err();
        assert!(matches!(err, EncodeError::UnknownDuration { ref token, .. } if token == "forever"));
    }

    #[test]
    fn test_rest_with_unknown_duration_is_skipped() {
        // Rests are dropped before their duration is looked at
        let ch = channel("melody", vec![Bar::new(1, vec![Event::on_beat(1, "rest", "forever", 0)])]);
        assert!(materialize_channel(&ch, &EncodingContext::default()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_bar_and_beat() {
        let ch = channel("melody", vec![Bar::new(0, vec![])]);
        assert!(matches!(
            materialize_channel(&ch, &EncodingContext::default()),
            Err(EncodeError::InvalidBar { .. })
        ));

        let ch = channel("melody", vec![Bar::new(1, vec![Event::new(Beat::new(1, 2), "C4", "quarter", 80)])]);
        assert!(matches!(
            materialize_channel(&ch, &EncodingContext::default()),
            Err(EncodeError::InvalidBeat { .. })
        ));
    }

    #[test]
    fn test_invalid_velocity() {
        let ch = channel("melody", vec![Bar::new(1, vec![Event::on_beat(1, "C4", "quarter", 200)])]);
        assert!(matches!(
            materialize_channel(&ch, &EncodingContext::default()),
            Err(EncodeError::InvalidVelocity { velocity: 200, .. })
        ));
    }

    #[test]
    fn test_tick_overflow() {
        let ch = channel("melody", vec![Bar::new(200_000, vec![Event::on_beat(1, "C4", "quarter", 80)])]);
        assert!(matches!(
            materialize_channel(&ch, &EncodingContext::default()),
            Err(EncodeError::TickOverflow { .. })
        ));
    }

    #[test]
    fn test_tick_overflow_with_huge_beat() {
        let ch = channel(
            "melody",
            vec![Bar::new(1, vec![Event::new(Beat::from_integer(9_000_000_000_000_000_000), "C4", "quarter", 80)])],
        );
        assert!(matches!(
            materialize_channel(&ch, &EncodingContext::default()),
            Err(EncodeError::TickOverflow { tick: u64::MAX, .. })
        ));
    }

    #[test]
    fn test_fine_beat_at_high_bar() {
        let beat = Beat::new(4_503_599_627_370_499, 1_125_899_906_842_625);
        let ch = channel("melody", vec![Bar::new(100_000, vec![Event::new(beat, "C4", "quarter", 80)])]);
        let events = materialize_channel(&ch, &EncodingContext::default()).unwrap();
        assert_eq!(events, vec![MicroEvent::on(191_999_520, 60, 80), MicroEvent::off(192_000_000, 60)]);
    }

    #[test]
    fn test_zero_tick_duration_lasts_one_tick() {
        let ctx = EncodingContext { ticks_per_beat: 2, bpm: 120 };
        let ch = channel("melody", vec![Bar::new(1, vec![Event::on_beat(1, "C4", "thirty-second", 80)])]);
        let events = materialize_channel(&ch, &ctx).unwrap();
        assert_eq!(events, vec![MicroEvent::on(0, 60, 80), MicroEvent::off(1, 60)]);
    }

    #[test]
    fn test_numeric_pitch_on_percussion() {
        let ch = channel(
            "perc",
            vec![Bar::new(1, vec![Event::new(Beat::from_integer(1), PitchToken::Number(46), "eighth", 60)])],
        );
        let events = materialize_channel(&ch, &EncodingContext::default()).unwrap();
        assert_eq!(events[0], MicroEvent::on(0, 46, 60));
    }
}
