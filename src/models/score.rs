//! Note score data model
//!
//! The score is a fixed-shape hierarchy: channels of sections of bars of
//! events. Timeline position comes from each bar's stored index, never from
//! its position in the `bars` list.

use serde::{Deserialize, Serialize};

use super::serde_helpers::{beat_from_f64, serialize_beat};

/// Beat position inside a bar (1 = first beat)
pub type Beat = num_rational::Rational64;

/// Channel name that selects percussion routing (case-sensitive)
pub const PERCUSSION_CHANNEL_NAME: &str = "perc";

/// Complete input to the encoder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteScore {
    /// One entry per output track, in output order
    pub channels: Vec<Channel>,
}

impl NoteScore {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }

    /// Parse a score from its JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Total number of events over every channel, rests included
    pub fn event_count(&self) -> usize {
        self.channels.iter().map(Channel::event_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(rename = "channel")]
    pub name: String,
    pub sections: Vec<Section>,
}

impl Channel {
    pub fn new(name: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            name: name.into(),
            sections,
        }
    }

    pub fn is_percussion(&self) -> bool {
        self.name == PERCUSSION_CHANNEL_NAME
    }

    pub fn event_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| s.bars.iter())
            .map(|b| b.events.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "section")]
    pub name: String,
    pub bars: Vec<Bar>,
}

impl Section {
    pub fn new(name: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            name: name.into(),
            bars,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// 1-based bar number
    #[serde(rename = "bar")]
    pub index: u32,
    /// Unordered; each event carries its own beat
    pub events: Vec<Event>,
}

impl Bar {
    pub fn new(index: u32, events: Vec<Event>) -> Self {
        Self { index, events }
    }
}

/// A pitch as written by the producer, before resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PitchToken {
    /// MIDI note number
    Number(i32),
    /// `"rest"`, a note name like `"Eb3"`, or a percussion name like `"snare"`
    Name(String),
}

impl From<&str> for PitchToken {
    fn from(name: &str) -> Self {
        PitchToken::Name(name.to_string())
    }
}

impl From<String> for PitchToken {
    fn from(name: String) -> Self {
        PitchToken::Name(name)
    }
}

impl From<u8> for PitchToken {
    fn from(note: u8) -> Self {
        PitchToken::Number(note as i32)
    }
}

impl std::fmt::Display for PitchToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PitchToken::Number(n) => write!(f, "{}", n),
            PitchToken::Name(s) => f.write_str(s),
        }
    }
}

/// A single timed note event
///
/// Accepts both the named object form and the positional
/// `[beat, pitch, duration, velocity]` list on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventRepr")]
pub struct Event {
    #[serde(serialize_with = "serialize_beat")]
    pub beat: Beat,
    pub pitch: PitchToken,
    pub duration: String,
    pub velocity: u8,
}

impl Event {
    pub fn new(
        beat: Beat,
        pitch: impl Into<PitchToken>,
        duration: impl Into<String>,
        velocity: u8,
    ) -> Self {
        Self {
            beat,
            pitch: pitch.into(),
            duration: duration.into(),
            velocity,
        }
    }

    /// Event on a whole-number beat
    pub fn on_beat(
        beat: i64,
        pitch: impl Into<PitchToken>,
        duration: impl Into<String>,
        velocity: u8,
    ) -> Self {
        Self::new(Beat::from_integer(beat), pitch, duration, velocity)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventRepr {
    Named {
        beat: f64,
        pitch: PitchToken,
        duration: String,
        velocity: u8,
    },
    Positional(f64, PitchToken, String, u8),
}

impl TryFrom<EventRepr> for Event {
    type Error = String;

    fn try_from(repr: EventRepr) -> Result<Self, Self::Error> {
        let (beat, pitch, duration, velocity) = match repr {
            EventRepr::Named { beat, pitch, duration, velocity } => (beat, pitch, duration, velocity),
            EventRepr::Positional(beat, pitch, duration, velocity) => (beat, pitch, duration, velocity),
        };

        Ok(Event {
            beat: beat_from_f64(beat)?,
            pitch,
            duration,
            velocity,
        })
    }
}
