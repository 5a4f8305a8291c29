//! Error types for score encoding

use std::fmt;

use thiserror::Error;

use crate::models::TokenError;

/// Where an event sits in the score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLocation {
    pub channel: String,
    pub section: String,
    pub bar: u32,
    /// Position of the event within its bar's event list (0-based)
    pub event: usize,
}

impl fmt::Display for EventLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "channel '{}', section '{}', bar {}, event {}",
            self.channel, self.section, self.bar, self.event
        )
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("invalid pitch '{token}' at {location}")]
    InvalidPitch { token: String, location: EventLocation },

    #[error("unknown duration '{token}' at {location}")]
    UnknownDuration { token: String, location: EventLocation },

    #[error("velocity {velocity} out of range 0-127 at {location}")]
    InvalidVelocity { velocity: u8, location: EventLocation },

    #[error("beat {beat} is before the start of the bar at {location}")]
    InvalidBeat { beat: String, location: EventLocation },

    #[error("bar index 0 in channel '{channel}', section '{section}' (bars are numbered from 1)")]
    InvalidBar { channel: String, section: String },

    #[error("tick {tick} exceeds the MIDI delta-time range at {location}")]
    TickOverflow { tick: u64, location: EventLocation },

    #[error("{requested} melodic channels requested, at most 15 are available")]
    ChannelExhausted { requested: usize },

    #[error("duplicate channel name '{0}'")]
    DuplicateChannel(String),

    #[error("tempo {0} BPM cannot be encoded")]
    InvalidTempo(u32),

    #[error("ticks per beat {0} cannot be encoded (1-32767)")]
    InvalidResolution(u16),

    #[error("midi write error: {0}")]
    Midi(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EncodeError {
    /// Attach a score location to a token resolution error
    pub fn from_token(err: TokenError, location: EventLocation) -> Self {
        match err {
            TokenError::InvalidPitch(token) => EncodeError::InvalidPitch { token, location },
            TokenError::UnknownDuration(token) => EncodeError::UnknownDuration { token, location },
        }
    }

    /// Location of the offending event, for per-event errors
    pub fn location(&self) -> Option<&EventLocation> {
        match self {
            EncodeError::InvalidPitch { location, .. }
            | EncodeError::UnknownDuration { location, .. }
            | EncodeError::InvalidVelocity { location, .. }
            | EncodeError::InvalidBeat { location, .. }
            | EncodeError::TickOverflow { location, .. } => Some(location),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EncodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> EventLocation {
        EventLocation {
            channel: "melody".to_string(),
            section: "Verse".to_string(),
            bar: 3,
            event: 1,
        }
    }

    #[test]
    fn test_from_token_keeps_token_and_location() {
        let err = EncodeError::from_token(TokenError::InvalidPitch("H4".to_string()), location());
        assert_eq!(
            err.to_string(),
            "invalid pitch 'H4' at channel 'melody', section 'Verse', bar 3, event 1"
        );
        assert_eq!(err.location(), Some(&location()));

        let err = EncodeError::from_token(TokenError::UnknownDuration("long".to_string()), location());
        assert!(matches!(err, EncodeError::UnknownDuration { ref token, .. } if token == "long"));
    }

    #[test]
    fn test_score_level_errors_have_no_location() {
        assert!(EncodeError::ChannelExhausted { requested: 16 }.location().is_none());
        assert!(EncodeError::DuplicateChannel("bass".to_string()).location().is_none());
    }
}
