//! Token resolution errors
//!
//! Raised by the standalone pitch and duration resolvers, which know the
//! offending token but not where in the score it came from.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Note name, accidental or octave could not be parsed, or the note is outside 0-127
    #[error("invalid pitch: {0}")]
    InvalidPitch(String),

    /// Duration name is not in the duration table
    #[error("unknown duration: {0}")]
    UnknownDuration(String),
}
