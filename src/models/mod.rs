//! Models module for the note score encoder
//!
//! This module contains the note score data model and the fixed lookup
//! tables (pitch names, durations, percussion) used to resolve its tokens.

pub mod score;
pub mod pitch;
pub mod duration;
pub mod percussion;
pub mod errors;
pub mod serde_helpers;

// Re-export commonly used types
pub use score::*;
pub use pitch::{resolve_pitch, Pitch};
pub use duration::resolve_duration;
pub use errors::TokenError;
