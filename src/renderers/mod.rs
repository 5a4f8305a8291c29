//! Renderers module for the note score encoder
//!
//! This module contains export logic for converting a note score
//! into binary output formats.

pub mod midi;

// Re-export commonly used types
pub use midi::{encode, encode_to_file, EncodeError, EncodingContext};
