//! Note score encoder WASM API
//!
//! This module provides the JavaScript-facing API for the encoder.
//!
//! # Module Structure
//!
//! - `helpers`: Console logging macros, deserialization and error helpers
//! - `export`: MIDI export functions

pub mod helpers;
pub mod export;

pub use export::{encode_score, encode_score_json};
