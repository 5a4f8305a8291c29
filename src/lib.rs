//! Note Score MIDI Encoder WASM Module
//!
//! Encodes a hierarchical note score (channels of sections of bars of
//! events) into Standard MIDI File bytes.

pub mod models;
pub mod renderers;
pub mod api;

// Re-export commonly used types
pub use models::score::*;
pub use renderers::midi::{encode, encode_to_file, EncodeError, EncodingContext};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A logger may already be installed by the host page
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Note score MIDI encoder WASM module initialized");
}
