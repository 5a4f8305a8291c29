//! Export operations for the WASM API
//!
//! This module exposes MIDI encoding of a note score to JavaScript:
//! - `encodeScore`: score as a JavaScript object
//! - `encodeScoreJson`: score as a JSON string

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, js_error, to_uint8_array};
use crate::models::NoteScore;
use crate::renderers::midi::{encode, EncodingContext};
use crate::{wasm_info, wasm_log};

fn context_for(bpm: Option<u32>) -> EncodingContext {
    bpm.map(EncodingContext::with_bpm).unwrap_or_default()
}

fn encode_for_js(score: &NoteScore, bpm: Option<u32>) -> Result<js_sys::Uint8Array, JsValue> {
    let ctx = context_for(bpm);
    wasm_log!(
        "  Score has {} channels, {} events (bpm={})",
        score.channels.len(),
        score.event_count(),
        ctx.bpm
    );

    let midi_bytes = encode(score, &ctx).map_err(|e| js_error("MIDI encode error", e))?;

    wasm_info!("  MIDI generated: {} bytes", midi_bytes.len());
    Ok(to_uint8_array(&midi_bytes))
}

// ============================================================================
// MIDI Export
// ============================================================================

/// Encode a note score object to MIDI
///
/// # Parameters
/// - `score`: `{ channels: [{ channel, sections: [{ section, bars: [{ bar, events }] }] }] }`
/// - `bpm`: Optional tempo (default: 120)
///
/// # Returns
/// MIDI file as Uint8Array (Standard MIDI File Format 1)
#[wasm_bindgen(js_name = encodeScore)]
pub fn encode_score(score: JsValue, bpm: Option<u32>) -> Result<js_sys::Uint8Array, JsValue> {
    wasm_info!("encodeScore called with bpm={:?}", bpm);

    let score: NoteScore = deserialize(score, "Invalid note score")?;
    let result = encode_for_js(&score, bpm)?;

    wasm_info!("encodeScore completed successfully");
    Ok(result)
}

/// Encode a note score JSON string to MIDI
///
/// Events may be objects or `[beat, pitch, duration, velocity]` lists.
///
/// # Returns
/// MIDI file as Uint8Array (Standard MIDI File Format 1)
#[wasm_bindgen(js_name = encodeScoreJson)]
pub fn encode_score_json(json: String, bpm: Option<u32>) -> Result<js_sys::Uint8Array, JsValue> {
    wasm_info!("encodeScoreJson called with {} bytes, bpm={:?}", json.len(), bpm);

    let score = NoteScore::from_json(&json).map_err(|e| js_error("Invalid note score JSON", e))?;
    let result = encode_for_js(&score, bpm)?;

    wasm_info!("encodeScoreJson completed successfully");
    Ok(result)
}
