//! General MIDI percussion names
//!
//! Names are matched case-insensitively. Unknown names fall back to the
//! kick drum rather than failing.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Bass Drum 1
pub const KICK: u8 = 36;

static PERCUSSION_MAP: Lazy<HashMap<&'static str, u8>> = Lazy::new(|| {
    HashMap::from([
        ("kick", KICK), // Bass Drum 1
        ("snare", 38),  // Acoustic Snare
        ("hihat", 42),  // Closed Hi-Hat
        ("crash", 49),  // Crash Cymbal 1
        ("ride", 51),   // Ride Cymbal 1
        ("tom1", 41),   // Low Floor Tom
        ("tom2", 43),   // High Floor Tom
        ("tom3", 45),   // Low Tom
        ("tom4", 47),   // Low-Mid Tom
        ("tom5", 48),   // Hi-Mid Tom
        ("tom6", 50),   // High Tom
    ])
});

/// Look up a percussion instrument, `None` if the name is not in the table
pub fn lookup_percussion(name: &str) -> Option<u8> {
    PERCUSSION_MAP.get(name.to_lowercase().as_str()).copied()
}

/// Map a percussion name to its GM note, defaulting to the kick drum
pub fn percussion_note(name: &str) -> u8 {
    match lookup_percussion(name) {
        Some(note) => note,
        None => {
            log::warn!("Unknown percussion instrument '{}', using kick", name);
            KICK
        }
    }
}
