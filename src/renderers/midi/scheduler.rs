//! Per-channel event ordering and delta times
//!
//! Events are stable-sorted by tick. At equal ticks every NoteOff comes
//! before every NoteOn; remaining ties keep materialization order.

use super::converter::MicroEvent;

/// A note event with its time expressed relative to the previous event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    /// Ticks since the previous event on the track (first event: since 0)
    pub delta: u32,
    pub event: MicroEvent,
}

/// Sort a channel's events and convert them to delta times
pub fn schedule(mut events: Vec<MicroEvent>) -> Vec<ScheduledEvent> {
    events.sort_by_key(|e| (e.tick, e.kind));

    let mut prev_tick = 0u32;
    events
        .into_iter()
        .map(|event| {
            let delta = event.tick - prev_tick;
            prev_tick = event.tick;
            ScheduledEvent { delta, event }
        })
        .collect()
}
