//! Fixed event placement.
//!
//! Events are trusted to be validated: sorted, non-overlapping, and not
//! fully elapsed. Each one marks every slot its interval touches, clamped
//! to the grid.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::models::{Event, Slot};
use crate::time::slots_between;

/// Grid slots covered by an event, clamped to `[0, grid_len)`.
///
/// Returns `None` when the event starts at or beyond the grid's end, or
/// covers no slot at all.
pub fn event_slots(
    anchor: DateTime<Utc>,
    event: &Event,
    grid_len: usize,
) -> Option<std::ops::Range<usize>> {
    let start = slots_between(anchor, event.start_time);
    if start >= grid_len as i64 {
        return None;
    }
    let start = start.max(0) as usize;
    let end = slots_between(anchor, event.end_time).clamp(0, grid_len as i64) as usize;
    (start < end).then_some(start..end)
}

/// Marks each event's slots with its index. Returns the number of slots marked.
///
/// Events are sorted by start, so filling stops at the first one that starts
/// past the grid.
pub fn fill_events(slots: &mut [Slot], anchor: DateTime<Utc>, events: &[Event]) -> usize {
    let mut marked = 0;
    for (index, event) in events.iter().enumerate() {
        if slots_between(anchor, event.start_time) >= slots.len() as i64 {
            warn!(event = event.label(), "event starts past the end of the grid");
            break;
        }
        let Some(range) = event_slots(anchor, event, slots.len()) else {
            continue;
        };
        for slot in &mut slots[range] {
            slot.event = Some(index);
            marked += 1;
        }
    }
    marked
}
