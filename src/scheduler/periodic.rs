//! Periodic activity placement.
//!
//! Each (slot, activity) pair gets one uniform draw from a generator seeded
//! with an FNV-1a hash of the activity name and the slot's wall-clock time.
//! The draw is a pure function of those two values, so placing periodics
//! again over the same grid, or over a tail appended later, reproduces the
//! same tags without storing earlier decisions.

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::models::{Event, Periodic, Slot};
use crate::time::slot_start;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Deterministic draw in `[0, 1)` for an activity at an instant.
pub fn placement_draw(name: &str, at: DateTime<Utc>) -> f64 {
    let mut hash = FNV_OFFSET_BASIS;
    hash = fnv1a(hash, name.as_bytes());
    hash = fnv1a(hash, at.to_rfc3339().as_bytes());
    ChaCha8Rng::seed_from_u64(hash).random::<f64>()
}

fn fnv1a(mut state: u64, bytes: &[u8]) -> u64 {
    for byte in bytes {
        state ^= u64::from(*byte);
        state = state.wrapping_mul(FNV_PRIME);
    }
    state
}

/// Tags each slot with the periodics whose draw falls below their
/// per-slot probability.
///
/// `first_index` is the grid index of `slots[0]`, so a tail can be placed
/// on its own. Returns the number of tags added.
pub fn place_periodics(
    slots: &mut [Slot],
    first_index: usize,
    anchor: DateTime<Utc>,
    periodics: &[Periodic],
) -> usize {
    let mut placed = 0;
    for (offset, slot) in slots.iter_mut().enumerate() {
        let at = slot_start(anchor, first_index + offset);
        for (p, periodic) in periodics.iter().enumerate() {
            if placement_draw(&periodic.name, at) < periodic.per_slot_probability() {
                slot.periodics.push(p);
                placed += 1;
            }
        }
    }
    placed
}

/// Hands repopulation blocks back to periodic activities.
///
/// Inside slots occupied by a repopulation event, a periodic not already
/// tagged is added when its draw falls below `threshold`. The draw is the
/// same one used by [`place_periodics`], so the effective chance there is
/// `max(probability / 48, threshold)`. Returns the number of tags added.
pub fn repopulate(
    slots: &mut [Slot],
    anchor: DateTime<Utc>,
    events: &[Event],
    periodics: &[Periodic],
    threshold: f64,
) -> usize {
    let mut placed = 0;
    for (index, slot) in slots.iter_mut().enumerate() {
        let in_block = slot
            .event
            .and_then(|e| events.get(e))
            .is_some_and(|e| e.repopulate);
        if !in_block {
            continue;
        }
        let at = slot_start(anchor, index);
        for (p, periodic) in periodics.iter().enumerate() {
            if !slot.has_periodic(p) && placement_draw(&periodic.name, at) < threshold {
                slot.periodics.push(p);
                placed += 1;
            }
        }
    }
    placed
}
