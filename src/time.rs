//! Time-bucket math.
//!
//! The timetable divides wall-clock time into half-hour slots anchored at a
//! rounded "now". All instants are UTC; display code converts to a local zone.
//!
//! # Slot Model
//! Slot `i` covers `[anchor + i * 30min, anchor + (i + 1) * 30min)`.
//! Deadline work is measured in 25-minute units so every worked slot leaves
//! a 5-minute break.

use chrono::{DateTime, TimeDelta, Utc};

/// Length of one slot (minutes).
pub const SLOT_MINUTES: i64 = 30;

/// Work carried by one slot assigned to a deadline (minutes).
pub const WORK_UNIT_MINUTES: f64 = 25.0;

/// Break appended to every deadline slot (minutes).
pub const BREAK_MINUTES: i64 = 5;

/// Slots in a calendar day.
pub const SLOTS_PER_DAY: f64 = 48.0;

const SLOT_SECONDS: i64 = SLOT_MINUTES * 60;

/// Rounds an instant down to the previous slot boundary.
pub fn round_down(t: DateTime<Utc>) -> DateTime<Utc> {
    let excess_secs = t.timestamp().rem_euclid(SLOT_SECONDS);
    let excess_nanos = i64::from(t.timestamp_subsec_nanos());
    t - TimeDelta::seconds(excess_secs) - TimeDelta::nanoseconds(excess_nanos)
}

/// Rounds an instant up to the next slot boundary.
///
/// Instants already on a boundary are returned unchanged.
pub fn round_up(t: DateTime<Utc>) -> DateTime<Utc> {
    let rounded = round_down(t);
    if rounded == t {
        rounded
    } else {
        rounded + TimeDelta::minutes(SLOT_MINUTES)
    }
}

/// Whole slots between two instants, truncated toward zero.
///
/// Negative when `to` is before `from`.
#[inline]
pub fn slots_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_minutes() / SLOT_MINUTES
}

/// Start of slot `index` on a grid anchored at `anchor`.
#[inline]
pub fn slot_start(anchor: DateTime<Utc>, index: usize) -> DateTime<Utc> {
    anchor + TimeDelta::minutes(SLOT_MINUTES * index as i64)
}

/// Converts a workload in minutes to the number of slots it needs.
pub fn work_slots(minutes: f64) -> usize {
    if minutes.is_finite() && minutes > 0.0 {
        (minutes / WORK_UNIT_MINUTES).ceil() as usize
    } else {
        0
    }
}

/// Rounds a workload up to a whole number of work units (minutes).
pub fn round_workload(minutes: f64) -> f64 {
    (minutes / WORK_UNIT_MINUTES).ceil() * WORK_UNIT_MINUTES
}
