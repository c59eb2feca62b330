//! Grid sizing and extension.
//!
//! The grid must reach the latest deadline's due slot and the latest
//! event's end slot. Anything beyond that is display padding, appended
//! after allocation and given periodic tags like the rest of the grid.

use chrono::{DateTime, Utc};

use super::periodic::place_periodics;
use crate::models::{Deadline, Event, Slot, Timetable};
use crate::time::slots_between;

/// Slots needed to cover every deadline and event.
///
/// Expects both lists sorted chronologically. Returns at least
/// `min_slots`; empty lists contribute zero.
pub fn grid_len(
    anchor: DateTime<Utc>,
    deadlines: &[Deadline],
    events: &[Event],
    min_slots: usize,
) -> usize {
    let deadlines_end = deadlines
        .last()
        .map_or(0, |d| slots_between(anchor, d.due).max(0) as usize);
    let events_end = events
        .last()
        .map_or(0, |e| slots_between(anchor, e.end_time).max(0) as usize);
    deadlines_end.max(events_end).max(min_slots)
}

/// Appends free slots until the grid holds `len` slots.
///
/// Only the new tail gets periodic tags, so earlier placement decisions
/// never change. Returns the number of slots appended.
pub fn extend_grid(timetable: &mut Timetable, len: usize) -> usize {
    let old_len = timetable.len();
    if len <= old_len {
        return 0;
    }
    timetable.slots.resize(len, Slot::new());
    place_periodics(
        &mut timetable.slots[old_len..],
        old_len,
        timetable.anchor,
        &timetable.periodics,
    );
    len - old_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Periodic;
    use chrono::{TimeDelta, TimeZone};

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn slot(n: i64) -> DateTime<Utc> {
        anchor() + TimeDelta::minutes(30 * n)
    }

    #[test]
    fn test_grid_len_empty() {
        assert_eq!(grid_len(anchor(), &[], &[], 0), 0);
        assert_eq!(grid_len(anchor(), &[], &[], 48), 48);
    }

    #[test]
    fn test_grid_len_from_latest() {
        let deadlines = vec![
            Deadline::new("a", 25.0, slot(3)),
            Deadline::new("b", 25.0, slot(10)),
        ];
        let events = vec![Event::new("e", slot(2), slot(12))];

        assert_eq!(grid_len(anchor(), &deadlines, &[], 0), 10);
        assert_eq!(grid_len(anchor(), &deadlines, &events, 0), 12);
        assert_eq!(grid_len(anchor(), &deadlines, &events, 20), 20);
    }

    #[test]
    fn test_extend_grid() {
        let mut tt = Timetable::new(anchor(), 4, vec![], vec![], vec![Periodic::new("always", 48.0)]);
        assert_eq!(extend_grid(&mut tt, 2), 0);
        assert_eq!(tt.len(), 4);

        assert_eq!(extend_grid(&mut tt, 6), 2);
        assert_eq!(tt.len(), 6);
        // probability 48/day = 1 per slot; only the tail is placed
        assert!(tt.slots[..4].iter().all(|s| s.periodics.is_empty()));
        assert!(tt.slots[4..].iter().all(|s| s.periodics == vec![0]));
    }
}
