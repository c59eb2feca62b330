//! Deadline feasibility.
//!
//! # Capacity Invariant
//! For every prefix of the due-time-ordered deadline list, the work still
//! required by the prefix must fit in the free slots before the prefix's
//! last due time:
//!
//! ```text
//! sum(slots_remaining[0..=i]) <= slots_available[i]   for all i
//! ```
//!
//! `slots_available` is a running total, so checking it against the
//! running sum of `slots_remaining` in one pass covers every prefix.

use chrono::{DateTime, Utc};

use crate::models::{Deadline, PeriodicPolicy, Slot};
use crate::time::{slots_between, work_slots};

/// First point where the capacity invariant breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    /// Position of the violating deadline in the ordered list.
    pub position: usize,
    /// Slots missing: cumulative required minus cumulative available.
    pub slots: usize,
}

/// Sets `slots_remaining` and `slots_available` on every deadline.
///
/// Deadlines must be sorted by due time. Due slots beyond the grid are
/// clamped to its end. Recomputes from the workload and the grid, so
/// repeated calls give identical counters.
pub fn annotate_deadlines(
    slots: &[Slot],
    deadlines: &mut [Deadline],
    anchor: DateTime<Utc>,
    policy: PeriodicPolicy,
) {
    let mut window_start = 0;
    let mut running_total = 0;
    for deadline in deadlines.iter_mut() {
        deadline.slots_remaining = work_slots(deadline.minutes_remaining);
        let window_end =
            slots_between(anchor, deadline.due).clamp(window_start as i64, slots.len() as i64) as usize;
        running_total += slots[window_start..window_end]
            .iter()
            .filter(|s| s.is_free(policy))
            .count();
        deadline.slots_available = running_total;
        window_start = window_end;
    }
}

/// Scans `(slots_remaining, slots_available)` pairs in due order and
/// returns the first violation of the capacity invariant.
pub fn first_shortfall<I>(counters: I) -> Option<Shortfall>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut required = 0;
    for (position, (remaining, available)) in counters.into_iter().enumerate() {
        required += remaining;
        if required > available {
            return Some(Shortfall {
                position,
                slots: required - available,
            });
        }
    }
    None
}

/// Checks annotated deadlines against the capacity invariant.
pub fn check_feasibility(deadlines: &[Deadline]) -> Result<(), Shortfall> {
    match first_shortfall(deadlines.iter().map(|d| (d.slots_remaining, d.slots_available))) {
        Some(shortfall) => Err(shortfall),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn slot(n: i64) -> DateTime<Utc> {
        anchor() + TimeDelta::minutes(30 * n)
    }

    #[test]
    fn test_annotate_running_total() {
        let mut slots = vec![Slot::new(); 8];
        slots[1].event = Some(0);
        slots[5].event = Some(0);
        let mut deadlines = vec![
            Deadline::new("a", 50.0, slot(3)),  // window 0..3, 2 free
            Deadline::new("b", 75.0, slot(8)),  // window 3..8, 4 free
        ];

        annotate_deadlines(&slots, &mut deadlines, anchor(), PeriodicPolicy::Advisory);
        assert_eq!(deadlines[0].slots_remaining, 2);
        assert_eq!(deadlines[0].slots_available, 2);
        assert_eq!(deadlines[1].slots_remaining, 3);
        assert_eq!(deadlines[1].slots_available, 6);
        assert!(check_feasibility(&deadlines).is_ok());
    }

    #[test]
    fn test_annotate_same_due_slot() {
        let slots = vec![Slot::new(); 4];
        let mut deadlines = vec![
            Deadline::new("a", 25.0, slot(4)),
            Deadline::new("b", 25.0, slot(4)),
        ];
        annotate_deadlines(&slots, &mut deadlines, anchor(), PeriodicPolicy::Advisory);
        assert_eq!(deadlines[0].slots_available, 4);
        assert_eq!(deadlines[1].slots_available, 4);
    }

    #[test]
    fn test_annotate_periodic_policy() {
        let mut slots = vec![Slot::new(); 4];
        slots[2].periodics.push(0);
        let mut deadlines = vec![Deadline::new("a", 25.0, slot(4))];

        annotate_deadlines(&slots, &mut deadlines, anchor(), PeriodicPolicy::Advisory);
        assert_eq!(deadlines[0].slots_available, 4);
        annotate_deadlines(&slots, &mut deadlines, anchor(), PeriodicPolicy::Reserve);
        assert_eq!(deadlines[0].slots_available, 3);
    }

    #[test]
    fn test_annotate_idempotent() {
        let mut slots = vec![Slot::new(); 10];
        slots[4].event = Some(0);
        let mut deadlines = vec![
            Deadline::new("a", 75.0, slot(5)),
            Deadline::new("b", 100.0, slot(10)),
        ];
        annotate_deadlines(&slots, &mut deadlines, anchor(), PeriodicPolicy::Advisory);
        let first = deadlines.clone();
        annotate_deadlines(&slots, &mut deadlines, anchor(), PeriodicPolicy::Advisory);
        assert_eq!(first, deadlines);
    }

    #[test]
    fn test_shortfall_reports_first_violation() {
        // cumulative required: 2, 5, 9 vs available 3, 4, 6
        let shortfall = first_shortfall([(2, 3), (3, 4), (4, 6)]).unwrap();
        assert_eq!(shortfall, Shortfall { position: 1, slots: 1 });
    }

    #[test]
    fn test_shortfall_none() {
        assert!(first_shortfall([(1, 1), (2, 3)]).is_none());
        assert!(first_shortfall(Vec::<(usize, usize)>::new()).is_none());
    }

    #[test]
    fn test_too_little_time() {
        // 2-slot grid, 3 slots of work due at slot 2
        let slots = vec![Slot::new(); 2];
        let mut deadlines = vec![Deadline::new("a", 75.0, slot(2))];
        annotate_deadlines(&slots, &mut deadlines, anchor(), PeriodicPolicy::Advisory);
        assert_eq!(
            check_feasibility(&deadlines),
            Err(Shortfall { position: 0, slots: 1 })
        );
    }
}
