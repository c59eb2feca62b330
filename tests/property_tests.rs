//! Property-Based Tests
//!
//! Invariants checked over random calendars:
//! - A generated timetable never shares a slot and meets every due time
//! - The capacity invariant holds before and after allocation
//! - Feasibility annotation is idempotent
//! - Periodic placement is deterministic

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use u_timetable::models::{Deadline, Event, Periodic, PeriodicPolicy, Slot};
use u_timetable::scheduler::{annotate_deadlines, check_feasibility, place_periodics};
use u_timetable::time::work_slots;
use u_timetable::{GeneratorConfig, InputData, TimetableError, TimetableGenerator};

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

fn slot(n: u32) -> DateTime<Utc> {
    anchor() + TimeDelta::minutes(30 * i64::from(n))
}

/// Events as (gap, length) pairs laid end to end, so they never overlap.
fn events_strategy() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec((0u32..4, 1u32..3), 0..4).prop_map(|blocks| {
        let mut cursor = 0;
        blocks
            .into_iter()
            .enumerate()
            .map(|(i, (gap, len))| {
                let start = cursor + gap;
                cursor = start + len;
                Event::new(format!("event {i}"), slot(start), slot(cursor))
            })
            .collect()
    })
}

/// Deadlines with workloads in whole 25-minute units, sorted by due time.
fn deadlines_strategy() -> impl Strategy<Value = Vec<Deadline>> {
    prop::collection::vec((0u32..5, 1u32..24), 1..5).prop_map(|specs| {
        let mut deadlines: Vec<Deadline> = specs
            .into_iter()
            .enumerate()
            .map(|(i, (units, due))| Deadline::new(format!("deadline {i}"), f64::from(units) * 25.0, slot(due)))
            .collect();
        deadlines.sort_by_key(|d| d.due);
        deadlines
    })
}

fn periodics_strategy() -> impl Strategy<Value = Vec<Periodic>> {
    prop::collection::vec(("[a-z]{3,8}", 0.0f64..12.0), 0..3)
        .prop_map(|ps| ps.into_iter().map(|(name, p)| Periodic::new(name, p)).collect())
}

fn policy_strategy() -> impl Strategy<Value = PeriodicPolicy> {
    prop_oneof![Just(PeriodicPolicy::Advisory), Just(PeriodicPolicy::Reserve)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: generation either reports infeasibility or places all work
    /// before each due time, shares no slot, and leaves the capacity
    /// invariant intact. The exponent bound is high enough for every weight
    /// below 1 to underflow on these grids, so a feasible set must converge.
    #[test]
    fn proptest_generated_timetable_is_valid(
        events in events_strategy(),
        deadlines in deadlines_strategy(),
        periodics in periodics_strategy(),
        policy in policy_strategy(),
        seed in any::<u64>(),
    ) {
        let expected: Vec<usize> = deadlines.iter().map(|d| work_slots(d.minutes_remaining)).collect();
        let input = InputData { events, deadlines, periodics };
        let config = GeneratorConfig::at(anchor())
            .with_display_slots(0)
            .with_max_power(20_000)
            .with_periodic_policy(policy);
        let mut rng = SmallRng::seed_from_u64(seed);

        match TimetableGenerator::new(config).generate_with_rng(input, &mut rng) {
            Ok(tt) => {
                prop_assert!(check_feasibility(&tt.deadlines).is_ok());
                for (d, deadline) in tt.deadlines.iter().enumerate() {
                    prop_assert!(deadline.is_done());
                    let used = tt.slots_for_deadline(d);
                    prop_assert_eq!(used.len(), expected[d]);
                    let due_slot = ((deadline.due - anchor()).num_minutes() / 30) as usize;
                    prop_assert!(used.iter().all(|&i| i < due_slot));
                }
                for s in &tt.slots {
                    if s.deadline.is_some() {
                        prop_assert!(s.is_free(policy));
                    }
                }
            }
            Err(TimetableError::Infeasible { shortfall, .. }) => prop_assert!(shortfall > 0),
            Err(TimetableError::NonConvergence { attempts }) => {
                prop_assert!(false, "feasible input did not converge after {} attempts", attempts)
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    /// Property: annotating twice without changes yields identical counters.
    #[test]
    fn proptest_annotation_idempotent(
        deadlines in deadlines_strategy(),
        blocked in prop::collection::vec(any::<bool>(), 24),
    ) {
        let slots: Vec<Slot> = blocked
            .iter()
            .map(|&b| Slot { event: b.then_some(0), ..Default::default() })
            .collect();
        let mut first = deadlines;
        annotate_deadlines(&slots, &mut first, anchor(), PeriodicPolicy::Advisory);
        let mut second = first.clone();
        annotate_deadlines(&slots, &mut second, anchor(), PeriodicPolicy::Advisory);
        prop_assert_eq!(first, second);
    }

    /// Property: periodic placement depends only on slot time and name.
    #[test]
    fn proptest_periodics_deterministic(
        periodics in periodics_strategy(),
        len in 0usize..200,
        offset in 0u32..1000,
    ) {
        let start = slot(offset);
        let mut a = vec![Slot::new(); len];
        let mut b = vec![Slot::new(); len];
        place_periodics(&mut a, 0, start, &periodics);
        place_periodics(&mut b, 0, start, &periodics);
        prop_assert_eq!(a, b);
    }
}
