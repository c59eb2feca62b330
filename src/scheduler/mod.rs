//! Timetable generation engine.
//!
//! # Pipeline
//!
//! 1. Size the grid to the latest deadline or event ([`grid_len`]).
//! 2. Tag periodic activities ([`place_periodics`]).
//! 3. Mark fixed events ([`fill_events`]) and repopulation blocks ([`repopulate`]).
//! 4. Annotate deadline counters ([`annotate_deadlines`]) and stop with
//!    [`TimetableError::Infeasible`] if the workload cannot fit.
//! 5. Distribute deadline work ([`DeadlineAllocator`]).
//! 6. Pad the grid to the requested display length ([`extend_grid`]).
//!
//! Everything runs synchronously on one thread. Periodic placement is
//! deterministic in (slot time, activity name); deadline allocation draws
//! from the caller's random source.

mod allocator;
mod events;
mod feasibility;
mod grid;
mod periodic;

pub use allocator::{Allocation, DeadlineAllocator};
pub use events::{event_slots, fill_events};
pub use feasibility::{annotate_deadlines, check_feasibility, first_shortfall, Shortfall};
pub use grid::{extend_grid, grid_len};
pub use periodic::{place_periodics, placement_draw, repopulate};

use rand::Rng;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::error::{Result, TimetableError};
use crate::input::InputData;
use crate::models::Timetable;
use crate::time::round_up;

/// Builds filled timetables from prepared input.
///
/// # Example
///
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use u_timetable::config::GeneratorConfig;
/// use u_timetable::input::InputData;
/// use u_timetable::models::Deadline;
/// use u_timetable::scheduler::TimetableGenerator;
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
/// let input = InputData {
///     deadlines: vec![Deadline::new("essay", 50.0, now + TimeDelta::hours(2))],
///     ..Default::default()
/// };
///
/// let config = GeneratorConfig::at(now).with_display_slots(8);
/// let timetable = TimetableGenerator::new(config).generate(input).unwrap();
/// assert_eq!(timetable.len(), 8);
/// assert_eq!(timetable.slots_for_deadline(0).len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableGenerator {
    config: GeneratorConfig,
}

impl TimetableGenerator {
    /// Creates a generator.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generates a timetable using the thread-local random source.
    pub fn generate(&self, input: InputData) -> Result<Timetable> {
        self.generate_with_rng(input, &mut rand::rng())
    }

    /// Generates a timetable using the given random source.
    ///
    /// `input` must be normalized and validated (see [`InputData::prepare`]).
    ///
    /// # Errors
    /// - [`TimetableError::Infeasible`] when some deadline's work cannot fit.
    /// - [`TimetableError::NonConvergence`] when allocation exhausts its retries.
    pub fn generate_with_rng<R: Rng>(&self, input: InputData, rng: &mut R) -> Result<Timetable> {
        let config = &self.config;
        let anchor = round_up(config.anchor);
        let InputData {
            events,
            mut deadlines,
            periodics,
        } = input;

        let len = grid_len(anchor, &deadlines, &events, 0);
        let mut timetable = Timetable::new(anchor, len, events, Vec::new(), periodics);
        info!(slots = len, "grid sized");

        let tags = place_periodics(&mut timetable.slots, 0, anchor, &timetable.periodics);
        fill_events(&mut timetable.slots, anchor, &timetable.events);
        let repopulated = repopulate(
            &mut timetable.slots,
            anchor,
            &timetable.events,
            &timetable.periodics,
            config.repopulate_threshold,
        );
        info!(tags, repopulated, "periodics placed");

        annotate_deadlines(&timetable.slots, &mut deadlines, anchor, config.periodic_policy);
        if let Err(shortfall) = check_feasibility(&deadlines) {
            let deadline = &deadlines[shortfall.position];
            return Err(TimetableError::Infeasible {
                deadline: deadline.name.clone(),
                due: deadline.due,
                shortfall: shortfall.slots,
            });
        }

        DeadlineAllocator::new(config.max_power)
            .with_policy(config.periodic_policy)
            .allocate(&mut timetable.slots, &mut deadlines, rng)?;
        timetable.deadlines = deadlines;

        extend_grid(&mut timetable, config.display_slots);
        Ok(timetable)
    }
}
