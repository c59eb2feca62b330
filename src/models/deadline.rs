//! Deadline model.
//!
//! A deadline is flexible work that must be finished before its due time.
//! The workload is given in minutes and converted to 25-minute work units,
//! one unit per half-hour slot.
//!
//! # Derived Counters
//! Two counters are (re)computed by the scheduler and are never read from
//! or written to input files:
//! - `slots_remaining`: work units not yet placed.
//! - `slots_available`: cumulative free slots from the grid start up to
//!   the due slot, counted as a running total along the ordered list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::{round_down, round_workload};

/// Flexible work with a due time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    /// Display name.
    pub name: String,
    /// Work still to do (minutes).
    pub minutes_remaining: f64,
    /// Due time.
    #[serde(rename = "deadline")]
    pub due: DateTime<Utc>,
    /// Work units not yet assigned to slots.
    #[serde(skip)]
    pub slots_remaining: usize,
    /// Cumulative free-slot capacity up to the due slot.
    #[serde(skip)]
    pub slots_available: usize,
}

impl Deadline {
    /// Creates a deadline with zeroed counters.
    pub fn new(name: impl Into<String>, minutes_remaining: f64, due: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            minutes_remaining,
            due,
            slots_remaining: 0,
            slots_available: 0,
        }
    }

    /// Rounds the workload up to whole work units and the due time down
    /// to a slot boundary.
    pub fn normalize(&mut self) {
        self.minutes_remaining = round_workload(self.minutes_remaining);
        self.due = round_down(self.due);
    }

    /// Whether all work has been placed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.slots_remaining == 0
    }
}
