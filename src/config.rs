//! Generator configuration.
//!
//! The anchor time ("now") is an explicit value here rather than process
//! state, so every grid computation is reproducible in tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::PeriodicPolicy;
use crate::time::round_up;

/// Default number of slots to display (one day).
pub const DEFAULT_DISPLAY_SLOTS: usize = 48;

/// Default repopulation threshold.
pub const DEFAULT_REPOPULATE_THRESHOLD: f64 = 0.04;

/// Default bound on the allocator's weighting exponent.
pub const DEFAULT_MAX_POWER: u32 = 100;

/// Settings for [`TimetableGenerator`](crate::scheduler::TimetableGenerator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Start of slot 0. Always on a slot boundary.
    pub anchor: DateTime<Utc>,
    /// Minimum number of slots in the finished timetable.
    pub display_slots: usize,
    /// Per-slot chance for periodics inside repopulation blocks.
    pub repopulate_threshold: f64,
    /// Largest weighting exponent tried before giving up.
    pub max_power: u32,
    /// Whether periodic tags withhold slots from deadline work.
    pub periodic_policy: PeriodicPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

impl GeneratorConfig {
    /// Creates a configuration anchored at `now`, rounded up to a slot boundary.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            anchor: round_up(now),
            display_slots: DEFAULT_DISPLAY_SLOTS,
            repopulate_threshold: DEFAULT_REPOPULATE_THRESHOLD,
            max_power: DEFAULT_MAX_POWER,
            periodic_policy: PeriodicPolicy::default(),
        }
    }

    /// Sets the number of slots to display.
    pub fn with_display_slots(mut self, slots: usize) -> Self {
        self.display_slots = slots;
        self
    }

    /// Sets the repopulation threshold.
    pub fn with_repopulate_threshold(mut self, threshold: f64) -> Self {
        self.repopulate_threshold = threshold;
        self
    }

    /// Sets the allocator retry bound.
    pub fn with_max_power(mut self, max_power: u32) -> Self {
        self.max_power = max_power;
        self
    }

    /// Sets how periodic tags interact with deadline work.
    pub fn with_periodic_policy(mut self, policy: PeriodicPolicy) -> Self {
        self.periodic_policy = policy;
        self
    }
}
