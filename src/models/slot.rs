//! Slot model.
//!
//! A slot is one half-hour cell of the grid. Occupants are stored as indices
//! into the owning [`Timetable`](super::Timetable)'s record lists.

use serde::{Deserialize, Serialize};

/// How periodic tags interact with deadline work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodicPolicy {
    /// Tags are annotations only; tagged slots stay free for deadlines.
    #[default]
    Advisory,
    /// Tagged slots are withheld from deadline work.
    Reserve,
}

/// One half-hour cell of the timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Index of the event occupying this slot.
    pub event: Option<usize>,
    /// Index of the deadline whose work is done in this slot.
    pub deadline: Option<usize>,
    /// Indices of periodic activities tagged on this slot.
    pub periodics: Vec<usize>,
}

impl Slot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether deadline work may be placed here.
    ///
    /// Ignores any deadline already assigned; callers check that separately.
    pub fn is_free(&self, policy: PeriodicPolicy) -> bool {
        if self.event.is_some() {
            return false;
        }
        match policy {
            PeriodicPolicy::Advisory => true,
            PeriodicPolicy::Reserve => self.periodics.is_empty(),
        }
    }

    /// Whether a periodic is already tagged on this slot.
    #[inline]
    pub fn has_periodic(&self, periodic: usize) -> bool {
        self.periodics.contains(&periodic)
    }
}
