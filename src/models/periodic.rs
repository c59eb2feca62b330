//! Periodic activity model.

use serde::{Deserialize, Serialize};

use crate::time::SLOTS_PER_DAY;

/// A recurring low-priority activity.
///
/// `probability` is the expected number of occurrences per calendar day,
/// so each half-hour slot carries the activity with chance `probability / 48`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Periodic {
    /// Display name. Also part of the placement hash.
    pub name: String,
    /// Expected occurrences per day.
    pub probability: f64,
}

impl Periodic {
    /// Creates a periodic activity.
    pub fn new(name: impl Into<String>, probability: f64) -> Self {
        Self {
            name: name.into(),
            probability,
        }
    }

    /// Chance that a single slot carries this activity.
    #[inline]
    pub fn per_slot_probability(&self) -> f64 {
        self.probability / SLOTS_PER_DAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_slot_probability() {
        let p = Periodic::new("stretch", 4.8);
        assert!((p.per_slot_probability() - 0.1).abs() < 1e-12);
    }
}
