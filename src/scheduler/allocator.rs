//! Weighted random deadline allocation.
//!
//! # Algorithm
//!
//! Attempt-and-retry with escalating sharpness. Attempt `p = 0, 1, 2, ...`:
//!
//! 1. Copy the deadline counters into a working set (deadlines with work left).
//! 2. Walk the grid in order. At each free slot, weight every pending
//!    deadline by `(slots_remaining / slots_available)^p`, draw one deadline
//!    from the cumulative weights and give it the slot.
//! 3. Decrement the winner's `slots_remaining` and every pending deadline's
//!    `slots_available`; drop the winner once its work is placed.
//! 4. Re-check the capacity invariant over the working set. On failure
//!    discard the attempt and retry with `p + 1`.
//!
//! At `p = 0` the choice is uniform. Larger `p` favors deadlines whose
//! remaining work is closest to their remaining capacity. Once every weight
//! below 1 underflows, the draw falls to the earliest pending deadline, and
//! a weight of exactly 1 (remaining equals available) can only belong to
//! that same deadline, so the limit is earliest-deadline-first, which always
//! completes a feasible set. Attempts stop at `max_power`.
//!
//! # Capacity Accounting
//! `slots_available` is decremented for every pending deadline on every
//! assignment. A slot is only offered while some pending deadline is not
//! yet due past it, and any deadline whose due slot has passed must already
//! be finished or the invariant check fails, so the uniform decrement
//! matches each pending deadline's real window.

use rand::Rng;
use tracing::{debug, info};

use super::feasibility::first_shortfall;
use crate::error::{Result, TimetableError};
use crate::models::{Deadline, PeriodicPolicy, Slot};

/// Summary of a successful allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// Weighting exponent of the attempt that succeeded.
    pub power: u32,
    /// Slots given deadline work.
    pub assigned: usize,
}

/// Working state of one attempt.
struct Attempt {
    /// `(slots_remaining, slots_available)` per deadline.
    counters: Vec<(usize, usize)>,
    /// `(slot index, deadline index)` in grid order.
    assignments: Vec<(usize, usize)>,
}

/// Distributes deadline work over free slots.
#[derive(Debug, Clone)]
pub struct DeadlineAllocator {
    max_power: u32,
    policy: PeriodicPolicy,
}

impl DeadlineAllocator {
    /// Creates an allocator that gives up after exponent `max_power`.
    pub fn new(max_power: u32) -> Self {
        Self {
            max_power,
            policy: PeriodicPolicy::default(),
        }
    }

    /// Sets which slots count as free.
    ///
    /// Must match the policy used to annotate the deadlines.
    pub fn with_policy(mut self, policy: PeriodicPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Assigns every deadline's remaining work to free slots.
    ///
    /// Deadlines must be annotated (see
    /// [`annotate_deadlines`](super::feasibility::annotate_deadlines)) and
    /// feasible. On success each used slot refers to its deadline and every
    /// deadline's `slots_remaining` is zero. On failure neither `slots` nor
    /// `deadlines` is modified.
    ///
    /// # Errors
    /// [`TimetableError::NonConvergence`] when no attempt up to `max_power`
    /// completes.
    pub fn allocate<R: Rng>(
        &self,
        slots: &mut [Slot],
        deadlines: &mut [Deadline],
        rng: &mut R,
    ) -> Result<Allocation> {
        for power in 0..=self.max_power {
            match self.attempt(slots, deadlines, power, rng) {
                Ok(attempt) => {
                    let assigned = attempt.assignments.len();
                    for (deadline, (remaining, available)) in
                        deadlines.iter_mut().zip(attempt.counters)
                    {
                        deadline.slots_remaining = remaining;
                        deadline.slots_available = available;
                    }
                    for (slot, deadline) in attempt.assignments {
                        slots[slot].deadline = Some(deadline);
                    }
                    info!(power, assigned, "deadline work allocated");
                    return Ok(Allocation { power, assigned });
                }
                Err(slot) => debug!(power, slot, "allocation attempt aborted"),
            }
        }
        Err(TimetableError::NonConvergence {
            attempts: self.max_power.saturating_add(1),
        })
    }

    /// Runs one full pass. Returns the slot index where the invariant broke
    /// on failure.
    fn attempt<R: Rng>(
        &self,
        slots: &[Slot],
        deadlines: &[Deadline],
        power: u32,
        rng: &mut R,
    ) -> std::result::Result<Attempt, usize> {
        let mut counters: Vec<(usize, usize)> = deadlines
            .iter()
            .map(|d| (d.slots_remaining, d.slots_available))
            .collect();
        let mut pending: Vec<usize> = (0..counters.len())
            .filter(|&d| counters[d].0 > 0)
            .collect();
        let mut assignments = Vec::new();
        let mut weights = Vec::with_capacity(pending.len());

        for (index, slot) in slots.iter().enumerate() {
            if pending.is_empty() {
                break;
            }
            if slot.deadline.is_some() || !slot.is_free(self.policy) {
                continue;
            }

            weights.clear();
            weights.extend(pending.iter().map(|&d| pressure(counters[d]).powf(f64::from(power))));
            // No mass left: earliest due first
            let chosen = pick_weighted(&weights, rng).unwrap_or(0);
            let deadline = pending[chosen];
            assignments.push((index, deadline));

            for &d in &pending {
                counters[d].1 = counters[d].1.saturating_sub(1);
            }
            counters[deadline].0 -= 1;
            if counters[deadline].0 == 0 {
                pending.remove(chosen);
            }

            if first_shortfall(pending.iter().map(|&d| counters[d])).is_some() {
                return Err(index);
            }
        }

        if pending.is_empty() {
            Ok(Attempt {
                counters,
                assignments,
            })
        } else {
            Err(slots.len())
        }
    }
}

/// Remaining work over remaining capacity.
#[inline]
fn pressure((remaining, available): (usize, usize)) -> f64 {
    remaining as f64 / available.max(1) as f64
}

/// Draws an index with probability proportional to its weight.
///
/// Returns `None` when the weights carry no mass (all zero after underflow,
/// or not finite).
fn pick_weighted<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let mut cumulative = Vec::with_capacity(weights.len());
    let mut total = 0.0;
    for &w in weights {
        total += w;
        cumulative.push(total);
    }
    if !(total > 0.0 && total.is_finite()) {
        return None;
    }
    let draw = rng.random::<f64>() * total;
    cumulative
        .iter()
        .position(|&c| c > draw)
        .or(Some(weights.len() - 1))
}
