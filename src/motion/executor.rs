//! Lockstep execution - which axes pulse on each tick.

use crate::axis::Direction;

/// Remaining work for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPlan {
    /// Pulses still to issue.
    pub remaining: u64,
    /// Direction of every pulse.
    pub direction: Direction,
}

impl AxisPlan {
    /// Plan a signed delta as a pulse count and a direction.
    #[inline]
    pub fn from_delta(delta: i64) -> Self {
        Self {
            remaining: delta.unsigned_abs(),
            direction: Direction::from_delta(delta),
        }
    }

    /// Whether this axis takes part in the move at all.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }
}

/// Runtime state during a coordinated move.
///
/// Every tick pulses each axis that still has steps left, so all axes start
/// together and each stops once its own count is exhausted.
#[derive(Debug, Clone)]
pub struct LockstepExecutor {
    plans: [AxisPlan; 3],
    ticks: u64,
}

impl LockstepExecutor {
    /// Create an executor for three signed step deltas (X, Y, Z).
    pub fn new(deltas: [i64; 3]) -> Self {
        Self {
            plans: deltas.map(AxisPlan::from_delta),
            ticks: 0,
        }
    }

    /// Get the per-axis plans.
    #[inline]
    pub fn plans(&self) -> &[AxisPlan; 3] {
        &self.plans
    }

    /// Check if every axis has finished.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.plans.iter().all(|p| p.remaining == 0)
    }

    /// Number of ticks issued so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Total ticks the move will take (the largest delta).
    #[inline]
    pub fn total_ticks(&self) -> u64 {
        self.ticks
            + self
                .plans
                .iter()
                .map(|p| p.remaining)
                .max()
                .unwrap_or(0)
    }

    /// Advance one tick.
    ///
    /// Returns which axes pulse on this tick and decrements their counts.
    pub fn advance(&mut self) -> [bool; 3] {
        let mut pulses = [false; 3];
        for (plan, pulse) in self.plans.iter_mut().zip(pulses.iter_mut()) {
            if plan.remaining > 0 {
                plan.remaining -= 1;
                *pulse = true;
            }
        }
        if pulses.iter().any(|&p| p) {
            self.ticks += 1;
        }
        pulses
    }
}
