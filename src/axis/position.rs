//! Position tracking for one axis.
//!
//! Holds the step count actually issued since the last zero alongside the
//! most recently commanded target.

use crate::config::units::{Inches, InchesPerStep, Steps};

/// Axis position pair.
///
/// `current` changes only when a step pulse is issued, one unit at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisPosition {
    current: Steps,
    target: Steps,
}

impl AxisPosition {
    /// Create a position at zero.
    #[inline]
    pub const fn new() -> Self {
        Self {
            current: Steps::ZERO,
            target: Steps::ZERO,
        }
    }

    /// Get current position in steps.
    #[inline]
    pub fn current(&self) -> Steps {
        self.current
    }

    /// Get the last commanded target in steps.
    #[inline]
    pub fn target(&self) -> Steps {
        self.target
    }

    /// Get current position in inches.
    #[inline]
    pub fn current_inches(&self, ratio: InchesPerStep) -> Inches {
        self.current.to_inches(ratio)
    }

    /// Record a new target.
    #[inline]
    pub fn set_target(&mut self, target: Steps) {
        self.target = target;
    }

    /// Signed steps from current to target.
    #[inline]
    pub fn delta(&self) -> i64 {
        self.target.0.saturating_sub(self.current.0)
    }

    /// Account for one issued pulse.
    #[inline]
    pub(crate) fn record_step(&mut self, sign: i64) {
        self.current = Steps(self.current.0 + sign);
    }

    /// Reset both current and target to zero.
    #[inline]
    pub fn zero(&mut self) {
        self.current = Steps::ZERO;
        self.target = Steps::ZERO;
    }
}
