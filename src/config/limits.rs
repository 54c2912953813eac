//! Travel limits and the clamping policy.

use super::units::{Inches, InchesPerStep, Steps};

/// Whether commanded targets are clamped into the travel bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionLimitsPolicy {
    /// Clamp targets when set.
    pub enabled: bool,
}

impl MotionLimitsPolicy {
    /// Create a policy.
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

/// Travel bounds for one axis, in steps.
///
/// The lower bound is always the homed zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelLimits {
    /// Maximum position in steps.
    pub max_steps: i64,
}

impl TravelLimits {
    /// Derive bounds from the maximum travel, using the same truncation as
    /// target conversion.
    pub fn from_travel(max_travel: Inches, ratio: InchesPerStep) -> Self {
        Self {
            max_steps: Steps::from_inches(max_travel, ratio).value(),
        }
    }

    /// Check if a position is within limits.
    pub fn contains(&self, steps: Steps) -> bool {
        steps.0 >= 0 && steps.0 <= self.max_steps
    }

    /// Clamp a target into `[0, max_steps]`.
    pub fn clamp(&self, target: Steps) -> Steps {
        if target.0 > self.max_steps {
            Steps(self.max_steps)
        } else if target.0 < 0 {
            Steps::ZERO
        } else {
            target
        }
    }
}
