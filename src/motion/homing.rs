//! Homing support: outcome reporting and cancellation.

use core::sync::atomic::{AtomicBool, Ordering};

/// How a homing run ended.
///
/// Both outcomes leave the axis zeroed at the point where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingOutcome {
    /// The limit sensor asserted.
    LimitReached {
        /// Pulses issued before the sensor asserted.
        steps: u32,
    },
    /// The operator cancelled; the current spot is taken as home.
    Cancelled {
        /// Pulses issued before cancellation was observed.
        steps: u32,
    },
}

impl HomingOutcome {
    /// Pulses issued during the run.
    pub fn steps(&self) -> u32 {
        match *self {
            HomingOutcome::LimitReached { steps } | HomingOutcome::Cancelled { steps } => steps,
        }
    }
}

/// Cancellation flag for an in-progress homing run.
///
/// Can live in a `static` and be set from an interrupt handler or another
/// thread while the homing loop polls it between pulses.
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: AtomicBool,
}

impl CancelToken {
    /// Create an armed (not cancelled) token.
    pub const fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
        }
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Re-arm the token for another run.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Release);
    }
}
