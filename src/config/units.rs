//! Unit types for physical quantities.
//!
//! Provides type-safe representations of linear distances, the table's
//! distance-per-step ratio, step counts and step timing to prevent unit
//! confusion at compile time.

use core::ops::{Add, Neg, Sub};

use serde::Deserialize;

/// Linear distance in inches.
///
/// Used for configuration and user-facing API. Internally converted to [`Steps`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f32);

impl Inches {
    /// Create a new Inches value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Add for Inches {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Inches {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Distance travelled by one step pulse, in inches per step.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct InchesPerStep(pub f32);

impl InchesPerStep {
    /// Create a new ratio.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Check that the ratio can be divided by.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

/// Axis position in steps (absolute from the last zero).
///
/// Uses i64 for unlimited range in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Steps(pub i64);

impl Steps {
    /// Zero steps.
    pub const ZERO: Self = Self(0);

    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Get absolute value as u64.
    #[inline]
    pub fn abs(self) -> u64 {
        self.0.unsigned_abs()
    }

    /// Convert a distance to steps, truncating toward zero.
    ///
    /// `1.75 in` at `0.0007925725 in/step` is 2207.9998 steps and becomes
    /// 2207, never 2208.
    #[inline]
    pub fn from_inches(distance: Inches, ratio: InchesPerStep) -> Self {
        Self(libm::truncf(distance.0 / ratio.0) as i64)
    }

    /// Convert to inches using the distance-per-step ratio.
    #[inline]
    pub fn to_inches(self, ratio: InchesPerStep) -> Inches {
        Inches(self.0 as f32 * ratio.0)
    }
}

impl Add for Steps {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Steps {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Steps {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Duration in milliseconds.
///
/// The step half-period: the STEP line is held high for one half-period and
/// low for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct Milliseconds(pub u32);

impl Milliseconds {
    /// Create a new Milliseconds value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Inches.
    fn inches(self) -> Inches;
    /// Convert to InchesPerStep.
    fn inches_per_step(self) -> InchesPerStep;
}

impl UnitExt for f32 {
    #[inline]
    fn inches(self) -> Inches {
        Inches(self)
    }

    #[inline]
    fn inches_per_step(self) -> InchesPerStep {
        InchesPerStep(self)
    }
}
