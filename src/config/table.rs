//! Table configuration - root configuration structure.

use serde::Deserialize;

use crate::axis::Axis;
use crate::motion::MAX_WAYPOINTS;

use super::limits::TravelLimits;
use super::units::{Inches, InchesPerStep, Milliseconds};

/// Per-axis configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Maximum travel from the homed zero.
    #[serde(rename = "max_travel_in")]
    pub max_travel: Inches,

    /// Drive the direction line high for positive moves instead of low.
    #[serde(default)]
    pub invert_direction: bool,

    /// Limit sensor reads high when reached.
    #[serde(default = "default_limit_active_high")]
    pub limit_active_high: bool,
}

fn default_limit_active_high() -> bool {
    true
}

impl AxisConfig {
    /// Create an axis configuration with default polarities.
    pub fn new(max_travel: Inches) -> Self {
        Self {
            max_travel,
            invert_direction: false,
            limit_active_high: true,
        }
    }

    /// Builder-style direction inversion.
    pub fn inverted(mut self) -> Self {
        self.invert_direction = true;
        self
    }
}

/// The three axes.
#[derive(Debug, Clone, Deserialize)]
pub struct AxesConfig {
    /// X axis.
    pub x: AxisConfig,
    /// Y axis.
    pub y: AxisConfig,
    /// Z axis.
    pub z: AxisConfig,
}

impl AxesConfig {
    /// Get an axis configuration.
    pub fn get(&self, axis: Axis) -> &AxisConfig {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    /// Distance travelled per step, shared by all axes.
    #[serde(rename = "step_ratio_in_per_step")]
    pub step_ratio: InchesPerStep,

    /// Step half-period shared by all axes.
    #[serde(default = "default_half_period", rename = "step_half_period_ms")]
    pub step_half_period: Milliseconds,

    /// Clamp targets into the travel bounds from startup.
    #[serde(default)]
    pub limits_enabled: bool,

    /// Maximum number of buffered waypoints.
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,

    /// Give up homing after this many pulses. Unbounded when absent.
    #[serde(default)]
    pub homing_max_steps: Option<u32>,

    /// Per-axis settings.
    pub axes: AxesConfig,
}

fn default_half_period() -> Milliseconds {
    Milliseconds(5)
}

fn default_buffer_capacity() -> usize {
    MAX_WAYPOINTS
}

impl TableConfig {
    /// The reference table: 0.0007925725 in/step, 11.5 x 6.75 x 1.75 in of
    /// travel, Y and Z mounted reversed, 3 ms half-period.
    pub fn reference() -> Self {
        Self {
            step_ratio: InchesPerStep(0.000_792_572_5),
            step_half_period: Milliseconds(3),
            limits_enabled: false,
            buffer_capacity: MAX_WAYPOINTS,
            homing_max_steps: None,
            axes: AxesConfig {
                x: AxisConfig::new(Inches(11.5)),
                y: AxisConfig::new(Inches(6.75)).inverted(),
                z: AxisConfig::new(Inches(1.75)).inverted(),
            },
        }
    }

    /// Get an axis configuration.
    pub fn axis(&self, axis: Axis) -> &AxisConfig {
        self.axes.get(axis)
    }

    /// Travel bounds for an axis in steps.
    pub fn travel_limits(&self, axis: Axis) -> TravelLimits {
        TravelLimits::from_travel(self.axis(axis).max_travel, self.step_ratio)
    }
}
