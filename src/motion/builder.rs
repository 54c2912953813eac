//! Builder pattern for MotionController.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::axis::{Axis, AxisDriver, AxisPins};
use crate::config::units::{Inches, InchesPerStep, Milliseconds};
use crate::config::{
    validate_buffer_capacity, validate_max_travel, validate_step_ratio, MotionLimitsPolicy,
    TableConfig, TravelLimits,
};
use crate::error::{ConfigError, Error, Result};

use super::buffer::{WaypointBuffer, MAX_WAYPOINTS};
use super::controller::MotionController;

/// Builder for creating MotionController instances.
pub struct MotionControllerBuilder<STEP, DIR, EN, LIMIT, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    DELAY: DelayNs,
{
    pins: [Option<AxisPins<STEP, DIR, EN, LIMIT>>; 3],
    delay: Option<DELAY>,
    step_ratio: Option<InchesPerStep>,
    max_travel: [Option<Inches>; 3],
    invert_direction: [bool; 3],
    limit_active_high: [bool; 3],
    half_period: Milliseconds,
    limits_enabled: bool,
    buffer_capacity: usize,
    homing_max_steps: Option<u32>,
}

impl<STEP, DIR, EN, LIMIT, DELAY> Default for MotionControllerBuilder<STEP, DIR, EN, LIMIT, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, EN, LIMIT, DELAY> MotionControllerBuilder<STEP, DIR, EN, LIMIT, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    DELAY: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            pins: [None, None, None],
            delay: None,
            step_ratio: None,
            max_travel: [None; 3],
            invert_direction: [false; 3],
            limit_active_high: [true; 3],
            half_period: Milliseconds(5),
            limits_enabled: false,
            buffer_capacity: MAX_WAYPOINTS,
            homing_max_steps: None,
        }
    }

    /// Set the pins of one axis.
    pub fn axis_pins(mut self, axis: Axis, pins: AxisPins<STEP, DIR, EN, LIMIT>) -> Self {
        self.pins[axis.index()] = Some(pins);
        self
    }

    /// Set the X axis pins.
    pub fn x_axis(self, pins: AxisPins<STEP, DIR, EN, LIMIT>) -> Self {
        self.axis_pins(Axis::X, pins)
    }

    /// Set the Y axis pins.
    pub fn y_axis(self, pins: AxisPins<STEP, DIR, EN, LIMIT>) -> Self {
        self.axis_pins(Axis::Y, pins)
    }

    /// Set the Z axis pins.
    pub fn z_axis(self, pins: AxisPins<STEP, DIR, EN, LIMIT>) -> Self {
        self.axis_pins(Axis::Z, pins)
    }

    /// Set the delay provider used as the step clock.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the distance travelled per step.
    pub fn step_ratio(mut self, ratio: InchesPerStep) -> Self {
        self.step_ratio = Some(ratio);
        self
    }

    /// Set an axis' maximum travel from zero.
    pub fn max_travel(mut self, axis: Axis, travel: Inches) -> Self {
        self.max_travel[axis.index()] = Some(travel);
        self
    }

    /// Drive an axis' DIR line high for positive moves.
    pub fn invert_direction(mut self, axis: Axis, invert: bool) -> Self {
        self.invert_direction[axis.index()] = invert;
        self
    }

    /// Set the limit sensor level that means "reached" for an axis.
    pub fn limit_active_high(mut self, axis: Axis, active_high: bool) -> Self {
        self.limit_active_high[axis.index()] = active_high;
        self
    }

    /// Set the step half-period.
    pub fn step_half_period(mut self, half_period: Milliseconds) -> Self {
        self.half_period = half_period;
        self
    }

    /// Start with target clamping on or off.
    pub fn limits_enabled(mut self, enabled: bool) -> Self {
        self.limits_enabled = enabled;
        self
    }

    /// Set the waypoint buffer capacity.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Give up homing after `max_steps` pulses.
    pub fn homing_max_steps(mut self, max_steps: u32) -> Self {
        self.homing_max_steps = Some(max_steps);
        self
    }

    /// Configure everything except pins and delay from a TableConfig.
    pub fn from_config(mut self, config: &TableConfig) -> Self {
        self.step_ratio = Some(config.step_ratio);
        self.half_period = config.step_half_period;
        self.limits_enabled = config.limits_enabled;
        self.buffer_capacity = config.buffer_capacity;
        self.homing_max_steps = config.homing_max_steps;
        for axis in Axis::ALL {
            let axis_config = config.axis(axis);
            self.max_travel[axis.index()] = Some(axis_config.max_travel);
            self.invert_direction[axis.index()] = axis_config.invert_direction;
            self.limit_active_high[axis.index()] = axis_config.limit_active_high;
        }
        self
    }

    /// Build the MotionController.
    ///
    /// Every driver starts disabled with its DIR line at the default level.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing, a setting is out of
    /// range, or a pin fails during initialization.
    pub fn build(self) -> Result<MotionController<STEP, DIR, EN, LIMIT, DELAY>> {
        let step_ratio = self
            .step_ratio
            .ok_or(Error::Config(ConfigError::Missing("step_ratio")))?;
        validate_step_ratio(step_ratio)?;

        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::Missing("delay")))?;

        validate_buffer_capacity(self.buffer_capacity)?;
        let buffer = WaypointBuffer::with_capacity(self.buffer_capacity)?;

        let mut travel = [TravelLimits { max_steps: 0 }; 3];
        for axis in Axis::ALL {
            let max_travel = self.max_travel[axis.index()]
                .ok_or(Error::Config(ConfigError::Missing(missing_travel(axis))))?;
            validate_max_travel(axis, max_travel)?;
            travel[axis.index()] = TravelLimits::from_travel(max_travel, step_ratio);
        }

        let [x, y, z] = self.pins;
        let x = x.ok_or(Error::Config(ConfigError::Missing("x_axis pins")))?;
        let y = y.ok_or(Error::Config(ConfigError::Missing("y_axis pins")))?;
        let z = z.ok_or(Error::Config(ConfigError::Missing("z_axis pins")))?;

        let driver = |axis: Axis, pins| {
            AxisDriver::new(
                axis,
                pins,
                self.invert_direction[axis.index()],
                self.limit_active_high[axis.index()],
            )
        };
        let axes = [
            driver(Axis::X, x)?,
            driver(Axis::Y, y)?,
            driver(Axis::Z, z)?,
        ];

        Ok(MotionController::from_parts(
            axes,
            delay,
            step_ratio,
            travel,
            MotionLimitsPolicy::new(self.limits_enabled),
            self.half_period,
            buffer,
            self.homing_max_steps,
        ))
    }
}

fn missing_travel(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "x max_travel",
        Axis::Y => "y max_travel",
        Axis::Z => "z max_travel",
    }
}
