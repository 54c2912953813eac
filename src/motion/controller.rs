//! Three-axis motion controller.
//!
//! Owns the three axis drivers, the shared delay provider, the travel limits
//! and the waypoint buffer. Every motion entry point takes `&mut self`, so a
//! table can never run two moves or homing runs at once.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::axis::{Axis, AxisDriver};
use crate::config::units::{Inches, InchesPerStep, Milliseconds, Steps};
use crate::config::{MotionLimitsPolicy, TravelLimits};
use crate::error::{AxisError, Error, Result};

use super::buffer::{Waypoint, WaypointBuffer};
use super::builder::MotionControllerBuilder;
use super::executor::LockstepExecutor;
use super::homing::{CancelToken, HomingOutcome};

/// Motion controller for one physical table.
///
/// All three axes share the same pin types; use the HAL's type-erased pins
/// when the concrete pin types differ.
pub struct MotionController<STEP, DIR, EN, LIMIT, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    DELAY: DelayNs,
{
    /// X, Y, Z drivers in index order.
    axes: [AxisDriver<STEP, DIR, EN, LIMIT>; 3],

    /// Shared step clock.
    delay: DELAY,

    /// Distance per step, shared by all axes.
    step_ratio: InchesPerStep,

    /// Per-axis bounds in steps.
    travel: [TravelLimits; 3],

    /// Clamp targets into `travel` when enabled.
    limits: MotionLimitsPolicy,

    /// Step half-period for every axis.
    half_period: Milliseconds,

    /// Queued waypoints.
    buffer: WaypointBuffer,

    /// Homing step budget (unbounded when `None`).
    homing_max_steps: Option<u32>,
}

impl<STEP, DIR, EN, LIMIT, DELAY> MotionController<STEP, DIR, EN, LIMIT, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    DELAY: DelayNs,
{
    /// Start building a controller.
    pub fn builder() -> MotionControllerBuilder<STEP, DIR, EN, LIMIT, DELAY> {
        MotionControllerBuilder::new()
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        axes: [AxisDriver<STEP, DIR, EN, LIMIT>; 3],
        delay: DELAY,
        step_ratio: InchesPerStep,
        travel: [TravelLimits; 3],
        limits: MotionLimitsPolicy,
        half_period: Milliseconds,
        buffer: WaypointBuffer,
        homing_max_steps: Option<u32>,
    ) -> Self {
        Self {
            axes,
            delay,
            step_ratio,
            travel,
            limits,
            half_period,
            buffer,
            homing_max_steps,
        }
    }

    // ------------------------------------------------------------------
    // Coordinated moves
    // ------------------------------------------------------------------

    /// Move all three axes to `target` (absolute, inches).
    ///
    /// Targets are truncated to whole steps and, when limits are enabled,
    /// clamped into each axis' travel before anything moves. All axes pulse
    /// on a shared clock; each stops after exactly `|delta|` pulses. On
    /// return every driver is disabled and every DIR line is back at its
    /// default level, including when nothing had to move.
    ///
    /// # Errors
    ///
    /// Returns [`AxisError::NonFiniteTarget`] without moving if any target is
    /// infinite or NaN. Returns an error if a pin operation fails; the
    /// drivers are still parked on a best-effort basis and positions reflect
    /// the pulses that were actually issued.
    pub fn go_to(&mut self, target: Waypoint) -> Result<()> {
        let targets = target.as_array();
        if let Some(axis) = Axis::ALL
            .into_iter()
            .find(|axis| !targets[axis.index()].0.is_finite())
        {
            return Err(Error::Axis(AxisError::NonFiniteTarget { axis }));
        }
        for axis in Axis::ALL {
            let steps = self.resolve_target(axis, targets[axis.index()]);
            self.axes[axis.index()].position_mut().set_target(steps);
        }

        let deltas: [i64; 3] = core::array::from_fn(|i| self.axes[i].position().delta());
        debug!(
            "move: delta x={} y={} z={}",
            deltas[0], deltas[1], deltas[2]
        );

        let moved = self.execute(deltas);
        let parked = self.park_all();
        moved.and(parked)
    }

    /// Convert one axis target to steps, applying the limits policy.
    fn resolve_target(&self, axis: Axis, value: Inches) -> Steps {
        let steps = Steps::from_inches(value, self.step_ratio);
        if self.limits.enabled {
            let clamped = self.travel[axis.index()].clamp(steps);
            if clamped != steps {
                debug!("{} target {} clamped to {}", axis, steps.0, clamped.0);
            }
            clamped
        } else {
            steps
        }
    }

    fn execute(&mut self, deltas: [i64; 3]) -> Result<()> {
        let mut executor = LockstepExecutor::new(deltas);

        for (driver, plan) in self.axes.iter_mut().zip(executor.plans()) {
            driver.set_direction(plan.direction)?;
            if plan.is_active() {
                driver.enable()?;
            }
        }

        let half = self.half_period.0;
        while !executor.is_complete() {
            let pulses = executor.advance();
            for (driver, pulse) in self.axes.iter_mut().zip(pulses) {
                if pulse {
                    driver.step_high()?;
                }
            }
            self.delay.delay_ms(half);
            for driver in self.axes.iter_mut() {
                driver.step_low()?;
            }
            self.delay.delay_ms(half);
        }

        trace!("move complete after {} ticks", executor.ticks());
        Ok(())
    }

    /// Disable every driver and restore default directions, attempting all
    /// axes even if one fails.
    fn park_all(&mut self) -> Result<()> {
        let mut first_error: Option<Error> = None;
        for driver in self.axes.iter_mut() {
            if let Err(e) = driver.park() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Buffered moves
    // ------------------------------------------------------------------

    /// Queue a waypoint for [`run_buffer`](Self::run_buffer). Does not move.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Full`](crate::error::BufferError::Full) when
    /// the buffer is at capacity; the waypoint is dropped.
    pub fn add_to_buffer(&mut self, target: Waypoint) -> Result<()> {
        let result = self.buffer.push(target);
        if result.is_err() {
            warn!("waypoint buffer full ({})", self.buffer.capacity());
        }
        result
    }

    /// Execute every queued waypoint in insertion order, each move completing
    /// before the next begins. The buffer is empty afterwards.
    ///
    /// # Errors
    ///
    /// Stops at the first failing move and returns its error. The remaining
    /// waypoints are discarded.
    pub fn run_buffer(&mut self) -> Result<()> {
        let waypoints = self.buffer.take();
        info!("running {} buffered waypoints", waypoints.len());
        for waypoint in waypoints.iter() {
            self.go_to(*waypoint)?;
        }
        Ok(())
    }

    /// Get the waypoint buffer.
    pub fn buffer(&self) -> &WaypointBuffer {
        &self.buffer
    }

    /// Get the number of queued waypoints.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    // ------------------------------------------------------------------
    // Homing and zeroing
    // ------------------------------------------------------------------

    /// Drive `axis` toward home until its limit sensor asserts or `cancel`
    /// fires, then zero it. Other axes are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`HomingError::TimedOut`](crate::error::HomingError::TimedOut)
    /// when a homing step budget is configured and exhausted.
    pub fn home_axis(&mut self, axis: Axis, cancel: &CancelToken) -> Result<HomingOutcome> {
        info!("homing {} axis", axis);
        let driver = &mut self.axes[axis.index()];
        let outcome =
            driver.home_until_limit(&mut self.delay, self.half_period, cancel, self.homing_max_steps)?;

        match outcome {
            HomingOutcome::LimitReached { steps } => {
                info!("{} axis homed after {} steps", axis, steps)
            }
            HomingOutcome::Cancelled { steps } => {
                warn!("{} axis homing cancelled after {} steps", axis, steps)
            }
        }
        Ok(outcome)
    }

    /// Home the X axis. Blocks until the limit sensor asserts.
    pub fn zero_x(&mut self) -> Result<HomingOutcome> {
        self.home_axis(Axis::X, &CancelToken::new())
    }

    /// Home the Y axis. Blocks until the limit sensor asserts.
    pub fn zero_y(&mut self) -> Result<HomingOutcome> {
        self.home_axis(Axis::Y, &CancelToken::new())
    }

    /// Home the Z axis. Blocks until the limit sensor asserts.
    pub fn zero_z(&mut self) -> Result<HomingOutcome> {
        self.home_axis(Axis::Z, &CancelToken::new())
    }

    /// Declare the current position of every axis to be zero. Does not move.
    pub fn set_zero(&mut self) {
        for driver in self.axes.iter_mut() {
            driver.zero_position();
        }
    }

    /// Declare the current position of one axis to be zero. Does not move.
    pub fn set_zero_axis(&mut self, axis: Axis) {
        self.axes[axis.index()].zero_position();
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Set the step half-period for all subsequent moves and homing runs.
    pub fn set_wait(&mut self, half_period: Milliseconds) {
        self.half_period = half_period;
    }

    /// Get the step half-period.
    pub fn wait(&self) -> Milliseconds {
        self.half_period
    }

    /// Overwrite an axis' default DIR level and apply it.
    pub fn set_default_direction(&mut self, axis: Axis, high: bool) -> Result<()> {
        self.axes[axis.index()].set_default_direction(high)
    }

    /// Set the X axis default DIR level.
    pub fn set_x_dir(&mut self, high: bool) -> Result<()> {
        self.set_default_direction(Axis::X, high)
    }

    /// Set the Y axis default DIR level.
    pub fn set_y_dir(&mut self, high: bool) -> Result<()> {
        self.set_default_direction(Axis::Y, high)
    }

    /// Set the Z axis default DIR level.
    pub fn set_z_dir(&mut self, high: bool) -> Result<()> {
        self.set_default_direction(Axis::Z, high)
    }

    /// Flip an axis' default DIR level and apply it.
    pub fn invert(&mut self, axis: Axis) -> Result<()> {
        self.axes[axis.index()].invert_default_direction()
    }

    /// Flip the X axis default DIR level.
    pub fn invert_x(&mut self) -> Result<()> {
        self.invert(Axis::X)
    }

    /// Flip the Y axis default DIR level.
    pub fn invert_y(&mut self) -> Result<()> {
        self.invert(Axis::Y)
    }

    /// Flip the Z axis default DIR level.
    pub fn invert_z(&mut self) -> Result<()> {
        self.invert(Axis::Z)
    }

    /// Enable or disable clamping of targets into the travel bounds.
    pub fn set_limits(&mut self, enabled: bool) {
        self.limits.enabled = enabled;
    }

    /// Check whether targets are clamped.
    pub fn limits_enabled(&self) -> bool {
        self.limits.enabled
    }

    /// Set or clear the homing step budget.
    pub fn set_homing_max_steps(&mut self, max_steps: Option<u32>) {
        self.homing_max_steps = max_steps;
    }

    /// Get the homing step budget.
    pub fn homing_max_steps(&self) -> Option<u32> {
        self.homing_max_steps
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Get an axis driver.
    pub fn axis(&self, axis: Axis) -> &AxisDriver<STEP, DIR, EN, LIMIT> {
        &self.axes[axis.index()]
    }

    /// Get an axis' current position in steps.
    pub fn position(&self, axis: Axis) -> Steps {
        self.axes[axis.index()].current()
    }

    /// Get an axis' last commanded target in steps.
    pub fn target(&self, axis: Axis) -> Steps {
        self.axes[axis.index()].position().target()
    }

    /// Get an axis' current position in inches.
    pub fn position_inches(&self, axis: Axis) -> Inches {
        self.axes[axis.index()].position().current_inches(self.step_ratio)
    }

    /// Get the distance-per-step ratio.
    pub fn step_ratio(&self) -> InchesPerStep {
        self.step_ratio
    }

    /// Get an axis' travel bounds.
    pub fn travel_limits(&self, axis: Axis) -> TravelLimits {
        self.travel[axis.index()]
    }
}
