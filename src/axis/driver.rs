//! Single-axis stepper driver.
//!
//! Generic over embedded-hal 1.0 pin types. The delay provider is owned by
//! the controller and lent to the operations that need timing, so all three
//! axes share one clock.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::units::{Milliseconds, Steps};
use crate::error::{AxisError, Error, HomingError, Result};
use crate::motion::{CancelToken, HomingOutcome};

use super::direction::Direction;
use super::position::AxisPosition;
use super::Axis;

/// The four hardware lines of one axis.
#[derive(Debug)]
pub struct AxisPins<STEP, DIR, EN, LIMIT> {
    /// STEP output (one rising edge per step).
    pub step: STEP,
    /// DIR output.
    pub dir: DIR,
    /// ENABLE output, active low.
    pub enable: EN,
    /// Limit sensor input.
    pub limit: LIMIT,
}

impl<STEP, DIR, EN, LIMIT> AxisPins<STEP, DIR, EN, LIMIT> {
    /// Bundle the pins of one axis.
    pub fn new(step: STEP, dir: DIR, enable: EN, limit: LIMIT) -> Self {
        Self {
            step,
            dir,
            enable,
            limit,
        }
    }
}

/// Stepper driver for one axis.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `EN`: ENABLE pin type (must implement `OutputPin`, active low)
/// - `LIMIT`: limit sensor type (must implement `InputPin`)
pub struct AxisDriver<STEP, DIR, EN, LIMIT>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
{
    /// Which axis this is, for errors and logging.
    axis: Axis,

    step_pin: STEP,
    dir_pin: DIR,
    enable_pin: EN,
    limit_pin: LIMIT,

    /// Current and target position.
    position: AxisPosition,

    /// DIR level for positive motion.
    default_dir_high: bool,

    /// Direction currently applied to the DIR line.
    direction: Direction,

    /// Whether the driver output stage is powered.
    enabled: bool,

    /// Limit sensor level that means "reached".
    limit_active_high: bool,
}

fn pin_error(axis: Axis) -> Error {
    Error::Axis(AxisError::Pin { axis })
}

impl<STEP, DIR, EN, LIMIT> AxisDriver<STEP, DIR, EN, LIMIT>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
{
    /// Take ownership of the pins, disable the driver and apply the default
    /// direction.
    pub fn new(
        axis: Axis,
        pins: AxisPins<STEP, DIR, EN, LIMIT>,
        default_dir_high: bool,
        limit_active_high: bool,
    ) -> Result<Self> {
        let mut driver = Self {
            axis,
            step_pin: pins.step,
            dir_pin: pins.dir,
            enable_pin: pins.enable,
            limit_pin: pins.limit,
            position: AxisPosition::new(),
            default_dir_high,
            direction: Direction::Positive,
            enabled: true,
            limit_active_high,
        };

        driver.disable()?;
        driver.set_direction(Direction::Positive)?;
        Ok(driver)
    }

    /// Get the axis this driver moves.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Get the position pair.
    #[inline]
    pub fn position(&self) -> &AxisPosition {
        &self.position
    }

    pub(crate) fn position_mut(&mut self) -> &mut AxisPosition {
        &mut self.position
    }

    /// Get current position in steps.
    #[inline]
    pub fn current(&self) -> Steps {
        self.position.current()
    }

    /// Get the direction currently applied to the DIR line.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// DIR level used for positive motion.
    #[inline]
    pub fn default_direction_high(&self) -> bool {
        self.default_dir_high
    }

    /// Whether the driver output stage is powered.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Drive the DIR line for `direction`. Does not move.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        let axis = self.axis;
        if direction.level(self.default_dir_high) {
            self.dir_pin.set_high().map_err(|_| pin_error(axis))?;
        } else {
            self.dir_pin.set_low().map_err(|_| pin_error(axis))?;
        }
        self.direction = direction;
        Ok(())
    }

    /// Overwrite the default polarity and apply it.
    pub fn set_default_direction(&mut self, high: bool) -> Result<()> {
        self.default_dir_high = high;
        self.set_direction(Direction::Positive)
    }

    /// Flip the default polarity and apply it.
    ///
    /// Corrects a mechanically reversed axis without touching any signs
    /// elsewhere.
    pub fn invert_default_direction(&mut self) -> Result<()> {
        self.set_default_direction(!self.default_dir_high)
    }

    /// Power the driver (ENABLE low).
    pub fn enable(&mut self) -> Result<()> {
        let axis = self.axis;
        self.enable_pin.set_low().map_err(|_| pin_error(axis))?;
        self.enabled = true;
        Ok(())
    }

    /// Unpower the driver (ENABLE high).
    pub fn disable(&mut self) -> Result<()> {
        let axis = self.axis;
        self.enable_pin.set_high().map_err(|_| pin_error(axis))?;
        self.enabled = false;
        Ok(())
    }

    /// Disable the driver and restore the default direction.
    pub fn park(&mut self) -> Result<()> {
        self.disable()?;
        self.set_direction(Direction::Positive)
    }

    /// Assert STEP and account for the pulse in the active direction.
    pub(crate) fn step_high(&mut self) -> Result<()> {
        let axis = self.axis;
        self.step_pin.set_high().map_err(|_| pin_error(axis))?;
        self.position.record_step(self.direction.sign());
        Ok(())
    }

    /// Deassert STEP.
    pub(crate) fn step_low(&mut self) -> Result<()> {
        let axis = self.axis;
        self.step_pin.set_low().map_err(|_| pin_error(axis))
    }

    /// Issue one full pulse: high for `half_period`, then low for `half_period`.
    pub fn step<D: DelayNs>(&mut self, delay: &mut D, half_period: Milliseconds) -> Result<()> {
        self.step_high()?;
        delay.delay_ms(half_period.0);
        self.step_low()?;
        delay.delay_ms(half_period.0);
        Ok(())
    }

    /// Zero current and target. Does not move.
    pub fn zero_position(&mut self) {
        self.position.zero();
    }

    /// Read the limit sensor.
    pub fn limit_reached(&mut self) -> Result<bool> {
        let axis = self.axis;
        let high = self.limit_pin.is_high().map_err(|_| pin_error(axis))?;
        Ok(high == self.limit_active_high)
    }

    /// Drive toward home until the limit sensor asserts or `cancel` fires,
    /// then zero the position and disable the driver.
    ///
    /// With `max_steps` unset this never returns while the sensor stays
    /// clear and nobody cancels.
    ///
    /// # Errors
    ///
    /// Returns [`HomingError::TimedOut`] if `max_steps` pulses were issued
    /// without reaching the limit. The position is left unzeroed.
    pub fn home_until_limit<D: DelayNs>(
        &mut self,
        delay: &mut D,
        half_period: Milliseconds,
        cancel: &CancelToken,
        max_steps: Option<u32>,
    ) -> Result<HomingOutcome> {
        let result = self.seek_limit(delay, half_period, cancel, max_steps);

        match result {
            Ok(outcome) => {
                self.zero_position();
                self.disable()?;
                Ok(outcome)
            }
            Err(e) => {
                if self.disable().is_err() {
                    warn!("{} axis: disable after failed homing also failed", self.axis);
                }
                Err(e)
            }
        }
    }

    fn seek_limit<D: DelayNs>(
        &mut self,
        delay: &mut D,
        half_period: Milliseconds,
        cancel: &CancelToken,
        max_steps: Option<u32>,
    ) -> Result<HomingOutcome> {
        self.set_direction(Direction::Negative)?;
        self.enable()?;

        let mut steps: u32 = 0;
        loop {
            if self.limit_reached()? {
                return Ok(HomingOutcome::LimitReached { steps });
            }
            if cancel.is_cancelled() {
                return Ok(HomingOutcome::Cancelled { steps });
            }
            if max_steps.is_some_and(|max| steps >= max) {
                return Err(Error::Homing(HomingError::TimedOut {
                    axis: self.axis,
                    steps,
                }));
            }

            self.step(delay, half_period)?;
            steps = steps.saturating_add(1);
        }
    }
}
