//! Configuration validation.

use crate::axis::Axis;
use crate::error::{ConfigError, Error, Result};
use crate::motion::MAX_WAYPOINTS;

use super::units::{Inches, InchesPerStep};
use super::TableConfig;

/// Validate a table configuration.
///
/// Checks:
/// - Step ratio is finite and positive
/// - Every axis has a finite, positive maximum travel
/// - Buffer capacity is within 1..=MAX_WAYPOINTS
pub fn validate_config(config: &TableConfig) -> Result<()> {
    validate_step_ratio(config.step_ratio)?;

    for axis in Axis::ALL {
        validate_max_travel(axis, config.axis(axis).max_travel)?;
    }

    validate_buffer_capacity(config.buffer_capacity)
}

pub(crate) fn validate_step_ratio(ratio: InchesPerStep) -> Result<()> {
    if !ratio.is_valid() {
        return Err(Error::Config(ConfigError::InvalidStepRatio(ratio.0)));
    }
    Ok(())
}

pub(crate) fn validate_max_travel(axis: Axis, travel: Inches) -> Result<()> {
    if !travel.0.is_finite() || travel.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidMaxTravel {
            axis,
            value: travel.0,
        }));
    }
    Ok(())
}

pub(crate) fn validate_buffer_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 || capacity > MAX_WAYPOINTS {
        return Err(Error::Config(ConfigError::InvalidBufferCapacity(capacity)));
    }
    Ok(())
}
