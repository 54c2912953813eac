//! Unit tests for configuration validation.

use gantry_motion::config::{parse_config, validate_config, TableConfig};
use gantry_motion::error::{ConfigError, Error};
use gantry_motion::{Axis, Inches, InchesPerStep, MotionController, MAX_WAYPOINTS};

/// Test validation of the reference table.
#[test]
fn test_reference_passes_validation() {
    assert!(validate_config(&TableConfig::reference()).is_ok());
}

/// Test validation fails for a negative step ratio.
#[test]
fn test_negative_step_ratio() {
    let mut config = TableConfig::reference();
    config.step_ratio = InchesPerStep(-0.001);

    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidStepRatio(_)))
    ));
}

/// Test validation fails for zero travel and names the axis.
#[test]
fn test_zero_travel() {
    let mut config = TableConfig::reference();
    config.axes.z.max_travel = Inches(0.0);

    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidMaxTravel { axis: Axis::Z, .. }))
    ));
}

/// Test validation fails for a NaN travel.
#[test]
fn test_nan_travel() {
    let mut config = TableConfig::reference();
    config.axes.x.max_travel = Inches(f32::NAN);

    assert!(validate_config(&config).is_err());
}

/// Test buffer capacity bounds.
#[test]
fn test_buffer_capacity_bounds() {
    let mut config = TableConfig::reference();

    config.buffer_capacity = 0;
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidBufferCapacity(0)))
    );

    config.buffer_capacity = MAX_WAYPOINTS;
    assert!(validate_config(&config).is_ok());

    config.buffer_capacity = MAX_WAYPOINTS + 1;
    assert!(validate_config(&config).is_err());
}

/// Test that parsing runs validation.
#[test]
fn test_parse_rejects_invalid_travel() {
    let toml_str = r#"
step_ratio_in_per_step = 0.001

[axes.x]
max_travel_in = 1.0
[axes.y]
max_travel_in = -3.0
[axes.z]
max_travel_in = 1.0
"#;

    let result = parse_config(toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidMaxTravel { axis: Axis::Y, .. }))
    ));
}

/// Test that the builder reports missing fields before touching any pin.
#[test]
fn test_builder_requires_step_ratio() {
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::Mock as PinMock;

    let result = MotionController::<PinMock, PinMock, PinMock, PinMock, NoopDelay>::builder()
        .delay(NoopDelay::new())
        .build();

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::Missing("step_ratio")))
    ));
}

/// Test that the builder applies the same travel check as the config.
#[test]
fn test_builder_rejects_invalid_travel() {
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::Mock as PinMock;

    let result = MotionController::<PinMock, PinMock, PinMock, PinMock, NoopDelay>::builder()
        .step_ratio(InchesPerStep(0.001))
        .max_travel(Axis::X, Inches(-2.0))
        .max_travel(Axis::Y, Inches(1.0))
        .max_travel(Axis::Z, Inches(1.0))
        .delay(NoopDelay::new())
        .build();

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidMaxTravel { axis: Axis::X, .. }))
    ));
}

/// Test that the builder applies the same ratio check as the config.
#[test]
fn test_builder_rejects_nan_ratio() {
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::Mock as PinMock;

    let result = MotionController::<PinMock, PinMock, PinMock, PinMock, NoopDelay>::builder()
        .step_ratio(InchesPerStep(f32::NAN))
        .delay(NoopDelay::new())
        .build();

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidStepRatio(_)))
    ));
}
