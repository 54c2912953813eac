//! Unit tests for TOML configuration parsing.

use gantry_motion::config::{load_config, parse_config, TableConfig};
use gantry_motion::{Axis, Milliseconds, MAX_WAYPOINTS};

/// Test parsing a complete table description.
#[test]
fn test_parse_full_table() {
    let toml_str = r#"
step_ratio_in_per_step = 0.0007925725
step_half_period_ms = 3
limits_enabled = true
buffer_capacity = 16
homing_max_steps = 20000

[axes.x]
max_travel_in = 11.5

[axes.y]
max_travel_in = 6.75
invert_direction = true

[axes.z]
max_travel_in = 1.75
invert_direction = true
limit_active_high = false
"#;

    let config: TableConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.step_ratio.0, 0.000_792_572_5);
    assert_eq!(config.step_half_period, Milliseconds(3));
    assert!(config.limits_enabled);
    assert_eq!(config.buffer_capacity, 16);
    assert_eq!(config.homing_max_steps, Some(20000));
    assert_eq!(config.axis(Axis::X).max_travel.0, 11.5);
    assert!(!config.axis(Axis::X).invert_direction);
    assert!(config.axis(Axis::Y).invert_direction);
    assert!(!config.axis(Axis::Z).limit_active_high);
}

/// Test that optional fields fall back to their defaults.
#[test]
fn test_parse_defaults() {
    let toml_str = r#"
step_ratio_in_per_step = 0.001

[axes.x]
max_travel_in = 10.0
[axes.y]
max_travel_in = 5.0
[axes.z]
max_travel_in = 2.0
"#;

    let config = parse_config(toml_str).expect("Failed to parse config");

    assert_eq!(config.step_half_period, Milliseconds(5));
    assert!(!config.limits_enabled);
    assert_eq!(config.buffer_capacity, MAX_WAYPOINTS);
    assert_eq!(config.homing_max_steps, None);
    for axis in Axis::ALL {
        assert!(!config.axis(axis).invert_direction);
        assert!(config.axis(axis).limit_active_high);
    }
}

/// Test that the parsed file matches the built-in reference table.
#[test]
fn test_parse_matches_reference() {
    let toml_str = r#"
step_ratio_in_per_step = 0.0007925725
step_half_period_ms = 3

[axes.x]
max_travel_in = 11.5
[axes.y]
max_travel_in = 6.75
invert_direction = true
[axes.z]
max_travel_in = 1.75
invert_direction = true
"#;

    let parsed = parse_config(toml_str).expect("Failed to parse config");
    let reference = TableConfig::reference();

    for axis in Axis::ALL {
        assert_eq!(parsed.travel_limits(axis), reference.travel_limits(axis));
        assert_eq!(
            parsed.axis(axis).invert_direction,
            reference.axis(axis).invert_direction
        );
    }
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("gantry_motion_load_config_test.toml");
    std::fs::write(
        &path,
        "step_ratio_in_per_step = 0.0625\n\
         [axes.x]\nmax_travel_in = 4.0\n\
         [axes.y]\nmax_travel_in = 4.0\n\
         [axes.z]\nmax_travel_in = 1.0\n",
    )
    .expect("Failed to write config");

    let config = load_config(&path).expect("Failed to load config");
    std::fs::remove_file(&path).ok();

    assert_eq!(config.travel_limits(Axis::X).max_steps, 64);
}

/// Test that a value of the wrong type is a parse error.
#[test]
fn test_parse_wrong_type() {
    let toml_str = r#"
step_ratio_in_per_step = "fine"

[axes.x]
max_travel_in = 1.0
[axes.y]
max_travel_in = 1.0
[axes.z]
max_travel_in = 1.0
"#;

    assert!(parse_config(toml_str).is_err());
}
