//! Configuration module for gantry-motion.
//!
//! Provides types for loading and validating the table configuration from
//! TOML files (with `std` feature) or pre-built values.

mod limits;
#[cfg(feature = "std")]
mod loader;
mod table;
pub mod units;
mod validation;

pub use limits::{MotionLimitsPolicy, TravelLimits};
pub use table::{AxesConfig, AxisConfig, TableConfig};
pub use validation::validate_config;
pub(crate) use validation::{validate_buffer_capacity, validate_max_travel, validate_step_ratio};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Inches, InchesPerStep, Milliseconds, Steps};
