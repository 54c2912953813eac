//! # gantry-motion
//!
//! Motion control for a three-axis step/direction positioning table with
//! embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Lockstep moves**: all three axes pulse on a shared clock, each stopping
//!   as soon as its own step count is exhausted
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR/ENABLE, `InputPin` for limit
//!   sensors, `DelayNs` for timing
//! - **no_std compatible**: Core library works without standard library
//! - **Homing**: drive an axis against its limit sensor, cancellable through a
//!   [`CancelToken`]
//! - **Waypoint buffering**: queue moves and replay them in order
//! - **Configuration-driven**: describe the table in a TOML file
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gantry_motion::{MotionController, TableConfig, Waypoint};
//!
//! let config: TableConfig = gantry_motion::load_config("table.toml")?;
//!
//! let mut table = MotionController::builder()
//!     .from_config(&config)
//!     .x_axis(x_pins)
//!     .y_axis(y_pins)
//!     .z_axis(z_pins)
//!     .delay(delay)
//!     .build()?;
//!
//! table.zero_x()?;
//! table.go_to(Waypoint::new(1.0, 0.5, 0.0))?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to every module below.
#[macro_use]
mod fmt;

// Core modules
pub mod axis;
pub mod config;
pub mod error;
pub mod motion;
pub mod session;
pub mod status;

// Re-exports for ergonomic API
pub use axis::{Axis, AxisDriver, AxisPins, AxisPosition, Direction};
pub use config::{validate_config, AxisConfig, TableConfig, TravelLimits};
pub use error::{Error, Result};
pub use motion::{
    CancelToken, HomingOutcome, MotionController, MotionControllerBuilder, Waypoint,
    WaypointBuffer, MAX_WAYPOINTS,
};
pub use session::{Command, Session};
pub use status::{SharedStatus, StatusSink};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Inches, InchesPerStep, Milliseconds, Steps};
