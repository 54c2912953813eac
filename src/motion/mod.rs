//! Motion module for gantry-motion.
//!
//! Provides lockstep three-axis moves, waypoint buffering and homing.

mod buffer;
mod builder;
mod controller;
mod executor;
mod homing;

pub use buffer::{Waypoint, WaypointBuffer, MAX_WAYPOINTS};
pub use builder::MotionControllerBuilder;
pub use controller::MotionController;
pub use executor::{AxisPlan, LockstepExecutor};
pub use homing::{CancelToken, HomingOutcome};
