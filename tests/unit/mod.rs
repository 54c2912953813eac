//! Unit test harness for gantry-motion.
//!
//! Configuration parsing and validation tests that go through the public API.

mod config_parsing;
mod config_validation;
