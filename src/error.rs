//! Error types for gantry-motion.
//!
//! Provides unified error handling across configuration, axis hardware,
//! buffering, homing and command parsing.

use core::fmt;

use crate::axis::Axis;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all gantry-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Axis hardware error
    Axis(AxisError),
    /// Waypoint buffer error
    Buffer(BufferError),
    /// Homing error
    Homing(HomingError),
    /// Command line error
    Command(CommandError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Step ratio must be finite and > 0
    InvalidStepRatio(f32),
    /// Maximum travel must be finite and > 0
    InvalidMaxTravel {
        /// Offending axis
        axis: Axis,
        /// Configured travel in inches
        value: f32,
    },
    /// Buffer capacity outside 1..=MAX_WAYPOINTS
    InvalidBufferCapacity(usize),
    /// A required builder field was not provided
    Missing(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Axis hardware errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisError {
    /// A STEP/DIR/ENABLE write or limit read failed
    Pin {
        /// Axis whose pin failed
        axis: Axis,
    },
    /// A commanded target was infinite or NaN
    NonFiniteTarget {
        /// Axis with the bad target
        axis: Axis,
    },
}

/// Waypoint buffer errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// No room for another waypoint
    Full {
        /// Configured capacity
        capacity: usize,
    },
}

/// Homing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingError {
    /// The limit sensor did not assert within the configured step budget
    TimedOut {
        /// Axis being homed
        axis: Axis,
        /// Pulses issued before giving up
        steps: u32,
    },
}

/// Command line errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Line is neither control characters nor `x,y,z`
    InvalidCoordinates(heapless::String<64>),
    /// Line was empty after trimming
    Empty,
    /// More control characters than one line may carry
    TooManyCommands,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Axis(e) => write!(f, "Axis error: {}", e),
            Error::Buffer(e) => write!(f, "Buffer error: {}", e),
            Error::Homing(e) => write!(f, "Homing error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidStepRatio(v) => {
                write!(f, "Invalid step ratio: {}. Must be finite and > 0", v)
            }
            ConfigError::InvalidMaxTravel { axis, value } => {
                write!(f, "Invalid max travel for {} axis: {}. Must be finite and > 0", axis, value)
            }
            ConfigError::InvalidBufferCapacity(v) => write!(
                f,
                "Invalid buffer capacity: {}. Must be 1-{}",
                v,
                crate::motion::MAX_WAYPOINTS
            ),
            ConfigError::Missing(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for AxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisError::Pin { axis } => write!(f, "GPIO pin operation failed on {} axis", axis),
            AxisError::NonFiniteTarget { axis } => {
                write!(f, "Target for {} axis is not a finite number", axis)
            }
        }
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::Full { capacity } => {
                write!(f, "Waypoint buffer full ({} entries)", capacity)
            }
        }
    }
}

impl fmt::Display for HomingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomingError::TimedOut { axis, steps } => write!(
                f,
                "{} axis limit not reached after {} steps",
                axis, steps
            ),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidCoordinates(line) => {
                write!(f, "Expected '<x>,<y>,<z>', got '{}'", line)
            }
            CommandError::Empty => write!(f, "Empty command line"),
            CommandError::TooManyCommands => write!(f, "Too many control characters in one line"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<AxisError> for Error {
    fn from(e: AxisError) -> Self {
        Error::Axis(e)
    }
}

impl From<BufferError> for Error {
    fn from(e: BufferError) -> Self {
        Error::Buffer(e)
    }
}

impl From<HomingError> for Error {
    fn from(e: HomingError) -> Self {
        Error::Homing(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for AxisError {}

#[cfg(feature = "std")]
impl std::error::Error for BufferError {}

#[cfg(feature = "std")]
impl std::error::Error for HomingError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}
