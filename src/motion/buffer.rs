//! Waypoint buffer for queued moves.

use heapless::Vec;

use crate::config::units::Inches;
use crate::error::{BufferError, Error, Result};

/// Maximum number of waypoints a buffer can hold.
pub const MAX_WAYPOINTS: usize = 64;

/// A target position for all three axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Waypoint {
    /// X target.
    pub x: Inches,
    /// Y target.
    pub y: Inches,
    /// Z target.
    pub z: Inches,
}

impl Waypoint {
    /// Create a waypoint from raw inch values.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: Inches(x),
            y: Inches(y),
            z: Inches(z),
        }
    }

    /// The homed origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Targets in axis order.
    pub fn as_array(&self) -> [Inches; 3] {
        [self.x, self.y, self.z]
    }
}

/// Ordered, append-only queue of waypoints.
///
/// Filled contiguously from index 0 and emptied as a whole when run.
#[derive(Debug, Clone)]
pub struct WaypointBuffer {
    points: Vec<Waypoint, MAX_WAYPOINTS>,
    capacity: usize,
}

impl Default for WaypointBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl WaypointBuffer {
    /// Create a buffer with the full capacity.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            capacity: MAX_WAYPOINTS,
        }
    }

    /// Create a buffer holding at most `capacity` waypoints.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is 0 or exceeds [`MAX_WAYPOINTS`].
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        crate::config::validate_buffer_capacity(capacity)?;
        Ok(Self {
            points: Vec::new(),
            capacity,
        })
    }

    /// Append a waypoint.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Full`] and leaves the buffer unchanged if it
    /// already holds `capacity` waypoints.
    pub fn push(&mut self, waypoint: Waypoint) -> Result<()> {
        let full = Error::Buffer(BufferError::Full {
            capacity: self.capacity,
        });
        if self.points.len() >= self.capacity {
            return Err(full);
        }
        self.points.push(waypoint).map_err(|_| full)
    }

    /// Get the number of queued waypoints.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Check if another push would fail.
    pub fn is_full(&self) -> bool {
        self.points.len() >= self.capacity
    }

    /// Get the capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get an iterator over queued waypoints in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.points.iter()
    }

    /// Discard all queued waypoints.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Take every queued waypoint out, leaving the buffer empty.
    pub(crate) fn take(&mut self) -> Vec<Waypoint, MAX_WAYPOINTS> {
        core::mem::take(&mut self.points)
    }
}
