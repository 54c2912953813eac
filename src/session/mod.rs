//! Operator session.
//!
//! Ties a [`MotionController`] to a line-oriented operator link: control
//! characters (`z`, `b`, `e`) and `x,y,z` coordinate lines come in, short
//! status messages go out through a [`SharedStatus`].

mod command;

pub use command::{Command, MAX_COMMANDS};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::axis::Axis;
use crate::error::Result;
use crate::motion::{CancelToken, HomingOutcome, MotionController};
use crate::status::{SharedStatus, StatusSink};

/// An operator session driving one table.
pub struct Session<'a, STEP, DIR, EN, LIMIT, DELAY, S>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    DELAY: DelayNs,
    S: StatusSink,
{
    table: MotionController<STEP, DIR, EN, LIMIT, DELAY>,
    status: &'a SharedStatus<S>,
    buffering: bool,
}

impl<'a, STEP, DIR, EN, LIMIT, DELAY, S> Session<'a, STEP, DIR, EN, LIMIT, DELAY, S>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    LIMIT: InputPin,
    DELAY: DelayNs,
    S: StatusSink,
{
    /// Start a session, not buffering.
    pub fn new(
        table: MotionController<STEP, DIR, EN, LIMIT, DELAY>,
        status: &'a SharedStatus<S>,
    ) -> Self {
        Self {
            table,
            status,
            buffering: false,
        }
    }

    /// Home X, Y and Z in turn, then enable limit enforcement.
    ///
    /// `cancel[i]` stops homing of the axis with index `i`; the spot where it
    /// stopped becomes that axis' zero.
    ///
    /// # Errors
    ///
    /// Returns the first homing error; later axes are not homed.
    pub fn home_all(&mut self, cancel: &[CancelToken; 3]) -> Result<[HomingOutcome; 3]> {
        let mut outcomes = [HomingOutcome::LimitReached { steps: 0 }; 3];
        for axis in Axis::ALL {
            self.status.write(homing_prompt(axis));
            outcomes[axis.index()] = self.table.home_axis(axis, &cancel[axis.index()])?;
        }

        self.table.set_limits(true);
        self.status.write("Waiting...");
        Ok(outcomes)
    }

    /// Parse and execute one received line.
    ///
    /// # Errors
    ///
    /// Returns parse errors without touching the table, and motion errors
    /// from the executed commands.
    pub fn handle_line(&mut self, line: &str) -> Result<()> {
        let commands = Command::parse_line(line)?;

        if let [Command::MoveTo(waypoint)] = commands.as_slice() {
            self.status.write(line.trim());
            return if self.buffering {
                self.table.add_to_buffer(*waypoint)
            } else {
                self.table.go_to(*waypoint)
            };
        }

        for command in commands.iter() {
            match command {
                Command::Zero => self.table.set_zero(),
                Command::ToggleBuffering => self.buffering = !self.buffering,
                Command::ToggleLimits => {
                    let enabled = self.table.limits_enabled();
                    self.table.set_limits(!enabled);
                }
                Command::MoveTo(_) => {}
            }
        }

        // One message per line: zero, then buffering, then limits.
        if commands.contains(&Command::Zero) {
            self.status.write("Zeroed!");
        } else if commands.contains(&Command::ToggleBuffering) {
            if self.buffering {
                self.status.write("Now buffering!");
            } else {
                self.status.write("Running buffer!");
                self.table.run_buffer()?;
            }
        } else if self.table.limits_enabled() {
            self.status.write("Limits enabled!");
        } else {
            self.status.write("Limits disabled!");
        }
        Ok(())
    }

    /// Check whether coordinate lines are being queued.
    pub fn is_buffering(&self) -> bool {
        self.buffering
    }

    /// Get the table.
    pub fn table(&self) -> &MotionController<STEP, DIR, EN, LIMIT, DELAY> {
        &self.table
    }

    /// Get the table mutably.
    pub fn table_mut(&mut self) -> &mut MotionController<STEP, DIR, EN, LIMIT, DELAY> {
        &mut self.table
    }

    /// End the session and return the table.
    pub fn into_table(self) -> MotionController<STEP, DIR, EN, LIMIT, DELAY> {
        self.table
    }
}

fn homing_prompt(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "Zeroing X, cancel to stop",
        Axis::Y => "Zeroing Y, cancel to stop",
        Axis::Z => "Zeroing Z, cancel to stop",
    }
}
