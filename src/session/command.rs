//! Operator command lines.

use heapless::{String, Vec};

use crate::error::{CommandError, Result};
use crate::motion::Waypoint;

/// Maximum number of control characters honoured in one line.
pub const MAX_COMMANDS: usize = 16;

/// One operator command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `z`: declare the current position zero.
    Zero,
    /// `b`: enter or leave buffering mode.
    ToggleBuffering,
    /// `e`: toggle travel limit enforcement.
    ToggleLimits,
    /// `<x>,<y>,<z>`: move (or queue a move) to absolute inches.
    MoveTo(Waypoint),
}

impl Command {
    /// Map a reserved control character to its command.
    pub fn from_control(c: char) -> Option<Self> {
        match c {
            'z' => Some(Command::Zero),
            'b' => Some(Command::ToggleBuffering),
            'e' => Some(Command::ToggleLimits),
            _ => None,
        }
    }

    /// Parse one received line.
    ///
    /// A line containing any control character yields every control
    /// character in input order; other characters on such a line are
    /// ignored. Any other line must be exactly three comma-separated numbers.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Empty`] for a blank line,
    /// [`CommandError::InvalidCoordinates`] for a malformed coordinate line
    /// and [`CommandError::TooManyCommands`] past [`MAX_COMMANDS`] control
    /// characters.
    pub fn parse_line(line: &str) -> Result<Vec<Command, MAX_COMMANDS>> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty.into());
        }

        let mut commands = Vec::new();
        for command in line.chars().filter_map(Command::from_control) {
            commands
                .push(command)
                .map_err(|_| CommandError::TooManyCommands)?;
        }
        if !commands.is_empty() {
            return Ok(commands);
        }

        let waypoint = parse_coordinates(line).ok_or_else(|| invalid(line))?;
        // Capacity is at least one.
        let _ = commands.push(Command::MoveTo(waypoint));
        Ok(commands)
    }
}

fn parse_coordinates(line: &str) -> Option<Waypoint> {
    let mut fields = line.split(',').map(|f| f.trim().parse::<f32>());
    let x = fields.next()?.ok()?;
    let y = fields.next()?.ok()?;
    let z = fields.next()?.ok()?;
    if fields.next().is_some() || ![x, y, z].iter().all(|v| v.is_finite()) {
        return None;
    }
    Some(Waypoint::new(x, y, z))
}

fn invalid(line: &str) -> CommandError {
    let mut text = String::new();
    for c in line.chars() {
        if text.push(c).is_err() {
            break;
        }
    }
    CommandError::InvalidCoordinates(text)
}
