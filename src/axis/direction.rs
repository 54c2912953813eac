/// Direction of axis motion.
///
/// Positive moves away from the home sensor, negative toward it. Which
/// logic level that is on the DIR line depends on the axis' default polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Away from home (DIR at the default level).
    Positive,
    /// Toward home (DIR at the inverse of the default level).
    Negative,
}

impl Direction {
    /// Get direction from a signed step delta.
    #[inline]
    pub fn from_delta(delta: i64) -> Self {
        if delta >= 0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }

    /// Get the opposite direction.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }

    /// DIR line level for this direction given the default level.
    #[inline]
    pub fn level(self, default_high: bool) -> bool {
        match self {
            Direction::Positive => default_high,
            Direction::Negative => !default_high,
        }
    }
}
