//! Boundary policies for the grid edges.

use std::fmt;
use std::str::FromStr;

use crate::error::BalanceError;

/// Wrap policy for the east and west edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BoundaryX {
    /// No neighbors beyond the edge.
    Closed,
    /// The west edge wraps around to the east edge.
    Cyclic,
}

/// Wrap policy for the north and south edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BoundaryY {
    /// No neighbors beyond the edge.
    Closed,
    /// The south edge wraps around to the north edge.
    Cyclic,
    /// The north edge folds back onto itself, mirrored in x, as along the
    /// seam of a tripolar ocean grid. The south edge stays closed.
    Tripole,
}

impl BoundaryX {
    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Cyclic => "cyclic",
        }
    }
}

impl BoundaryY {
    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Cyclic => "cyclic",
            Self::Tripole => "tripole",
        }
    }
}

impl fmt::Display for BoundaryX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for BoundaryY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BoundaryX {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("closed") {
            Ok(Self::Closed)
        } else if s.eq_ignore_ascii_case("cyclic") {
            Ok(Self::Cyclic)
        } else {
            Err(BalanceError::UnknownBoundary(s.to_owned()))
        }
    }
}

impl FromStr for BoundaryY {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("closed") {
            Ok(Self::Closed)
        } else if s.eq_ignore_ascii_case("cyclic") {
            Ok(Self::Cyclic)
        } else if s.eq_ignore_ascii_case("tripole") {
            Ok(Self::Tripole)
        } else {
            Err(BalanceError::UnknownBoundary(s.to_owned()))
        }
    }
}
