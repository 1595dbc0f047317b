//! Block coordinates.

use std::cmp::Ordering;
use std::fmt;

/// Location of a block within a grid, in block units.
///
/// Coordinates order by row first, so sorting yields bottom-to-top,
/// left-to-right scan order.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Column, counted from the western edge.
    pub x: i32,
    /// Row, counted from the southern edge.
    pub y: i32,
}

impl Coordinate {
    /// Returns the coordinate at `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this coordinate offset by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_order() {
        let mut v = vec![
            Coordinate::new(1, 1),
            Coordinate::new(0, 2),
            Coordinate::new(2, 0),
            Coordinate::new(0, 1),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                Coordinate::new(2, 0),
                Coordinate::new(0, 1),
                Coordinate::new(1, 1),
                Coordinate::new(0, 2),
            ],
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(Coordinate::new(3, 4).offset(-1, 2), Coordinate::new(2, 6));
    }
}
