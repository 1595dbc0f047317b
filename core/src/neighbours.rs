//! Neighbor resolution across grid boundaries.
//!
//! The model answers two questions for any block coordinate and compass
//! direction: which block (if any) sits on the other side, and how much halo
//! data crosses that edge per exchange. Both are purely geometric and depend
//! only on the topography, the block size, and the boundary policies, so
//! they can be answered before any grid is built.

use std::fmt;

use crate::block::BlockId;
use crate::boundary::{BoundaryX, BoundaryY};
use crate::coordinate::Coordinate;
use crate::error::{BalanceError, BalanceResult};
use crate::topography::Topography;

/// Width of the halo region exchanged between adjacent blocks, in grid
/// points.
pub const HALO_WIDTH: i32 = 2;

/// The eight compass directions from a block to its adjacent blocks.
///
/// North is `+y`, east is `+x`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `( 0, +1)`
    North,
    /// `(+1, +1)`
    NorthEast,
    /// `(+1,  0)`
    East,
    /// `(+1, -1)`
    SouthEast,
    /// `( 0, -1)`
    South,
    /// `(-1, -1)`
    SouthWest,
    /// `(-1,  0)`
    West,
    /// `(-1, +1)`
    NorthWest,
}

impl Direction {
    /// All eight directions, in per-block table order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Offset to the adjacent coordinate.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    /// Position of this direction in per-block tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing back at the source.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// Lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::NorthEast => "north-east",
            Direction::East => "east",
            Direction::SouthEast => "south-east",
            Direction::South => "south",
            Direction::SouthWest => "south-west",
            Direction::West => "west",
            Direction::NorthWest => "north-west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolves block adjacency and halo message sizes over a topography.
///
/// A resolved neighbor may be a land block; it still has an identity, but
/// all communication toward it is zero. An unresolved neighbor (closed
/// boundary) has neither.
#[derive(Debug, Copy, Clone)]
pub struct Neighbours<'t> {
    topography: &'t Topography,
    block_width: i32,
    block_height: i32,
    grid_width: i32,
    grid_height: i32,
    boundary_x: BoundaryX,
    boundary_y: BoundaryY,
    message_east_west: u32,
    message_north_south: u32,
    message_corner: u32,
    message_tripole: u32,
}

impl<'t> Neighbours<'t> {
    /// Builds a neighbor model for blocks of `block_width`x`block_height`
    /// points over `topography`.
    ///
    /// The block size must evenly divide the topography.
    pub fn new(
        topography: &'t Topography,
        block_width: i32,
        block_height: i32,
        boundary_x: BoundaryX,
        boundary_y: BoundaryY,
    ) -> BalanceResult<Self> {
        if block_width <= 0 || block_height <= 0 {
            return Err(BalanceError::InvalidDimensions {
                width: block_width,
                height: block_height,
            });
        }
        if topography.width() % block_width != 0 || topography.height() % block_height != 0 {
            return Err(BalanceError::BlockSizeMismatch {
                topography_width: topography.width(),
                topography_height: topography.height(),
                block_width,
                block_height,
            });
        }

        Ok(Self {
            topography,
            block_width,
            block_height,
            grid_width: topography.width() / block_width,
            grid_height: topography.height() / block_height,
            boundary_x,
            boundary_y,
            message_east_west: (block_height * HALO_WIDTH) as u32,
            message_north_south: (block_width * HALO_WIDTH) as u32,
            message_corner: (HALO_WIDTH * HALO_WIDTH) as u32,
            message_tripole: (block_width * (HALO_WIDTH + 1)) as u32,
        })
    }

    /// Grid width in blocks.
    pub fn grid_width(&self) -> i32 {
        self.grid_width
    }

    /// Grid height in blocks.
    pub fn grid_height(&self) -> i32 {
        self.grid_height
    }

    /// Block width in grid points.
    pub fn block_width(&self) -> i32 {
        self.block_width
    }

    /// Block height in grid points.
    pub fn block_height(&self) -> i32 {
        self.block_height
    }

    /// Boundary policy on the x axis.
    pub fn boundary_x(&self) -> BoundaryX {
        self.boundary_x
    }

    /// Boundary policy on the y axis.
    pub fn boundary_y(&self) -> BoundaryY {
        self.boundary_y
    }

    /// Whether the block at `(x, y)` covers at least one ocean point.
    pub fn is_ocean(&self, x: i32, y: i32) -> bool {
        self.topography.rectangle_work(
            x * self.block_width,
            y * self.block_height,
            self.block_width,
            self.block_height,
        ) > 0
    }

    /// Identity of the block adjacent to `c` in direction `dir`, or `None`
    /// at a closed boundary.
    ///
    /// Land blocks are resolved like any other; absence only means the
    /// boundary ends there.
    pub fn neighbour(&self, c: Coordinate, dir: Direction) -> Option<BlockId> {
        let (n, _) = self.resolve(c, dir)?;
        Some(BlockId::from_coordinate(n, self.grid_width))
    }

    /// Halo volume exchanged from the ocean block at `c` toward `dir`, in
    /// grid points per level.
    ///
    /// Zero if no neighbor exists there or the neighbor is land. Crossing
    /// the tripole fold costs `block_width * (HALO_WIDTH + 1)` regardless
    /// of direction.
    pub fn message_size(&self, c: Coordinate, dir: Direction) -> u32 {
        let (n, folded) = match self.resolve(c, dir) {
            Some(r) => r,
            None => return 0,
        };
        if !self.is_ocean(n.x, n.y) {
            return 0;
        }
        if folded {
            return self.message_tripole;
        }
        match dir {
            Direction::North | Direction::South => self.message_north_south,
            Direction::East | Direction::West => self.message_east_west,
            _ => self.message_corner,
        }
    }

    /// Applies the boundary policies to the raw offset coordinate.
    ///
    /// Returns the resolved coordinate and whether the tripole fold was
    /// crossed. The x axis is handled first, so a closed east/west edge
    /// suppresses a diagonal even when the fold could have resolved it.
    fn resolve(&self, c: Coordinate, dir: Direction) -> Option<(Coordinate, bool)> {
        let (dx, dy) = dir.offset();
        let mut x = c.x + dx;
        let mut y = c.y + dy;

        if x < 0 {
            match self.boundary_x {
                BoundaryX::Closed => return None,
                BoundaryX::Cyclic => x = self.grid_width - 1,
            }
        } else if x >= self.grid_width {
            match self.boundary_x {
                BoundaryX::Closed => return None,
                BoundaryX::Cyclic => x = 0,
            }
        }

        if y < 0 {
            match self.boundary_y {
                BoundaryY::Closed | BoundaryY::Tripole => return None,
                BoundaryY::Cyclic => y = self.grid_height - 1,
            }
        } else if y >= self.grid_height {
            match self.boundary_y {
                BoundaryY::Closed => return None,
                BoundaryY::Cyclic => y = 0,
                BoundaryY::Tripole => {
                    return Some((Coordinate::new(self.fold_x(dir, c.x), c.y), true));
                }
            }
        }

        Some((Coordinate::new(x, y), false))
    }

    /// Mirrored x coordinate across the tripole fold, with the per-diagonal
    /// column correction.
    fn fold_x(&self, dir: Direction, x: i32) -> i32 {
        match dir {
            Direction::North => self.grid_width - x - 1,
            Direction::NorthEast => {
                let folded = self.grid_width - x - 2;
                if folded < 0 {
                    self.grid_width - 1
                } else {
                    folded
                }
            }
            Direction::NorthWest => {
                let folded = self.grid_width - x;
                if folded >= self.grid_width {
                    0
                } else {
                    folded
                }
            }
            _ => unreachable!("only northward offsets can cross the fold"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_water(width: i32, height: i32) -> Topography {
        Topography::new(width, height, vec![1; (width * height) as usize]).unwrap()
    }

    fn id_at(x: i32, y: i32, grid_width: i32) -> BlockId {
        BlockId::from_coordinate(Coordinate::new(x, y), grid_width)
    }

    #[test]
    fn test_interior_neighbours() {
        let topo = open_water(6, 4);
        let n = Neighbours::new(&topo, 1, 1, BoundaryX::Closed, BoundaryY::Closed).unwrap();
        let c = Coordinate::new(2, 1);
        assert_eq!(n.neighbour(c, Direction::North), Some(id_at(2, 2, 6)));
        assert_eq!(n.neighbour(c, Direction::SouthWest), Some(id_at(1, 0, 6)));
        assert_eq!(n.neighbour(c, Direction::East), Some(id_at(3, 1, 6)));
    }

    #[test]
    fn test_closed_edges() {
        let topo = open_water(6, 4);
        let n = Neighbours::new(&topo, 1, 1, BoundaryX::Closed, BoundaryY::Closed).unwrap();
        assert_eq!(n.neighbour(Coordinate::new(0, 0), Direction::West), None);
        assert_eq!(n.neighbour(Coordinate::new(0, 0), Direction::South), None);
        assert_eq!(n.neighbour(Coordinate::new(5, 3), Direction::East), None);
        assert_eq!(n.neighbour(Coordinate::new(5, 3), Direction::North), None);
        assert_eq!(n.neighbour(Coordinate::new(5, 3), Direction::NorthEast), None);
        assert_eq!(n.message_size(Coordinate::new(0, 0), Direction::West), 0);
    }

    #[test]
    fn test_cyclic_wrap() {
        let topo = open_water(6, 4);
        let n = Neighbours::new(&topo, 1, 1, BoundaryX::Cyclic, BoundaryY::Cyclic).unwrap();
        assert_eq!(
            n.neighbour(Coordinate::new(0, 1), Direction::West),
            Some(id_at(5, 1, 6)),
        );
        assert_eq!(
            n.neighbour(Coordinate::new(5, 1), Direction::East),
            Some(id_at(0, 1, 6)),
        );
        assert_eq!(
            n.neighbour(Coordinate::new(2, 3), Direction::North),
            Some(id_at(2, 0, 6)),
        );
        assert_eq!(
            n.neighbour(Coordinate::new(2, 0), Direction::South),
            Some(id_at(2, 3, 6)),
        );
        assert_eq!(
            n.neighbour(Coordinate::new(5, 3), Direction::NorthEast),
            Some(id_at(0, 0, 6)),
        );
    }

    #[test]
    fn test_tripole_fold() {
        let topo = open_water(6, 4);
        let n = Neighbours::new(&topo, 1, 1, BoundaryX::Cyclic, BoundaryY::Tripole).unwrap();

        // North from (x, top) lands at (width - x - 1, top).
        assert_eq!(
            n.neighbour(Coordinate::new(1, 3), Direction::North),
            Some(id_at(4, 3, 6)),
        );
        // The diagonals shift one column to either side of the mirror.
        assert_eq!(
            n.neighbour(Coordinate::new(1, 3), Direction::NorthEast),
            Some(id_at(3, 3, 6)),
        );
        assert_eq!(
            n.neighbour(Coordinate::new(1, 3), Direction::NorthWest),
            Some(id_at(5, 3, 6)),
        );
        // The corrections wrap at the ends of the row.
        assert_eq!(
            n.neighbour(Coordinate::new(5, 3), Direction::NorthEast),
            Some(id_at(5, 3, 6)),
        );
        assert_eq!(
            n.neighbour(Coordinate::new(0, 3), Direction::NorthWest),
            Some(id_at(0, 3, 6)),
        );
        // South of the bottom row stays closed under the tripole policy.
        assert_eq!(n.neighbour(Coordinate::new(2, 0), Direction::South), None);
        assert_eq!(n.neighbour(Coordinate::new(2, 0), Direction::SouthEast), None);
    }

    #[test]
    fn test_message_sizes() {
        let topo = open_water(12, 8);
        let n = Neighbours::new(&topo, 3, 2, BoundaryX::Cyclic, BoundaryY::Tripole).unwrap();
        let c = Coordinate::new(1, 1);
        assert_eq!(n.message_size(c, Direction::East), 2 * 2);
        assert_eq!(n.message_size(c, Direction::West), 2 * 2);
        assert_eq!(n.message_size(c, Direction::North), 3 * 2);
        assert_eq!(n.message_size(c, Direction::South), 3 * 2);
        assert_eq!(n.message_size(c, Direction::NorthEast), 4);
        assert_eq!(n.message_size(c, Direction::SouthWest), 4);

        // Crossing the fold costs the wider tripole transfer.
        let top = Coordinate::new(1, 3);
        assert_eq!(n.message_size(top, Direction::North), 3 * 3);
        assert_eq!(n.message_size(top, Direction::NorthEast), 3 * 3);
        assert_eq!(n.message_size(top, Direction::NorthWest), 3 * 3);
    }

    #[test]
    fn test_land_neighbour_keeps_id_but_not_traffic() {
        // 3x1 grid of 1x1 blocks with land in the middle.
        let topo = Topography::new(3, 1, vec![1, 0, 1]).unwrap();
        let n = Neighbours::new(&topo, 1, 1, BoundaryX::Closed, BoundaryY::Closed).unwrap();
        let c = Coordinate::new(0, 0);
        assert_eq!(n.neighbour(c, Direction::East), Some(id_at(1, 0, 3)));
        assert_eq!(n.message_size(c, Direction::East), 0);
        assert!(!n.is_ocean(1, 0));
    }

    #[test]
    fn test_closed_x_suppresses_folded_diagonal() {
        let topo = open_water(6, 4);
        let n = Neighbours::new(&topo, 1, 1, BoundaryX::Closed, BoundaryY::Tripole).unwrap();
        assert_eq!(n.neighbour(Coordinate::new(5, 3), Direction::NorthEast), None);
        assert_eq!(n.neighbour(Coordinate::new(0, 3), Direction::NorthWest), None);
        // The straight-north fold is still available.
        assert_eq!(
            n.neighbour(Coordinate::new(5, 3), Direction::North),
            Some(id_at(0, 3, 6)),
        );
    }

    #[test]
    fn test_rejects_indivisible_block_size() {
        let topo = open_water(6, 4);
        assert!(Neighbours::new(&topo, 4, 1, BoundaryX::Closed, BoundaryY::Closed).is_err());
        assert!(Neighbours::new(&topo, 1, 3, BoundaryX::Closed, BoundaryY::Closed).is_err());
        assert!(Neighbours::new(&topo, 0, 1, BoundaryX::Closed, BoundaryY::Closed).is_err());
    }
}
