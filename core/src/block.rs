//! Blocks, the unit of work distribution.

use std::fmt;

use crate::coordinate::Coordinate;
use crate::neighbours::{Direction, Neighbours};

/// 1-based identity of a block, stable across relocation.
///
/// Ids number the grid in scan order: the block at `(x, y)` of a grid
/// `w` blocks wide has id `y*w + x + 1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(u32);

impl BlockId {
    /// Id of the block at `c` in a grid `grid_width` blocks wide.
    pub fn from_coordinate(c: Coordinate, grid_width: i32) -> Self {
        Self((c.y * grid_width + c.x) as u32 + 1)
    }

    /// The raw 1-based id.
    pub fn get(self) -> u32 {
        self.0
    }

    /// 0-based position in id-indexed arrays.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed-size rectangular tile of the model domain.
///
/// A block's identity, ocean flag, and per-direction neighbor and message
/// tables are computed at construction and never change. Relocating a block
/// produces a new value with the same identity and tables at a different
/// coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: Option<BlockId>,
    coordinate: Coordinate,
    ocean: bool,
    neighbours: [Option<BlockId>; 8],
    messages: [u32; 8],
}

impl Block {
    /// Builds the block at `c`, reading adjacency and halo volumes from the
    /// neighbor model.
    pub fn new(c: Coordinate, model: &Neighbours<'_>) -> Self {
        let ocean = model.is_ocean(c.x, c.y);
        let mut neighbours = [None; 8];
        let mut messages = [0; 8];
        for &dir in &Direction::ALL {
            neighbours[dir.index()] = model.neighbour(c, dir);
            if ocean {
                messages[dir.index()] = model.message_size(c, dir);
            }
        }
        Self {
            id: Some(BlockId::from_coordinate(c, model.grid_width())),
            coordinate: c,
            ocean,
            neighbours,
            messages,
        }
    }

    /// Synthetic land block with no identity, used to fill empty grid
    /// slots.
    pub fn land(c: Coordinate) -> Self {
        Self {
            id: None,
            coordinate: c,
            ocean: false,
            neighbours: [None; 8],
            messages: [0; 8],
        }
    }

    /// The block's identity, or `None` for synthetic land fill.
    pub fn id(&self) -> Option<BlockId> {
        self.id
    }

    /// Where the block currently sits.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Whether the block covers at least one ocean point.
    pub fn is_ocean(&self) -> bool {
        self.ocean
    }

    /// Identity of the adjacent block in direction `dir`, if one exists.
    pub fn neighbour(&self, dir: Direction) -> Option<BlockId> {
        self.neighbours[dir.index()]
    }

    /// Halo volume exchanged toward `dir`, in grid points per level.
    pub fn message_size(&self, dir: Direction) -> u32 {
        self.messages[dir.index()]
    }

    /// The same block at a new coordinate.
    pub(crate) fn relocated(&self, c: Coordinate) -> Self {
        Self {
            coordinate: c,
            ..self.clone()
        }
    }
}
