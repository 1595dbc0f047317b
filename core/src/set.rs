//! Sets of blocks and their halo communication.

use std::cell::OnceCell;
use std::collections::HashSet;

use crate::block::{Block, BlockId};
use crate::coordinate::Coordinate;
use crate::neighbours::Direction;

/// External-neighbor summary of a set, computed once on first use.
#[derive(Debug, Clone)]
struct Halo {
    neighbours: Vec<BlockId>,
    communication: u64,
}

/// An ordered collection of distinct blocks.
///
/// Blocks are kept sorted in scan order, with a cached bounding box. The
/// set of external neighbor ids and the total communication across the
/// set's edge are computed lazily and cached. A set may carry child sets,
/// recording how it was subdivided; the children play no part in any
/// computation on the parent.
#[derive(Debug, Clone)]
pub struct Set {
    blocks: Vec<Block>,
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
    subsets: Vec<Set>,
    halo: OnceCell<Halo>,
}

impl Set {
    /// Builds a set from the given blocks, sorted and deduplicated by
    /// coordinate.
    pub fn new(mut blocks: Vec<Block>) -> Self {
        blocks.sort_by_key(Block::coordinate);
        blocks.dedup_by_key(|b| b.coordinate());

        let mut min_x = 0;
        let mut max_x = 0;
        let mut min_y = 0;
        let mut max_y = 0;
        if let Some(first) = blocks.first() {
            min_x = first.coordinate().x;
            max_x = min_x;
            min_y = first.coordinate().y;
            max_y = min_y;
            for b in &blocks {
                let c = b.coordinate();
                min_x = min_x.min(c.x);
                max_x = max_x.max(c.x);
                min_y = min_y.min(c.y);
                max_y = max_y.max(c.y);
            }
        }

        Self {
            blocks,
            min_x,
            max_x,
            min_y,
            max_y,
            subsets: Vec::new(),
            halo: OnceCell::new(),
        }
    }

    /// A set holding a single block.
    pub fn singleton(block: Block) -> Self {
        Self::new(vec![block])
    }

    /// Number of blocks in the set.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the set holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Westernmost block column.
    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    /// Easternmost block column.
    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    /// Southernmost block row.
    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Northernmost block row.
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Bounding-box width in blocks. Meaningful only for non-empty sets.
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    /// Bounding-box height in blocks. Meaningful only for non-empty sets.
    pub fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }

    /// The blocks, in scan order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The block at `(x, y)`, if the set contains one.
    pub fn get(&self, x: i32, y: i32) -> Option<&Block> {
        if x < self.min_x || x > self.max_x || y < self.min_y || y > self.max_y {
            return None;
        }
        let c = Coordinate::new(x, y);
        self.blocks
            .binary_search_by(|b| b.coordinate().cmp(&c))
            .ok()
            .map(|i| &self.blocks[i])
    }

    /// Whether the set contains a block at `(x, y)`.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some()
    }

    /// Whether the set contains the block with identity `id`.
    pub fn contains_id(&self, id: BlockId) -> bool {
        self.blocks.iter().any(|b| b.id() == Some(id))
    }

    /// Records that `subset` was carved out of this set.
    pub fn add_subset(&mut self, subset: Set) {
        self.subsets.push(subset);
    }

    /// The recorded subdivisions of this set.
    pub fn subsets(&self) -> &[Set] {
        &self.subsets
    }

    /// Ids of all blocks outside the set that some block inside exchanges
    /// halo data with, in ascending order.
    pub fn neighbours(&self) -> &[BlockId] {
        &self.halo.get_or_init(|| self.compute_halo()).neighbours
    }

    /// Total halo volume crossing the set boundary, in grid points per
    /// level. Every edge crossing counts, even between the same pair of
    /// blocks in different directions.
    pub fn communication(&self) -> u64 {
        self.halo.get_or_init(|| self.compute_halo()).communication
    }

    /// Whether any of the eight coordinates around `block` falls outside
    /// the set.
    fn on_edge(&self, block: &Block) -> bool {
        let c = block.coordinate();
        Direction::ALL.iter().any(|dir| {
            let (dx, dy) = dir.offset();
            !self.contains(c.x + dx, c.y + dy)
        })
    }

    fn compute_halo(&self) -> Halo {
        let mut seen = HashSet::new();
        let mut communication = 0u64;
        for block in &self.blocks {
            if !self.on_edge(block) {
                continue;
            }
            for &dir in &Direction::ALL {
                if let Some(id) = block.neighbour(dir) {
                    if !self.contains_id(id) {
                        communication += u64::from(block.message_size(dir));
                        seen.insert(id);
                    }
                }
            }
        }
        let mut neighbours: Vec<BlockId> = seen.into_iter().collect();
        neighbours.sort();
        Halo {
            neighbours,
            communication,
        }
    }
}
