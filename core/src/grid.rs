//! Dense block grid over the model domain.

use log::debug;

use crate::block::{Block, BlockId};
use crate::coordinate::Coordinate;
use crate::neighbours::Neighbours;

/// A dense array of blocks, addressable by coordinate and by id.
///
/// A freshly built grid holds one block per coordinate. The extra-rows
/// derivative used when folding a tripole grid starts with empty slots
/// above the original rows; `relocate` moves blocks into them and
/// `insert_land` fills whatever remains.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    block_width: i32,
    block_height: i32,
    slots: Vec<Option<Block>>,
    by_id: Vec<Option<usize>>,
    active: usize,
}

impl Grid {
    /// Subdivides the model's topography into one block per coordinate.
    pub fn new(model: &Neighbours<'_>) -> Self {
        let width = model.grid_width();
        let height = model.grid_height();
        let mut slots = Vec::with_capacity((width * height) as usize);
        let mut by_id = vec![None; (width * height) as usize];
        let mut active = 0;

        for y in 0..height {
            for x in 0..width {
                let block = Block::new(Coordinate::new(x, y), model);
                if block.is_ocean() {
                    active += 1;
                }
                if let Some(id) = block.id() {
                    by_id[id.index()] = Some(slots.len());
                }
                slots.push(Some(block));
            }
        }
        debug!(
            "grid {}x{} blocks of {}x{} points, {} active",
            width,
            height,
            model.block_width(),
            model.block_height(),
            active
        );

        Self {
            width,
            height,
            block_width: model.block_width(),
            block_height: model.block_height(),
            slots,
            by_id,
            active,
        }
    }

    /// A copy of this grid with `extra_rows` empty rows above the original
    /// ones. Blocks keep their ids and coordinates.
    pub fn with_extra_rows(&self, extra_rows: i32) -> Self {
        assert!(extra_rows >= 0, "cannot remove rows from a grid");
        let mut copy = self.clone();
        copy.height += extra_rows;
        copy.slots
            .extend(std::iter::repeat(None).take((extra_rows * self.width) as usize));
        copy
    }

    /// Grid width in blocks.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in blocks.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Block width in grid points.
    pub fn block_width(&self) -> i32 {
        self.block_width
    }

    /// Block height in grid points.
    pub fn block_height(&self) -> i32 {
        self.block_height
    }

    /// Number of ocean blocks.
    pub fn active_blocks(&self) -> usize {
        self.active
    }

    fn slot(&self, x: i32, y: i32) -> usize {
        assert!(
            x >= 0 && x < self.width && y >= 0 && y < self.height,
            "coordinate ({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height,
        );
        (y * self.width + x) as usize
    }

    /// The block at `(x, y)`, or `None` for an empty slot.
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<&Block> {
        self.slots[self.slot(x, y)].as_ref()
    }

    /// The block with identity `id`, wherever it currently sits.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        let slot = *self.by_id.get(id.index())?;
        self.slots[slot?].as_ref()
    }

    /// All blocks, in scan order of their current coordinates.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    /// Moves the block at `from` to the empty slot at `to`.
    ///
    /// Panics if `from` is empty or `to` is occupied.
    pub fn relocate(&mut self, from: Coordinate, to: Coordinate) {
        let from_slot = self.slot(from.x, from.y);
        let to_slot = self.slot(to.x, to.y);
        if self.slots[to_slot].is_some() {
            panic!("cannot relocate onto occupied slot {}", to);
        }
        let block = match self.slots[from_slot].take() {
            Some(b) => b,
            None => panic!("cannot relocate from empty slot {}", from),
        };
        let moved = block.relocated(to);
        if let Some(id) = moved.id() {
            self.by_id[id.index()] = Some(to_slot);
        }
        self.slots[to_slot] = Some(moved);
    }

    /// Fills every empty slot with a synthetic land block.
    pub fn insert_land(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let slot = (y * self.width + x) as usize;
                if self.slots[slot].is_none() {
                    self.slots[slot] = Some(Block::land(Coordinate::new(x, y)));
                }
            }
        }
    }
}
