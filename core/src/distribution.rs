//! The persisted block-to-core assignment.

use crate::block::Block;
use crate::error::{BalanceError, BalanceResult};
use crate::grid::Grid;
use crate::layer::{Layer, Layers};
use crate::set::Set;

/// A complete work distribution: the domain shape, the hardware hierarchy
/// it was balanced for, and one owner per grid block.
///
/// Owners are 1-based core numbers; `0` marks a block nobody owns (land).
/// A distribution assembled by hand should be passed through
/// [`Distribution::validate`] before use; everything read from a file is
/// validated on the way in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Topography width in grid points.
    pub topography_width: i32,
    /// Topography height in grid points.
    pub topography_height: i32,
    /// Block width in grid points.
    pub block_width: i32,
    /// Block height in grid points.
    pub block_height: i32,
    /// Number of clusters.
    pub clusters: i32,
    /// Nodes in each cluster.
    pub nodes_per_cluster: i32,
    /// Cores in each node.
    pub cores_per_node: i32,
    /// Fewest blocks owned by any core.
    pub min_blocks_per_core: i32,
    /// Most blocks owned by any core.
    pub max_blocks_per_core: i32,
    /// Owning core per block, in grid scan order.
    pub owners: Vec<i32>,
}

impl Distribution {
    /// Total number of cores in the hierarchy.
    pub fn total_cores(&self) -> i32 {
        self.clusters * self.nodes_per_cluster * self.cores_per_node
    }

    /// Total number of blocks covered.
    pub fn total_blocks(&self) -> usize {
        self.owners.len()
    }

    /// Owner of the `index`th block; `0` means unowned.
    ///
    /// Panics if `index` is out of range.
    pub fn owner(&self, index: usize) -> i32 {
        self.owners[index]
    }

    /// Checks every consistency rule of the distribution record.
    pub fn validate(&self) -> BalanceResult<()> {
        self.validate_header()?;
        self.validate_owners()
    }

    pub(crate) fn validate_header(&self) -> BalanceResult<()> {
        if self.topography_width <= 0 || self.topography_height <= 0 {
            return Err(BalanceError::InvalidDimensions {
                width: self.topography_width,
                height: self.topography_height,
            });
        }
        if self.block_width <= 0 || self.block_height <= 0 {
            return Err(BalanceError::InvalidDimensions {
                width: self.block_width,
                height: self.block_height,
            });
        }
        if self.topography_width % self.block_width != 0
            || self.topography_height % self.block_height != 0
        {
            return Err(BalanceError::BlockSizeMismatch {
                topography_width: self.topography_width,
                topography_height: self.topography_height,
                block_width: self.block_width,
                block_height: self.block_height,
            });
        }
        for &(name, value) in &[
            ("cluster", self.clusters),
            ("node", self.nodes_per_cluster),
            ("core", self.cores_per_node),
        ] {
            if value < 1 {
                return Err(BalanceError::InvalidCount { name, value });
            }
        }
        if self.min_blocks_per_core < 0 {
            return Err(BalanceError::InvalidCount {
                name: "min blocks per core",
                value: self.min_blocks_per_core,
            });
        }
        if self.max_blocks_per_core < self.min_blocks_per_core {
            return Err(BalanceError::MinMaxMismatch {
                min: self.min_blocks_per_core,
                max: self.max_blocks_per_core,
            });
        }
        Ok(())
    }

    pub(crate) fn validate_owners(&self) -> BalanceResult<()> {
        let expected = ((self.topography_width / self.block_width)
            * (self.topography_height / self.block_height)) as usize;
        if self.owners.len() != expected {
            return Err(BalanceError::BlockCountMismatch {
                expected,
                actual: self.owners.len(),
            });
        }
        let cores = self.total_cores();
        for (index, &owner) in self.owners.iter().enumerate() {
            if owner < 0 || owner > cores {
                return Err(BalanceError::InvalidOwner {
                    index,
                    owner,
                    cores,
                });
            }
        }
        Ok(())
    }

    /// Rebuilds the reporting layers of this distribution over `grid`.
    ///
    /// Cores come out in owner order; nodes and clusters group them in
    /// consecutive runs, with subsets recording the containment. A core
    /// that owns no blocks yields an empty set.
    ///
    /// Panics if the grid shape does not match the distribution.
    pub fn to_layers(&self, grid: &Grid) -> BalanceResult<Layers> {
        self.validate()?;

        let blocks_per_row = self.topography_width / self.block_width;
        let blocks_per_col = self.topography_height / self.block_height;
        if grid.width() != blocks_per_row
            || grid.height() != blocks_per_col
            || grid.block_width() != self.block_width
            || grid.block_height() != self.block_height
        {
            panic!(
                "grid of {}x{} blocks of {}x{} points does not match distribution",
                grid.width(),
                grid.height(),
                grid.block_width(),
                grid.block_height(),
            );
        }

        let mut per_core: Vec<Vec<Block>> = vec![Vec::new(); self.total_cores() as usize];
        let mut owned: Vec<Block> = Vec::new();
        let mut blocks_layer = Layer::new(Layers::BLOCKS);

        for (i, &owner) in self.owners.iter().enumerate() {
            if owner <= 0 {
                continue;
            }
            let x = (i as i32) % blocks_per_row;
            let y = (i as i32) / blocks_per_row;
            let block = match grid.get(x, y) {
                Some(b) => b.clone(),
                None => panic!("no block at ({}, {}) for owned slot {}", x, y, i),
            };
            per_core[(owner - 1) as usize].push(block.clone());
            blocks_layer.add(Set::singleton(block.clone()));
            owned.push(block);
        }

        let core_sets: Vec<Set> = per_core.into_iter().map(Set::new).collect();
        let mut cores_layer = Layer::new(Layers::CORES);
        for set in &core_sets {
            cores_layer.add(set.clone());
        }

        let mut nodes_layer = Layer::new(Layers::NODES);
        let mut node_sets: Vec<Set> = Vec::new();
        for chunk in core_sets.chunks(self.cores_per_node as usize) {
            let mut blocks = Vec::new();
            for set in chunk {
                blocks.extend(set.blocks().iter().cloned());
            }
            let mut node = Set::new(blocks);
            for set in chunk {
                node.add_subset(set.clone());
            }
            node_sets.push(node.clone());
            nodes_layer.add(node);
        }

        let mut clusters_layer = Layer::new(Layers::CLUSTERS);
        for chunk in node_sets.chunks(self.nodes_per_cluster as usize) {
            let mut blocks = Vec::new();
            for set in chunk {
                blocks.extend(set.blocks().iter().cloned());
            }
            let mut cluster = Set::new(blocks);
            for set in chunk {
                cluster.add_subset(set.clone());
            }
            clusters_layer.add(cluster);
        }

        let mut all_layer = Layer::new(Layers::ALL);
        all_layer.add(Set::new(owned));

        let mut layers = Layers::new();
        layers.add(clusters_layer);
        layers.add(nodes_layer);
        layers.add(cores_layer);
        layers.add(blocks_layer);
        layers.add(all_layer);
        Ok(layers)
    }
}
