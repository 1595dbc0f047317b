//! Hierarchical balancing of a grid over clusters, nodes, and cores.

use itertools::{Itertools, MinMaxResult};
use log::{debug, info};

use crate::distribution::Distribution;
use crate::error::{BalanceError, BalanceResult};
use crate::grid::Grid;
use crate::layer::{Layer, Layers};
use crate::set::Set;
use crate::split::SplitMethod;

/// Result of one balancing run.
#[derive(Debug, Clone)]
pub struct Balance {
    /// The block-to-core assignment.
    pub distribution: Distribution,
    /// Every granularity of the partition, for reporting.
    pub layers: Layers,
}

/// Splits the active blocks of a grid over a cluster/node/core hierarchy.
///
/// The same split method is applied at every level: first the full ocean
/// set over clusters, then each cluster over its nodes, then each node
/// over its cores.
#[derive(Debug)]
pub struct LoadBalancer<'g> {
    grid: &'g Grid,
    clusters: i32,
    nodes_per_cluster: i32,
    cores_per_node: i32,
    method: SplitMethod,
}

impl<'g> LoadBalancer<'g> {
    /// Prepares a balancer for the given hardware hierarchy.
    ///
    /// All three counts must be at least one.
    pub fn new(
        grid: &'g Grid,
        clusters: i32,
        nodes_per_cluster: i32,
        cores_per_node: i32,
        method: SplitMethod,
    ) -> BalanceResult<Self> {
        for &(name, value) in &[
            ("cluster", clusters),
            ("node", nodes_per_cluster),
            ("core", cores_per_node),
        ] {
            if value < 1 {
                return Err(BalanceError::InvalidCount { name, value });
            }
        }
        Ok(Self {
            grid,
            clusters,
            nodes_per_cluster,
            cores_per_node,
            method,
        })
    }

    /// Runs the split hierarchy and assembles the distribution plus its
    /// reporting layers.
    pub fn run(&self) -> BalanceResult<Balance> {
        let total_cores = self.clusters * self.nodes_per_cluster * self.cores_per_node;
        let ocean: Vec<_> = self
            .grid
            .blocks()
            .filter(|b| b.is_ocean())
            .cloned()
            .collect();
        info!(
            "balancing {} active blocks over {} clusters, {} nodes, {} cores using {}",
            ocean.len(),
            self.clusters,
            self.clusters * self.nodes_per_cluster,
            total_cores,
            self.method,
        );
        let all = Set::new(ocean);

        let mut clusters_layer = Layer::new(Layers::CLUSTERS);
        let mut nodes_layer = Layer::new(Layers::NODES);
        let mut cores_layer = Layer::new(Layers::CORES);
        let mut core_sets: Vec<Set> = Vec::with_capacity(total_cores as usize);

        for mut cluster in self.method.split(&all, self.clusters as usize)? {
            for mut node in self.method.split(&cluster, self.nodes_per_cluster as usize)? {
                for core in self.method.split(&node, self.cores_per_node as usize)? {
                    node.add_subset(core.clone());
                    core_sets.push(core.clone());
                    cores_layer.add(core);
                }
                cluster.add_subset(node.clone());
                nodes_layer.add(node);
            }
            clusters_layer.add(cluster);
        }

        let (min_blocks, max_blocks) = match core_sets.iter().map(Set::len).minmax() {
            MinMaxResult::NoElements => (0, 0),
            MinMaxResult::OneElement(n) => (n, n),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        debug!("blocks per core range {}..={}", min_blocks, max_blocks);

        let mut tags: Vec<Option<usize>> =
            vec![None; (self.grid.width() * self.grid.height()) as usize];
        for (core, set) in core_sets.iter().enumerate() {
            for block in set.blocks() {
                if let Some(id) = block.id() {
                    tags[id.index()] = Some(core);
                }
            }
        }

        let mut owners = Vec::with_capacity(tags.len());
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let block = match self.grid.get(x, y) {
                    Some(b) => b,
                    None => panic!("grid slot ({}, {}) is empty", x, y),
                };
                if !block.is_ocean() {
                    owners.push(0);
                    continue;
                }
                match block.id().and_then(|id| tags[id.index()]) {
                    Some(core) => owners.push(core as i32 + 1),
                    None => panic!("active block at ({}, {}) was never assigned a core", x, y),
                }
            }
        }

        let distribution = Distribution {
            topography_width: self.grid.width() * self.grid.block_width(),
            topography_height: self.grid.height() * self.grid.block_height(),
            block_width: self.grid.block_width(),
            block_height: self.grid.block_height(),
            clusters: self.clusters,
            nodes_per_cluster: self.nodes_per_cluster,
            cores_per_node: self.cores_per_node,
            min_blocks_per_core: min_blocks as i32,
            max_blocks_per_core: max_blocks as i32,
            owners,
        };
        distribution.validate()?;

        let mut blocks_layer = Layer::new(Layers::BLOCKS);
        for block in all.blocks() {
            blocks_layer.add(Set::singleton(block.clone()));
        }
        let mut all_layer = Layer::new(Layers::ALL);
        all_layer.add(all);

        let mut layers = Layers::new();
        layers.add(clusters_layer);
        layers.add(nodes_layer);
        layers.add(cores_layer);
        layers.add(blocks_layer);
        layers.add(all_layer);

        Ok(Balance {
            distribution,
            layers,
        })
    }
}
