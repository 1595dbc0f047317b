//! The `balance` subcommand: topography in, distribution out.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::Args;
use log::{info, warn};

use popbalance_core::io::{distribution, topography};
use popbalance_core::prelude::*;
use popbalance_core::stats;

/// Arguments of `popbalance balance`.
#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// Topography file with the deepest ocean level of every grid point.
    pub topography: PathBuf,

    /// Dimensions of the topography grid.
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], required = true)]
    pub grid: Vec<i32>,

    /// Dimensions of one block in grid points.
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = vec![1, 1])]
    pub blocksize: Vec<i32>,

    /// Number of clusters.
    #[arg(long, default_value_t = 1)]
    pub clusters: i32,

    /// Number of nodes in each cluster.
    #[arg(long)]
    pub nodes: i32,

    /// Number of cores in each node.
    #[arg(long)]
    pub cores: i32,

    /// Split method: simple, roughlyrect, or search.
    #[arg(long, default_value = "search", value_parser = SplitMethod::from_str)]
    pub method: SplitMethod,

    /// Communication objective minimized by the search method: sum or max.
    #[arg(long, default_value = "sum", value_parser = CommObjective::from_str)]
    pub objective: CommObjective,

    /// Boundary policy along the X axis: closed or cyclic.
    #[arg(long = "wrap-x", default_value = "cyclic", value_parser = BoundaryX::from_str)]
    pub wrap_x: BoundaryX,

    /// Boundary policy along the Y axis: closed, cyclic, or tripole.
    #[arg(long = "wrap-y", default_value = "tripole", value_parser = BoundaryY::from_str)]
    pub wrap_y: BoundaryY,

    /// Print statistics for this layer (CLUSTERS, NODES, CORES, or ALL).
    #[arg(long)]
    pub statistics: Option<String>,

    /// Write the distribution to this file.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: BalanceArgs) -> Result<()> {
    if args.statistics.is_none() && args.output.is_none() {
        warn!("neither --statistics nor --output given, the result will be discarded");
    }

    // --objective only matters for the searching method.
    let method = match args.method {
        SplitMethod::Search(_) => SplitMethod::Search(args.objective),
        other => other,
    };

    let topography = topography::read(&args.topography, args.grid[0], args.grid[1])?;
    let model = Neighbours::new(
        &topography,
        args.blocksize[0],
        args.blocksize[1],
        args.wrap_x,
        args.wrap_y,
    )?;
    let grid = Grid::new(&model);
    info!(
        "balancing {} active of {}x{} blocks over {} clusters of {} nodes of {} cores ({})",
        grid.active_blocks(),
        grid.width(),
        grid.height(),
        args.clusters,
        args.nodes,
        args.cores,
        method
    );

    let balance = LoadBalancer::new(&grid, args.clusters, args.nodes, args.cores, method)?.run()?;

    if let Some(layer) = &args.statistics {
        stats::print_statistics(&balance.layers, layer, &mut std::io::stdout())?;
    }
    if let Some(path) = &args.output {
        distribution::write(path, &balance.distribution)?;
        info!("wrote distribution to {}", path.display());
    }
    Ok(())
}
