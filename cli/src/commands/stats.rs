//! The `stats` subcommand: rebuild the layers of a stored distribution and
//! report on them.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::Args;

use popbalance_core::io::{distribution, topography};
use popbalance_core::prelude::*;
use popbalance_core::stats;

/// Arguments of `popbalance stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Distribution file to inspect.
    pub distribution: PathBuf,

    /// Topography file the distribution was computed from.
    pub topography: PathBuf,

    /// Layer to report: CLUSTERS, NODES, CORES, or ALL.
    #[arg(default_value = "all")]
    pub layer: String,

    /// Boundary policy along the X axis: closed or cyclic.
    #[arg(long = "wrap-x", default_value = "cyclic", value_parser = BoundaryX::from_str)]
    pub wrap_x: BoundaryX,

    /// Boundary policy along the Y axis: closed, cyclic, or tripole.
    #[arg(long = "wrap-y", default_value = "tripole", value_parser = BoundaryY::from_str)]
    pub wrap_y: BoundaryY,
}

pub fn run(args: StatsArgs) -> Result<()> {
    let read = distribution::read(&args.distribution)?;
    // The distribution header carries the raster and block dimensions.
    let topography = topography::read(
        &args.topography,
        read.topography_width,
        read.topography_height,
    )?;
    let model = Neighbours::new(
        &topography,
        read.block_width,
        read.block_height,
        args.wrap_x,
        args.wrap_y,
    )?;
    let grid = Grid::new(&model);
    let layers = read.to_layers(&grid)?;
    stats::print_statistics(&layers, &args.layer, &mut std::io::stdout())?;
    Ok(())
}
