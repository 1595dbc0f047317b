//! The `block-size` subcommand: scan every block size that tiles a
//! topography and score it by the work the padded blocks would cost.
//!
//! Small blocks discard more land, but every block also computes its
//! `HALO_WIDTH`-wide ghost border, so the total favours a middle ground.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use popbalance_core::io::topography;
use popbalance_core::prelude::*;

/// Arguments of `popbalance block-size`.
#[derive(Args, Debug)]
pub struct BlockSizeArgs {
    /// Topography file to scan.
    pub topography: PathBuf,

    /// Dimensions of the topography grid.
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], required = true)]
    pub grid: Vec<i32>,
}

pub fn run(args: BlockSizeArgs) -> Result<()> {
    let topography = topography::read(&args.topography, args.grid[0], args.grid[1])?;

    let widths = divisors(topography.width());
    let heights = divisors(topography.height());
    println!("Possible block widths: {:?}", widths);
    println!("Possible block heights: {:?}", heights);

    let mut costs = Vec::with_capacity(widths.len() * heights.len());
    for &w in &widths {
        for &h in &heights {
            costs.push((w, h, cost(&topography, w, h)));
        }
    }

    // Ties keep the earliest, largest-block candidate.
    let (mut best_width, mut best_height, mut best_cost) = (0, 0, i64::MAX);
    for &(w, h, c) in &costs {
        if c < best_cost {
            best_width = w;
            best_height = h;
            best_cost = c;
        }
    }
    println!(
        "Best block size {}x{} => {} halo-padded points",
        best_width, best_height, best_cost
    );

    // Thresholds at half-percent steps over the best cost.
    let limits: Vec<i64> = (1..=5)
        .map(|i| (best_cost as f64 * (1.0 + 0.005 * i as f64)) as i64)
        .collect();
    println!("Solutions within 2.5% of the best:");
    for &(w, h, c) in &costs {
        if let Some(band) = limits.iter().position(|&limit| c < limit) {
            println!(
                "  [{:.1}%] {}x{} blocks of {} points => {}",
                0.5 * (band + 1) as f64,
                w,
                h,
                w * h,
                c
            );
        }
    }
    Ok(())
}

/// All divisors of `value`, largest first.
fn divisors(value: i32) -> Vec<i32> {
    (1..=value)
        .filter(|i| value % i == 0)
        .map(|i| value / i)
        .collect()
}

/// Total padded points of the active blocks at one block size.
fn cost(topography: &Topography, block_width: i32, block_height: i32) -> i64 {
    let padded =
        (block_width + 2 * HALO_WIDTH) as i64 * (block_height + 2 * HALO_WIDTH) as i64;
    active_blocks(topography, block_width, block_height) * padded
}

/// Number of blocks holding at least one ocean point.
fn active_blocks(topography: &Topography, block_width: i32, block_height: i32) -> i64 {
    let mut active = 0;
    for y in 0..topography.height() / block_height {
        for x in 0..topography.width() / block_width {
            let work = topography.rectangle_work(
                x * block_width,
                y * block_height,
                block_width,
                block_height,
            );
            if work > 0 {
                active += 1;
            }
        }
    }
    active
}
