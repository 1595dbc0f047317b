//! The `test-topo` subcommand: write the fixed coastline topography used
//! for experiments and tests.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use log::info;

use popbalance_core::io::topography;
use popbalance_core::prelude::*;

/// Land cells of the 12x10 pattern, `y = 0` at the bottom.
#[rustfmt::skip]
const LAND: &[(i32, i32)] = &[
    (0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (10, 0), (11, 0),
    (0, 1), (1, 1), (10, 1),
    (0, 2), (9, 2), (10, 2),
    (11, 7),
    (10, 8), (11, 8),
    (3, 9), (4, 9), (10, 9), (11, 9),
];

/// Arguments of `popbalance test-topo`.
#[derive(Args, Debug)]
pub struct TestTopoArgs {
    /// Topography file to write.
    pub output: PathBuf,

    /// Points per pattern cell.
    #[arg(long, default_value_t = 1)]
    pub scale: i32,
}

pub fn run(args: TestTopoArgs) -> Result<()> {
    anyhow::ensure!(args.scale >= 1, "scale must be at least 1");

    let (width, height) = (12 * args.scale, 10 * args.scale);
    let mut data = vec![1; (width * height) as usize];
    for &(cx, cy) in LAND {
        for y in cy * args.scale..(cy + 1) * args.scale {
            for x in cx * args.scale..(cx + 1) * args.scale {
                data[(y * width + x) as usize] = 0;
            }
        }
    }
    let pattern = Topography::new(width, height, data)?;
    topography::write(&args.output, &pattern)?;
    info!(
        "wrote {}x{} test topography to {}",
        width,
        height,
        args.output.display()
    );
    Ok(())
}
