//! The `to-text` and `from-text` subcommands.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use log::info;

use popbalance_core::io::distribution;

/// Arguments of `popbalance to-text`.
#[derive(Args, Debug)]
pub struct ToTextArgs {
    /// Binary distribution file to convert.
    pub distribution: PathBuf,
}

pub fn to_text(args: ToTextArgs) -> Result<()> {
    let read = distribution::read(&args.distribution)?;
    distribution::write_text_to(&mut std::io::stdout(), &read)?;
    Ok(())
}

/// Arguments of `popbalance from-text`.
#[derive(Args, Debug)]
pub struct FromTextArgs {
    /// Text file with one header value or owner per line.
    pub text: PathBuf,

    /// Binary distribution file to write.
    pub output: PathBuf,
}

pub fn from_text(args: FromTextArgs) -> Result<()> {
    let read = distribution::read_text(&args.text)?;
    distribution::write(&args.output, &read)?;
    info!(
        "wrote {} block owners to {}",
        read.total_blocks(),
        args.output.display()
    );
    Ok(())
}
