//! Command line frontend for the block distribution tools.

use std::process;

use clap::{Parser, Subcommand};
use log::info;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "popbalance", version)]
#[command(about = "Balance the blocks of an ocean topography over clusters, nodes, and cores")]
struct Cli {
    /// Log debugging detail.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a block distribution for a topography.
    Balance(commands::balance::BalanceArgs),
    /// Convert a binary distribution file to text on stdout.
    ToText(commands::convert::ToTextArgs),
    /// Convert a text distribution file to the binary format.
    FromText(commands::convert::FromTextArgs),
    /// Report statistics for a stored distribution.
    Stats(commands::stats::StatsArgs),
    /// Write the builtin coastline test topography.
    TestTopo(commands::test_topo::TestTopoArgs),
    /// Report the block sizes that minimize halo-padded work.
    BlockSize(commands::block_size::BlockSizeArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    simple_logger::init_with_level(level).unwrap();
    info!("Starting popbalance v{} ...", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Command::Balance(args) => commands::balance::run(args),
        Command::ToText(args) => commands::convert::to_text(args),
        Command::FromText(args) => commands::convert::from_text(args),
        Command::Stats(args) => commands::stats::run(args),
        Command::TestTopo(args) => commands::test_topo::run(args),
        Command::BlockSize(args) => commands::block_size::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
