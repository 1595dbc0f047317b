//! One module per subcommand.

pub mod balance;
pub mod block_size;
pub mod convert;
pub mod stats;
pub mod test_topo;
