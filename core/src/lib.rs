//! Static work distribution for block-structured ocean models.
//!
//! An ocean topography is carved into fixed-size blocks, land-only blocks are
//! discarded, and the remaining work is divided over a cluster/node/core
//! hierarchy so that every core receives a similar amount of ocean while the
//! halo traffic between cores stays low. The result is a [`Distribution`]
//! record that can be written in the binary format the model reads back.
//!
//! [`Distribution`]: crate::distribution::Distribution

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

pub mod balance;
pub mod block;
pub mod boundary;
pub mod coordinate;
pub mod distribution;
pub mod error;
pub mod grid;
pub mod io;
pub mod layer;
pub mod neighbours;
pub mod set;
pub mod split;
pub mod stats;
pub mod topography;

/// Re-exports of the types needed for everyday use of the crate.
pub mod prelude {
    pub use crate::balance::{Balance, LoadBalancer};
    pub use crate::block::{Block, BlockId};
    pub use crate::boundary::{BoundaryX, BoundaryY};
    pub use crate::coordinate::Coordinate;
    pub use crate::distribution::Distribution;
    pub use crate::error::{BalanceError, BalanceResult};
    pub use crate::grid::Grid;
    pub use crate::layer::{Layer, Layers};
    pub use crate::neighbours::{Direction, Neighbours, HALO_WIDTH};
    pub use crate::set::Set;
    pub use crate::split::{CommObjective, SplitMethod};
    pub use crate::topography::Topography;
}

#[cfg(test)]
mod tests;
