//! Error type shared across the crate.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Result of a load-balancing operation.
pub type BalanceResult<T> = Result<T, BalanceError>;

/// Error produced while building, balancing, or serializing a distribution.
#[derive(Error, Debug)]
pub enum BalanceError {
    /// A width or height was zero or negative.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Offending width.
        width: i32,
        /// Offending height.
        height: i32,
    },

    /// A topography data vector did not match its declared dimensions.
    #[error("topography has {actual} values but {expected} were expected")]
    DataSizeMismatch {
        /// Number of values implied by the dimensions.
        expected: usize,
        /// Number of values actually supplied.
        actual: usize,
    },

    /// A block size that does not evenly divide the topography.
    #[error(
        "block size {block_width}x{block_height} does not divide topography \
         {topography_width}x{topography_height}"
    )]
    BlockSizeMismatch {
        /// Topography width in grid points.
        topography_width: i32,
        /// Topography height in grid points.
        topography_height: i32,
        /// Block width in grid points.
        block_width: i32,
        /// Block height in grid points.
        block_height: i32,
    },

    /// A set was asked to split into more subsets than it has blocks, or
    /// into zero subsets.
    #[error("cannot split {blocks} blocks into {subsets} subsets")]
    InvalidSubsetCount {
        /// Blocks available in the set.
        blocks: usize,
        /// Subsets requested.
        subsets: usize,
    },

    /// A cluster, node, or core count below one.
    #[error("illegal {name} count {value}")]
    InvalidCount {
        /// Which count was out of range.
        name: &'static str,
        /// The rejected value.
        value: i32,
    },

    /// A distribution whose maximum blocks per core is below its minimum.
    #[error("maximum blocks per core {max} is below minimum {min}")]
    MinMaxMismatch {
        /// Declared minimum.
        min: i32,
        /// Declared maximum.
        max: i32,
    },

    /// A distribution whose owner array does not cover the whole grid.
    #[error("distribution covers {actual} blocks but the grid has {expected}")]
    BlockCountMismatch {
        /// Blocks implied by the topography and block size.
        expected: usize,
        /// Blocks actually present.
        actual: usize,
    },

    /// A block owner outside `0..=total_cores`.
    #[error("block {index} is owned by core {owner}, but there are only {cores} cores")]
    InvalidOwner {
        /// Index of the block in the owner array.
        index: usize,
        /// The rejected owner value.
        owner: i32,
        /// Total number of cores in the distribution.
        cores: i32,
    },

    /// A layer name that is not present in a set of layers.
    #[error("unknown layer `{0}`")]
    UnknownLayer(String),

    /// An unrecognized split method name.
    #[error("unknown split method `{0}`")]
    UnknownSplitMethod(String),

    /// An unrecognized communication objective name.
    #[error("unknown communication objective `{0}`")]
    UnknownObjective(String),

    /// An unrecognized boundary policy name.
    #[error("unknown boundary policy `{0}`")]
    UnknownBoundary(String),

    /// A malformed line in a text-format distribution.
    #[error("malformed distribution text at line {line}")]
    MalformedText {
        /// One-based line number.
        line: usize,
        /// The underlying parse failure.
        #[source]
        source: ParseIntError,
    },

    /// An I/O failure while accessing a named file.
    #[error("failed to access {}", path.display())]
    File {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// An I/O failure on an anonymous stream.
    #[error(transparent)]
    Io(#[from] io::Error),
}
