//! File formats shared with the ocean model.
//!
//! Topographies and distributions are stored as flat sequences of big-endian
//! signed 32-bit integers, the layout the model itself consumes. The
//! [`distribution`] module additionally supports a plain-text rendition with
//! one value per line, which is easier to inspect and edit by hand.
//!
//! Every format comes in two flavours: path-based functions that open files
//! and attach the path to any failure, and stream-based functions that work
//! on any [`Read`](std::io::Read)/[`Write`](std::io::Write) implementation.

use std::io::{self, Read, Write};
use std::path::Path;

pub mod distribution;
pub mod topography;

use crate::error::BalanceError;

/// Reads a single big-endian `i32` from a stream.
pub(crate) fn read_i32<R: Read>(reader: &mut R) -> io::Result<i32> {
    let mut buf = [0_u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

/// Writes a single big-endian `i32` to a stream.
pub(crate) fn write_i32<W: Write>(writer: &mut W, value: i32) -> io::Result<()> {
    writer.write_all(&value.to_be_bytes())
}

/// Wraps an I/O failure with the path of the file involved.
pub(crate) fn file_error(path: &Path, source: io::Error) -> BalanceError {
    BalanceError::File {
        path: path.to_owned(),
        source,
    }
}
