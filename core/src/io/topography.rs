//! Reading and writing topography files.
//!
//! A topography file stores the depth of every grid point as a big-endian
//! `i32`, row by row from `y = 0` upward. The file carries no dimensions of
//! its own, so the caller must supply the expected width and height.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::{file_error, read_i32, write_i32};
use crate::error::{BalanceError, BalanceResult};
use crate::topography::Topography;

/// Reads a topography of the given dimensions from a binary file.
pub fn read<P: AsRef<Path>>(path: P, width: i32, height: i32) -> BalanceResult<Topography> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| file_error(path, source))?;
    read_from(&mut BufReader::new(file), width, height)
}

/// Reads a topography of the given dimensions from a binary stream.
pub fn read_from<R: Read>(reader: &mut R, width: i32, height: i32) -> BalanceResult<Topography> {
    if width <= 0 || height <= 0 {
        return Err(BalanceError::InvalidDimensions { width, height });
    }
    let mut data = Vec::with_capacity((width * height) as usize);
    for _ in 0..height {
        for _ in 0..width {
            data.push(read_i32(reader)?);
        }
    }
    Topography::new(width, height, data)
}

/// Writes a topography to a binary file.
pub fn write<P: AsRef<Path>>(path: P, topography: &Topography) -> BalanceResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| file_error(path, source))?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, topography)?;
    writer.flush().map_err(|source| file_error(path, source))
}

/// Writes a topography to a binary stream.
pub fn write_to<W: Write>(writer: &mut W, topography: &Topography) -> BalanceResult<()> {
    for y in 0..topography.height() {
        for x in 0..topography.width() {
            write_i32(writer, topography.get(x, y))?;
        }
    }
    Ok(())
}
