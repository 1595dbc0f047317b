//! Reading and writing distribution files.
//!
//! The binary format is the one consumed by the ocean model itself: ten
//! big-endian `i32` header fields (topography width and height, block width
//! and height, clusters, nodes per cluster, cores per node, minimum and
//! maximum blocks per core, total block count) followed by one owner per
//! block in block index order. The text format carries exactly the same
//! values, one per line.
//!
//! Both readers validate the header before the owner array is read, and the
//! whole distribution before returning it.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Lines, Read, Write};
use std::path::Path;

use super::{file_error, read_i32, write_i32};
use crate::distribution::Distribution;
use crate::error::{BalanceError, BalanceResult};

/// Reads a distribution from a binary file.
pub fn read<P: AsRef<Path>>(path: P) -> BalanceResult<Distribution> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| file_error(path, source))?;
    read_from(&mut BufReader::new(file))
}

/// Reads a distribution from a binary stream.
pub fn read_from<R: Read>(reader: &mut R) -> BalanceResult<Distribution> {
    let mut distribution = Distribution {
        topography_width: read_i32(reader)?,
        topography_height: read_i32(reader)?,
        block_width: read_i32(reader)?,
        block_height: read_i32(reader)?,
        clusters: read_i32(reader)?,
        nodes_per_cluster: read_i32(reader)?,
        cores_per_node: read_i32(reader)?,
        min_blocks_per_core: read_i32(reader)?,
        max_blocks_per_core: read_i32(reader)?,
        owners: Vec::new(),
    };
    distribution.validate_header()?;
    check_declared_total(&distribution, read_i32(reader)?)?;

    distribution.owners = (0..distribution.total_blocks())
        .map(|_| read_i32(reader))
        .collect::<io::Result<_>>()?;
    distribution.validate_owners()?;
    Ok(distribution)
}

/// Writes a distribution to a binary file.
pub fn write<P: AsRef<Path>>(path: P, distribution: &Distribution) -> BalanceResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| file_error(path, source))?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, distribution)?;
    writer.flush().map_err(|source| file_error(path, source))
}

/// Writes a distribution to a binary stream.
pub fn write_to<W: Write>(writer: &mut W, distribution: &Distribution) -> BalanceResult<()> {
    distribution.validate()?;
    write_i32(writer, distribution.topography_width)?;
    write_i32(writer, distribution.topography_height)?;
    write_i32(writer, distribution.block_width)?;
    write_i32(writer, distribution.block_height)?;
    write_i32(writer, distribution.clusters)?;
    write_i32(writer, distribution.nodes_per_cluster)?;
    write_i32(writer, distribution.cores_per_node)?;
    write_i32(writer, distribution.min_blocks_per_core)?;
    write_i32(writer, distribution.max_blocks_per_core)?;
    write_i32(writer, distribution.total_blocks() as i32)?;
    for &owner in &distribution.owners {
        write_i32(writer, owner)?;
    }
    Ok(())
}

/// Reads a distribution from a text file.
pub fn read_text<P: AsRef<Path>>(path: P) -> BalanceResult<Distribution> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| file_error(path, source))?;
    read_text_from(BufReader::new(file))
}

/// Reads a distribution from a text stream with one value per line.
pub fn read_text_from<R: BufRead>(reader: R) -> BalanceResult<Distribution> {
    let mut lines = TextReader::new(reader);
    let mut distribution = Distribution {
        topography_width: lines.next_value()?,
        topography_height: lines.next_value()?,
        block_width: lines.next_value()?,
        block_height: lines.next_value()?,
        clusters: lines.next_value()?,
        nodes_per_cluster: lines.next_value()?,
        cores_per_node: lines.next_value()?,
        min_blocks_per_core: lines.next_value()?,
        max_blocks_per_core: lines.next_value()?,
        owners: Vec::new(),
    };
    distribution.validate_header()?;
    check_declared_total(&distribution, lines.next_value()?)?;

    distribution.owners = (0..distribution.total_blocks())
        .map(|_| lines.next_value())
        .collect::<BalanceResult<_>>()?;
    distribution.validate_owners()?;
    Ok(distribution)
}

/// Writes a distribution to a text file.
pub fn write_text<P: AsRef<Path>>(path: P, distribution: &Distribution) -> BalanceResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| file_error(path, source))?;
    let mut writer = BufWriter::new(file);
    write_text_to(&mut writer, distribution)?;
    writer.flush().map_err(|source| file_error(path, source))
}

/// Writes a distribution to a text stream with one value per line.
pub fn write_text_to<W: Write>(writer: &mut W, distribution: &Distribution) -> BalanceResult<()> {
    distribution.validate()?;
    writeln!(writer, "{}", distribution.topography_width)?;
    writeln!(writer, "{}", distribution.topography_height)?;
    writeln!(writer, "{}", distribution.block_width)?;
    writeln!(writer, "{}", distribution.block_height)?;
    writeln!(writer, "{}", distribution.clusters)?;
    writeln!(writer, "{}", distribution.nodes_per_cluster)?;
    writeln!(writer, "{}", distribution.cores_per_node)?;
    writeln!(writer, "{}", distribution.min_blocks_per_core)?;
    writeln!(writer, "{}", distribution.max_blocks_per_core)?;
    writeln!(writer, "{}", distribution.total_blocks())?;
    for &owner in &distribution.owners {
        writeln!(writer, "{}", owner)?;
    }
    Ok(())
}

/// Checks a declared block count against the one implied by the header.
fn check_declared_total(distribution: &Distribution, declared: i32) -> BalanceResult<()> {
    let expected = distribution.total_blocks();
    if declared < 0 || declared as usize != expected {
        return Err(BalanceError::BlockCountMismatch {
            expected,
            actual: declared.max(0) as usize,
        });
    }
    Ok(())
}

/// Line-by-line integer reader that tracks line numbers for error reports.
struct TextReader<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> TextReader<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// Reads the next line as an integer. A missing line parses as empty and
    /// is reported at the line number where the value was expected.
    fn next_value(&mut self) -> BalanceResult<i32> {
        self.line += 1;
        let text = match self.lines.next() {
            Some(line) => line?,
            None => String::new(),
        };
        text.trim().parse().map_err(|source| BalanceError::MalformedText {
            line: self.line,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    fn sample() -> Distribution {
        Distribution {
            topography_width: 4,
            topography_height: 2,
            block_width: 2,
            block_height: 1,
            clusters: 1,
            nodes_per_cluster: 1,
            cores_per_node: 2,
            min_blocks_per_core: 1,
            max_blocks_per_core: 2,
            owners: vec![1, 1, 2, 0],
        }
    }

    fn sample_bytes() -> Vec<u8> {
        let mut buffer = Vec::new();
        write_to(&mut buffer, &sample()).unwrap();
        buffer
    }

    #[test]
    fn test_binary_layout() {
        let buffer = sample_bytes();
        assert_eq!(buffer.len(), 14 * 4);
        assert_eq!(&buffer[..4], &[0, 0, 0, 4]);
        // Tenth header field is the declared block count.
        assert_eq!(&buffer[36..40], &[0, 0, 0, 4]);
        assert_eq!(&buffer[40..44], &[0, 0, 0, 1]);
        assert_eq!(&buffer[52..56], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_binary_round_trip() {
        let back = read_from(&mut Cursor::new(sample_bytes())).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_binary_rejects_bad_header() {
        let mut buffer = sample_bytes();
        // Zero out the cluster count, the fifth header field.
        buffer[16..20].copy_from_slice(&[0, 0, 0, 0]);
        match read_from(&mut Cursor::new(buffer)) {
            Err(BalanceError::InvalidCount { name, value }) => {
                assert_eq!(name, "cluster");
                assert_eq!(value, 0);
            }
            other => panic!("expected an invalid count error, got {:?}", other),
        }
    }

    #[test]
    fn test_binary_rejects_wrong_total() {
        let mut buffer = sample_bytes();
        buffer[36..40].copy_from_slice(&[0, 0, 0, 5]);
        match read_from(&mut Cursor::new(buffer)) {
            Err(BalanceError::BlockCountMismatch { expected, actual }) => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 5);
            }
            other => panic!("expected a block count mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_binary_rejects_truncated_owners() {
        let mut buffer = sample_bytes();
        buffer.truncate(buffer.len() - 4);
        assert!(read_from(&mut Cursor::new(buffer)).is_err());
    }

    #[test]
    fn test_write_rejects_invalid() {
        let mut distribution = sample();
        distribution.owners[0] = 7;
        let mut buffer = Vec::new();
        assert!(write_to(&mut buffer, &distribution).is_err());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_text_format() {
        let mut buffer = Vec::new();
        write_text_to(&mut buffer, &sample()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "4\n2\n2\n1\n1\n1\n2\n1\n2\n4\n1\n1\n2\n0\n");
    }

    #[test]
    fn test_text_round_trip() {
        let mut buffer = Vec::new();
        write_text_to(&mut buffer, &sample()).unwrap();
        let back = read_text_from(&buffer[..]).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_text_tolerates_whitespace() {
        let text = " 4 \n2\n2\n1\n1\n1\n2\n1\n2\n\t4\n1\n1\n2\n0\n";
        let back = read_text_from(text.as_bytes()).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_text_reports_line_of_bad_value() {
        let text = "4\n2\n2\n1\n1\n1\n2\n1\n2\n4\nabc\n1\n2\n0\n";
        match read_text_from(text.as_bytes()) {
            Err(BalanceError::MalformedText { line, .. }) => assert_eq!(line, 11),
            other => panic!("expected a malformed text error, got {:?}", other),
        }
    }

    #[test]
    fn test_text_reports_missing_line() {
        let text = "4\n2\n2\n";
        match read_text_from(text.as_bytes()) {
            Err(BalanceError::MalformedText { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected a malformed text error, got {:?}", other),
        }
    }
}
