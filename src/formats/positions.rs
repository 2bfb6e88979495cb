//! Positions file reading
//!
//! Reads the list of target reference positions from a delimited text file
//! (or stdin), then pads and merges them into the interval set for the run.
//! Compressed inputs are decompressed transparently.

use memchr::memchr_iter;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use crate::core::{merge_intervals, pad_position, Interval, PositionsParseError, SliceError};

/// Compression format for positions files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression format from file path and/or content
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    // First check by extension
    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    // Then check by magic bytes
    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(CompressionFormat::Gzip);
    }
    // BZ2 magic: "BZh" (0x42 0x5a 0x68)
    if bytes_read >= 3 && magic[0] == 0x42 && magic[1] == 0x5a && magic[2] == 0x68 {
        return Ok(CompressionFormat::Bzip2);
    }

    Ok(CompressionFormat::Plain)
}

/// Read target positions from a file path, or from stdin when `path` is `-`
///
/// Handles gzip and bzip2 compressed files by extension or magic bytes. The
/// result is sorted ascending and deduplicated.
pub fn read_positions(
    path: &str,
    column: usize,
    delimiter: u8,
) -> Result<Vec<u64>, PositionsParseError> {
    if path == "-" {
        let stdin = io::stdin();
        return parse_positions(stdin.lock(), column, delimiter);
    }

    let path_ref = Path::new(path);
    if !path_ref.exists() {
        return Err(PositionsParseError::FileNotFound(path_ref.to_path_buf()));
    }

    let format = detect_compression(path_ref)?;
    let file = File::open(path_ref)?;

    match format {
        CompressionFormat::Gzip => {
            let decoder = flate2::read::GzDecoder::new(file);
            parse_positions(BufReader::with_capacity(128 * 1024, decoder), column, delimiter)
        }
        CompressionFormat::Bzip2 => {
            let decoder = bzip2::read::BzDecoder::new(file);
            parse_positions(BufReader::with_capacity(128 * 1024, decoder), column, delimiter)
        }
        CompressionFormat::Plain => {
            parse_positions(BufReader::with_capacity(128 * 1024, file), column, delimiter)
        }
    }
}

/// Parse positions from any buffered reader
///
/// Takes the `column`-th delimiter-separated field of every non-empty line.
/// The output is sorted and deduplicated; the file itself does not have to be
/// sorted.
pub fn parse_positions<R: BufRead>(
    reader: R,
    column: usize,
    delimiter: u8,
) -> Result<Vec<u64>, PositionsParseError> {
    let mut positions = Vec::new();

    for (line_number, line) in reader.split(b'\n').enumerate() {
        let line_number = line_number + 1;
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.is_empty() {
            continue;
        }

        let field = nth_field(&line, column, delimiter).ok_or(
            PositionsParseError::MissingColumn {
                line: line_number,
                column,
            },
        )?;
        let field_str =
            std::str::from_utf8(field).map_err(|_| PositionsParseError::InvalidUtf8 {
                line: line_number,
                column,
            })?;
        let position: u64 =
            field_str
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| PositionsParseError::ParseInt {
                    line: line_number,
                    value: field_str.to_string(),
                    message: e.to_string(),
                })?;
        positions.push(position);
    }

    positions.sort_unstable();
    positions.dedup();
    Ok(positions)
}

/// Extract the `index`-th delimiter-separated field of a line
fn nth_field(line: &[u8], index: usize, delimiter: u8) -> Option<&[u8]> {
    let mut start = 0;
    let mut current = 0;
    for tab in memchr_iter(delimiter, line) {
        if current == index {
            return Some(&line[start..tab]);
        }
        start = tab + 1;
        current += 1;
    }
    if current == index {
        return Some(&line[start..]);
    }
    None
}

/// Pad sorted positions into intervals and merge the overlaps
///
/// `positions` must be sorted ascending (as produced by [`read_positions`]);
/// uniform padding then keeps the padded intervals sorted by start, which is
/// the merge precondition.
pub fn build_intervals(positions: &[u64], padding: u64) -> Result<Vec<Interval>, SliceError> {
    let padded: Vec<Interval> = positions
        .iter()
        .map(|&pos| pad_position(pos, padding))
        .collect();
    merge_intervals(&padded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_single_column() {
        let data = Cursor::new(b"150\n100\n150\n7\n".to_vec());
        let positions = parse_positions(data, 0, b'\t').unwrap();
        assert_eq!(positions, vec![7, 100, 150]);
    }

    #[test]
    fn test_parse_selects_column() {
        let data = Cursor::new(b"chr1\t500\tfoo\nchr1\t200\tbar\n".to_vec());
        let positions = parse_positions(data, 1, b'\t').unwrap();
        assert_eq!(positions, vec![200, 500]);
    }

    #[test]
    fn test_parse_custom_delimiter() {
        let data = Cursor::new(b"chr1,500\nchr1,200\n".to_vec());
        let positions = parse_positions(data, 1, b',').unwrap();
        assert_eq!(positions, vec![200, 500]);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_crlf() {
        let data = Cursor::new(b"10\r\n\n20\r\n".to_vec());
        let positions = parse_positions(data, 0, b'\t').unwrap();
        assert_eq!(positions, vec![10, 20]);
    }

    #[test]
    fn test_parse_missing_column() {
        let data = Cursor::new(b"chr1\t500\n".to_vec());
        let err = parse_positions(data, 3, b'\t').unwrap_err();
        assert!(matches!(
            err,
            PositionsParseError::MissingColumn { line: 1, column: 3 }
        ));
    }

    #[test]
    fn test_parse_bad_integer_reports_line() {
        let data = Cursor::new(b"100\nabc\n".to_vec());
        let err = parse_positions(data, 0, b'\t').unwrap_err();
        match err {
            PositionsParseError::ParseInt { line, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_positions_plain_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "300\n100\n200").unwrap();
        temp.flush().unwrap();

        let positions =
            read_positions(temp.path().to_str().unwrap(), 0, b'\t').unwrap();
        assert_eq!(positions, vec![100, 200, 300]);
    }

    #[test]
    fn test_read_positions_gzip_by_magic() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"42\n7\n").unwrap();
        let compressed = encoder.finish().unwrap();

        // No .gz extension: detection must fall back to the magic bytes
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&compressed).unwrap();
        temp.flush().unwrap();

        let positions =
            read_positions(temp.path().to_str().unwrap(), 0, b'\t').unwrap();
        assert_eq!(positions, vec![7, 42]);
    }

    #[test]
    fn test_read_positions_missing_file() {
        let err = read_positions("/no/such/file.txt", 0, b'\t').unwrap_err();
        assert!(matches!(err, PositionsParseError::FileNotFound(_)));
    }

    #[test]
    fn test_detect_compression_by_extension() {
        let mut temp = NamedTempFile::with_suffix(".gz").unwrap();
        temp.write_all(b"anything").unwrap();
        assert_eq!(
            detect_compression(temp.path()).unwrap(),
            CompressionFormat::Gzip
        );
    }

    #[test]
    fn test_build_intervals_pads_and_merges() {
        // 100 and 150 overlap after +/-50 padding; 400 stands alone
        let intervals = build_intervals(&[100, 150, 400], 50).unwrap();
        assert_eq!(
            intervals,
            vec![Interval::new(50, 200), Interval::new(350, 450)]
        );
    }

    #[test]
    fn test_build_intervals_clamps_at_zero() {
        let intervals = build_intervals(&[10], 100).unwrap();
        assert_eq!(intervals, vec![Interval::new(0, 110)]);
    }

    #[test]
    fn test_nth_field_last_field() {
        assert_eq!(nth_field(b"a\tb\tc", 2, b'\t'), Some(&b"c"[..]));
        assert_eq!(nth_field(b"a\tb\tc", 3, b'\t'), None);
        assert_eq!(nth_field(b"abc", 0, b'\t'), Some(&b"abc"[..]));
    }
}
