//! Gzip FASTQ output
//!
//! One compressed FASTQ file per merged interval, named
//! `{prefix}_{start}-{end}.fastq.gz`. Quality scores are written phred+33.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::{FastqResult, FastqWriteError, Interval, SliceSink};

/// Phred score to printable quality character offset
const PHRED_OFFSET: u8 = 33;

/// Highest phred score with a printable encoding ('~'). htslib reports a
/// missing quality string (`*` in SAM) as 0xff per base; clamping keeps those
/// bytes printable instead of overflowing the offset.
const MAX_PHRED: u8 = 93;

/// Writer for one gzip-compressed FASTQ file
pub struct FastqWriter {
    encoder: GzEncoder<BufWriter<File>>,
    records: usize,
}

impl FastqWriter {
    /// Create (truncating) the FASTQ file at `path`
    pub fn create(path: &Path) -> FastqResult<Self> {
        let file = File::create(path).map_err(|source| FastqWriteError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            encoder: GzEncoder::new(BufWriter::new(file), Compression::default()),
            records: 0,
        })
    }

    /// Append one record; `qualities` are raw phred scores
    pub fn write_record(
        &mut self,
        name: &str,
        sequence: &[u8],
        qualities: &[u8],
    ) -> FastqResult<()> {
        self.encoder.write_all(b"@")?;
        self.encoder.write_all(name.as_bytes())?;
        self.encoder.write_all(b"\n")?;
        self.encoder.write_all(sequence)?;
        self.encoder.write_all(b"\n+\n")?;
        let printable: Vec<u8> = qualities
            .iter()
            .map(|&q| q.min(MAX_PHRED) + PHRED_OFFSET)
            .collect();
        self.encoder.write_all(&printable)?;
        self.encoder.write_all(b"\n")?;
        self.records += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush and finish the gzip stream
    pub fn finish(self) -> FastqResult<()> {
        self.encoder.finish()?;
        Ok(())
    }
}

/// Per-interval FASTQ outputs for one batch of merged intervals
///
/// Every interval's file is created up front, so an interval that ends up
/// overlapping no read still leaves an empty FASTQ file behind; that is the
/// expected outcome, not an error.
pub struct IntervalWriters {
    writers: HashMap<Interval, FastqWriter>,
}

impl IntervalWriters {
    /// Open one writer per interval under `out_dir` with the given prefix
    pub fn create(out_dir: &Path, prefix: &str, intervals: &[Interval]) -> FastqResult<Self> {
        let mut writers = HashMap::with_capacity(intervals.len());
        for &interval in intervals {
            let path = interval_path(out_dir, prefix, interval);
            writers.insert(interval, FastqWriter::create(&path)?);
        }
        Ok(Self { writers })
    }

    /// Total records written across all intervals in this batch
    pub fn records(&self) -> usize {
        self.writers.values().map(FastqWriter::records).sum()
    }

    /// Finish every gzip stream in the batch
    pub fn finish(self) -> FastqResult<()> {
        for (_, writer) in self.writers {
            writer.finish()?;
        }
        Ok(())
    }
}

impl SliceSink for IntervalWriters {
    fn write_slice(
        &mut self,
        interval: Interval,
        name: &str,
        sequence: &[u8],
        qualities: &[u8],
    ) -> FastqResult<()> {
        let writer =
            self.writers
                .get_mut(&interval)
                .ok_or(FastqWriteError::UnknownInterval {
                    start: interval.start,
                    end: interval.end,
                })?;
        writer.write_record(name, sequence, qualities)
    }
}

/// Output path for one interval's FASTQ file
pub fn interval_path(out_dir: &Path, prefix: &str, interval: Interval) -> PathBuf {
    out_dir.join(format!(
        "{}_{}-{}.fastq.gz",
        prefix, interval.start, interval.end
    ))
}

/// Filename without its path and extensions, with any `.gz` stripped first
///
/// # Examples
/// ```
/// use bamslice::formats::filename_prefix;
/// use std::path::Path;
///
/// assert_eq!(filename_prefix(Path::new("path/to/sample.bam")), "sample");
/// assert_eq!(filename_prefix(Path::new("my.fastq.gz")), "my");
/// ```
pub fn filename_prefix(path: &Path) -> String {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("slice");
    let name = name.strip_suffix(".gz").unwrap_or(name);
    match name.rfind('.') {
        Some(dot) if dot > 0 => name[..dot].to_string(),
        _ => name.to_string(),
    }
}
