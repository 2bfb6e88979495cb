//! BAM/SAM alignment source
//!
//! Reads alignments with rust-htslib, turns each primary mapped record into
//! the raw alignment trace the core consumes, and drives the batched
//! extraction: merged intervals are processed in chunks no larger than the
//! open-file ceiling, with one scan over the alignment file per chunk.

use log::{debug, info};
use rust_htslib::bam::{self, record::Cigar, Read, Record};
use std::path::Path;

use crate::core::{extract_read_slices, AlignedRead, Interval, Result, TraceColumn};
use crate::formats::fastq::IntervalWriters;

/// Run statistics for one slicing invocation
#[derive(Debug, Clone, Default)]
pub struct SliceStats {
    /// Alignment records seen in one scan of the input
    pub total: usize,
    /// Records skipped by the primary-mapped filter
    pub skipped: usize,
    /// FASTQ records written across all intervals and batches
    pub records: usize,
    /// Merged intervals processed
    pub intervals: usize,
    /// Scans over the alignment file
    pub batches: usize,
}

/// Build the raw alignment trace for a record from its CIGAR
///
/// One column per alignment column, in read order: match/mismatch ops consume
/// both coordinates, insertions and soft clips consume only the read,
/// deletions and reference skips consume only the reference, hard clips and
/// padding consume neither.
pub fn aligned_pairs(record: &Record) -> Vec<TraceColumn> {
    let mut columns = Vec::new();
    let mut read_pos: u64 = 0;
    let mut ref_pos = record.pos() as u64;

    for op in record.cigar().iter() {
        match op {
            Cigar::Match(n) | Cigar::Equal(n) | Cigar::Diff(n) => {
                for _ in 0..*n {
                    columns.push(TraceColumn::aligned(read_pos, ref_pos));
                    read_pos += 1;
                    ref_pos += 1;
                }
            }
            Cigar::Ins(n) | Cigar::SoftClip(n) => {
                for _ in 0..*n {
                    columns.push(TraceColumn::insertion(read_pos));
                    read_pos += 1;
                }
            }
            Cigar::Del(n) | Cigar::RefSkip(n) => {
                for _ in 0..*n {
                    columns.push(TraceColumn::deletion(ref_pos));
                    ref_pos += 1;
                }
            }
            Cigar::HardClip(_) | Cigar::Pad(_) => {}
        }
    }

    columns
}

/// Whether a record enters the core (primary, mapped, non-supplementary)
fn passes_filter(record: &Record) -> bool {
    !record.is_unmapped() && !record.is_secondary() && !record.is_supplementary()
}

fn to_aligned_read(record: &Record) -> AlignedRead {
    AlignedRead {
        name: String::from_utf8_lossy(record.qname()).into_owned(),
        sequence: record.seq().as_bytes(),
        qualities: record.qual().to_vec(),
        trace: aligned_pairs(record),
    }
}

/// Slice every merged interval out of a BAM/SAM file
///
/// Intervals are batched so no more than `max_open_files` output handles are
/// open at once; each batch re-scans the alignment file from the start. Every
/// interval's FASTQ file is created even when no read overlaps it.
pub fn slice_bam(
    bam_path: &Path,
    intervals: &[Interval],
    out_dir: &Path,
    prefix: &str,
    max_open_files: usize,
    threads: usize,
) -> Result<SliceStats> {
    let mut stats = SliceStats {
        intervals: intervals.len(),
        ..Default::default()
    };
    if intervals.is_empty() {
        return Ok(stats);
    }

    let batch_size = max_open_files.max(1);
    let batch_count = intervals.len().div_ceil(batch_size);

    for (batch_index, batch) in intervals.chunks(batch_size).enumerate() {
        info!(
            "batch {}/{}: {} intervals, scanning {:?}",
            batch_index + 1,
            batch_count,
            batch.len(),
            bam_path
        );

        let mut reader = bam::Reader::from_path(bam_path)?;
        if threads > 1 {
            reader.set_threads(threads)?;
        }

        let mut writers = IntervalWriters::create(out_dir, prefix, batch)?;
        let mut record = Record::new();

        while let Some(result) = reader.read(&mut record) {
            result?;

            // Record counts are per scan; later batches see the same reads
            if batch_index == 0 {
                stats.total += 1;
            }
            if !passes_filter(&record) {
                if batch_index == 0 {
                    stats.skipped += 1;
                }
                continue;
            }

            let read = to_aligned_read(&record);
            stats.records += extract_read_slices(&read, batch, &mut writers)?;
        }

        debug!(
            "batch {}/{}: {} records written",
            batch_index + 1,
            batch_count,
            writers.records()
        );
        writers.finish()?;
        stats.batches += 1;
    }

    Ok(stats)
}
