//! File format adapters
//!
//! Collaborators around the core: positions-file parsing, BAM/SAM reading,
//! and per-interval gzip FASTQ output.

pub mod bam;
pub mod fastq;
pub mod positions;

pub use bam::{aligned_pairs, slice_bam, SliceStats};
pub use fastq::{filename_prefix, interval_path, FastqWriter, IntervalWriters};
pub use positions::{
    build_intervals, detect_compression, parse_positions, read_positions, CompressionFormat,
};
