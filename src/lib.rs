//! bamslice - Slice read subsequences out of BAM/SAM files
//!
//! For a list of target reference positions, padded into intervals and
//! merged, bamslice writes one gzip FASTQ file per merged interval containing
//! the subsequence of every primary mapped read overlapping that interval.
//!
//! # Features
//!
//! - Interval merging with a touch-preserving rule (adjacent intervals stay
//!   separate)
//! - Gap-filled alignment traces: insertions and deletions become repeated
//!   boundary coordinates, so plain binary searches resolve any interval
//! - Handle-aware batching: interval outputs are chunked under an open-file
//!   ceiling, re-scanning the alignment file once per chunk
//!
//! # Example
//!
//! ```ignore
//! use bamslice::core::{merge_intervals, pad_position};
//! use bamslice::formats::slice_bam;
//!
//! let positions = vec![1_000, 1_050, 9_000];
//! let padded: Vec<_> = positions.iter().map(|&p| pad_position(p, 100)).collect();
//! let intervals = merge_intervals(&padded)?;
//!
//! let stats = slice_bam("sample.bam".as_ref(), &intervals, ".".as_ref(), "sample", 1000, 1)?;
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use core::{
    extract_read_slices, fill_gaps, merge_intervals, pad_position, resolve_range, AlignedRead,
    BamSliceError, GapFilledTrace, Interval, ReadIndexRange, Result, SliceError, SliceSink,
    TraceColumn,
};
pub use formats::{build_intervals, read_positions, slice_bam, SliceStats};
