//! Core coordinate-mapping functionality
//!
//! This module contains the interval merger, the alignment-trace gap filler,
//! the reference-to-read position mapper, and the slice extractor composing
//! them. Everything here is pure computation over in-memory sequences; file
//! handling lives in [`crate::formats`].

mod error;
mod intervals;
mod mapper;
mod slicer;
mod trace;

pub use error::{
    BamSliceError, FastqResult, FastqWriteError, PositionsParseError, PositionsResult, Result,
    SliceError, SliceResult,
};
pub use intervals::{merge_intervals, pad_position, Interval};
pub use mapper::{resolve_range, ReadIndexRange};
pub use slicer::{extract_read_slices, AlignedRead, SliceSink};
pub use trace::{fill_gaps, GapFilledTrace, TraceColumn, UNALIGNED};
