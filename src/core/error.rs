//! Error types for bamslice
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bamslice operations
#[derive(Debug, Error)]
pub enum BamSliceError {
    /// Core slicing errors (precondition violations)
    #[error("Slice error: {0}")]
    Slice(#[from] SliceError),

    /// Positions file parsing errors
    #[error("Positions parse error: {0}")]
    PositionsParse(#[from] PositionsParseError),

    /// FASTQ output errors
    #[error("FASTQ write error: {0}")]
    FastqWrite(#[from] FastqWriteError),

    /// HTSlib errors while reading alignments
    #[error("HTSlib error: {0}")]
    Htslib(#[from] rust_htslib::errors::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the core slicing algorithms
///
/// An interval that does not intersect a read is an expected outcome and is
/// modelled as `Option::None`, never as an error, so it has no variant here.
#[derive(Debug, Error)]
pub enum SliceError {
    /// IntervalMerger received intervals that are not sorted by start
    #[error(
        "Intervals not sorted by start: [{start}, {end}) follows an interval starting at {previous_start}"
    )]
    InvalidIntervalOrder {
        previous_start: u64,
        start: u64,
        end: u64,
    },
}

/// Errors that can occur while parsing a positions file
#[derive(Debug, Error)]
pub enum PositionsParseError {
    /// Requested column does not exist on a line
    #[error("Missing column {column} at line {line}")]
    MissingColumn { line: usize, column: usize },

    /// Column value is not a valid position
    #[error("Failed to parse position '{value}' at line {line}: {message}")]
    ParseInt {
        line: usize,
        value: String,
        message: String,
    },

    /// Column value is not valid UTF-8
    #[error("Invalid UTF-8 in column {column} at line {line}")]
    InvalidUtf8 { line: usize, column: usize },

    /// File not found
    #[error("Positions file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while writing interval FASTQ files
#[derive(Debug, Error)]
pub enum FastqWriteError {
    /// Failed to create an output file
    #[error("Failed to create output file {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No writer registered for an interval
    #[error("No output registered for interval [{start}, {end})")]
    UnknownInterval { start: u64, end: u64 },

    /// I/O error while writing a record
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for bamslice operations
pub type Result<T> = std::result::Result<T, BamSliceError>;

/// Result type alias for core slicing operations
pub type SliceResult<T> = std::result::Result<T, SliceError>;

/// Result type alias for positions parsing operations
pub type PositionsResult<T> = std::result::Result<T, PositionsParseError>;

/// Result type alias for FASTQ writing operations
pub type FastqResult<T> = std::result::Result<T, FastqWriteError>;
