//! Reference-interval to read-index resolution
//!
//! Maps a reference interval into the read-index range it covers, going
//! through a gap-filled alignment trace. Because gap-filling turned
//! insertions and deletions into repeated boundary values, both position
//! vectors are ordinary non-decreasing sequences and plain binary searches
//! locate the covered columns.

use crate::core::intervals::Interval;
use crate::core::trace::{GapFilledTrace, UNALIGNED};

/// Half-open index span `[start, end)` into a read's sequence and quality
/// arrays
///
/// The span may be empty (`start == end`): an interval that only covers a
/// deletion run before the first read base resolves to the empty span at
/// index 0, which slices to an empty subsequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadIndexRange {
    /// First read index covered (inclusive)
    pub start: usize,
    /// One past the last read index covered (exclusive)
    pub end: usize,
}

impl ReadIndexRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of read bases covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Leftmost insertion point for `value` in a non-decreasing slice
fn bisect_left(positions: &[i64], value: i64) -> usize {
    positions.partition_point(|&p| p < value)
}

/// Rightmost insertion point for `value` in a non-decreasing slice
fn bisect_right(positions: &[i64], value: i64) -> usize {
    positions.partition_point(|&p| p <= value)
}

/// Resolve a reference interval into the read-index range it covers
///
/// Binary-searches `ref_positions` for the column range whose reference
/// positions lie in `[interval.start, interval.end]` (the end is treated
/// inclusively here), then takes the first and last read positions of that
/// column range. Repeated reference values from insertions are all included;
/// repeated read values from deletions collapse the span, possibly to a
/// single base.
///
/// Returns `None` exactly when no reference position in the trace falls
/// inside the interval. This is the expected no-overlap outcome, not a
/// fault. A start that resolves into the leading [`UNALIGNED`] run clamps to
/// 0; if the end is also still unaligned the interval sits entirely inside a
/// deletion run before the first read base and the result is the empty span
/// at index 0.
///
/// # Examples
/// ```
/// use bamslice::core::{resolve_range, GapFilledTrace, Interval, ReadIndexRange};
///
/// let trace = GapFilledTrace {
///     read_positions: (30..36).collect(),
///     ref_positions: (1..7).collect(),
/// };
/// assert_eq!(
///     resolve_range(Interval::new(2, 5), &trace),
///     Some(ReadIndexRange::new(31, 35))
/// );
/// assert_eq!(resolve_range(Interval::new(40, 50), &trace), None);
/// ```
pub fn resolve_range(interval: Interval, trace: &GapFilledTrace) -> Option<ReadIndexRange> {
    let lo = bisect_left(&trace.ref_positions, interval.start as i64);
    let hi = bisect_right(&trace.ref_positions, interval.end as i64);

    if lo == hi {
        // No reference position of this read falls inside the interval
        return None;
    }

    // The covered slice is non-decreasing apart from a possible leading
    // sentinel run, so first/last are the span bounds (not min/max).
    let covered = &trace.read_positions[lo..hi];
    let first = covered[0];
    let last = covered[covered.len() - 1];

    if last == UNALIGNED {
        // Interval sits entirely inside a leading unmatched run: covered,
        // but with no read base under it
        return Some(ReadIndexRange::new(0, 0));
    }

    // A deletion crossing the start of the read clamps to the first base
    let start = if first < 0 { 0 } else { first as usize };

    Some(ReadIndexRange::new(start, last as usize + 1))
}
