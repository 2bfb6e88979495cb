//! Alignment trace gap-filling
//!
//! An alignment trace pairs read positions with reference positions, one pair
//! per alignment column. Insertions leave the reference side absent and
//! deletions leave the read side absent; gap-filling replaces every absence
//! with the nearest preceding present value so that both sides become dense,
//! non-decreasing sequences that a binary search can operate on.

/// Sentinel emitted for a component with no preceding present value
pub const UNALIGNED: i64 = -1;

/// One column of a raw alignment trace
///
/// Either side may be absent: an insertion carries no reference position and
/// a deletion carries no read position. A column with both sides absent never
/// comes out of a CIGAR walk; it is tolerated anyway by propagating the
/// sentinels, keeping [`fill_gaps`] total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceColumn {
    /// Read (query) position, absent for deletions
    pub read: Option<u64>,
    /// Reference position, absent for insertions and soft clips
    pub reference: Option<u64>,
}

impl TraceColumn {
    pub fn new(read: Option<u64>, reference: Option<u64>) -> Self {
        Self { read, reference }
    }

    /// Column consuming both the read and the reference (match/mismatch)
    pub fn aligned(read: u64, reference: u64) -> Self {
        Self::new(Some(read), Some(reference))
    }

    /// Column consuming only the read (insertion or soft clip)
    pub fn insertion(read: u64) -> Self {
        Self::new(Some(read), None)
    }

    /// Column consuming only the reference (deletion or skip)
    pub fn deletion(reference: u64) -> Self {
        Self::new(None, Some(reference))
    }
}

/// A gap-filled alignment trace
///
/// Both vectors have the same length as the raw trace and contain no
/// absences. Entries are non-decreasing except for a leading run of
/// [`UNALIGNED`] sentinels in either component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GapFilledTrace {
    /// Read position per column, deletions repeat the previous value
    pub read_positions: Vec<i64>,
    /// Reference position per column, insertions repeat the previous value
    pub ref_positions: Vec<i64>,
}

impl GapFilledTrace {
    /// Number of alignment columns
    pub fn len(&self) -> usize {
        self.ref_positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ref_positions.is_empty()
    }
}

/// Gap-fill a raw alignment trace
///
/// Single forward pass keeping the last seen value per component. Absences
/// are replaced with that value, or with [`UNALIGNED`] while no value has
/// been seen yet. Repeated boundary values are what make insertions and
/// deletions addressable by the binary search in
/// [`resolve_range`](crate::core::resolve_range).
///
/// # Examples
/// ```
/// use bamslice::core::{fill_gaps, TraceColumn};
///
/// let trace = vec![
///     TraceColumn::aligned(1, 1),
///     TraceColumn::deletion(2),
///     TraceColumn::insertion(2),
/// ];
/// let filled = fill_gaps(&trace);
/// assert_eq!(filled.read_positions, vec![1, 1, 2]);
/// assert_eq!(filled.ref_positions, vec![1, 2, 2]);
/// ```
pub fn fill_gaps(trace: &[TraceColumn]) -> GapFilledTrace {
    let mut read_positions = Vec::with_capacity(trace.len());
    let mut ref_positions = Vec::with_capacity(trace.len());
    let mut previous_read = UNALIGNED;
    let mut previous_ref = UNALIGNED;

    for column in trace {
        match column.reference {
            Some(reference) => {
                previous_ref = reference as i64;
                ref_positions.push(previous_ref);
            }
            None => ref_positions.push(previous_ref),
        }

        match column.read {
            Some(read) => {
                previous_read = read as i64;
                read_positions.push(previous_read);
            }
            None => read_positions.push(previous_read),
        }
    }

    GapFilledTrace {
        read_positions,
        ref_positions,
    }
}
