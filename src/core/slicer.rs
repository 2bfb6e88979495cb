//! Slice extraction
//!
//! Thin composition layer over the core algorithms: gap-fill a read's trace
//! once, resolve every merged interval against it, and hand each resolved
//! subsequence to the output sink. All file I/O lives behind the
//! [`SliceSink`] seam; the extractor itself is a pure pass over in-memory
//! sequences.

use log::warn;

use crate::core::error::FastqResult;
use crate::core::intervals::Interval;
use crate::core::mapper::resolve_range;
use crate::core::trace::{fill_gaps, TraceColumn};

/// One aligned read as handed over by the alignment source
///
/// Transient: nothing here outlives the evaluation of the merged intervals
/// against this read.
#[derive(Debug, Clone)]
pub struct AlignedRead {
    /// Read identifier (query name)
    pub name: String,
    /// Base sequence
    pub sequence: Vec<u8>,
    /// Raw phred quality score per base (not yet offset for printing)
    pub qualities: Vec<u8>,
    /// Raw alignment trace, one column per alignment column in read order
    pub trace: Vec<TraceColumn>,
}

/// Destination for resolved read slices, keyed by interval
///
/// Implementations route each record to the right per-interval output and own
/// all I/O concerns (compression, handle management).
pub trait SliceSink {
    /// Write one sliced record for `interval`
    fn write_slice(
        &mut self,
        interval: Interval,
        name: &str,
        sequence: &[u8],
        qualities: &[u8],
    ) -> FastqResult<()>;
}

/// Extract every merged interval's subsequence from one read
///
/// Gap-fills the trace once, then resolves each interval; intervals with no
/// overlap are skipped silently (that is their contract). An interval whose
/// covered columns carry no read base still resolves, to an empty span, and
/// produces an empty record. Returns the number of records handed to the
/// sink.
///
/// The caller may invoke this with disjoint interval subsets over several
/// passes of the alignment source; nothing is retained across calls.
pub fn extract_read_slices<S: SliceSink>(
    read: &AlignedRead,
    intervals: &[Interval],
    sink: &mut S,
) -> FastqResult<usize> {
    let filled = fill_gaps(&read.trace);
    let mut written = 0;

    for &interval in intervals {
        let range = match resolve_range(interval, &filled) {
            Some(range) => range,
            None => continue,
        };

        // A trace built from a CIGAR never points past the sequence; a trace
        // that does is malformed and the record is skipped rather than sliced
        // out of bounds.
        if range.end > read.sequence.len() || range.end > read.qualities.len() {
            warn!(
                "read {}: trace points at index {} beyond sequence length {}, skipping {}",
                read.name,
                range.end,
                read.sequence.len(),
                interval
            );
            continue;
        }

        sink.write_slice(
            interval,
            &read.name,
            &read.sequence[range.start..range.end],
            &read.qualities[range.start..range.end],
        )?;
        written += 1;
    }

    Ok(written)
}
