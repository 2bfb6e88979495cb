//! Interval padding and merging
//!
//! Target reference positions are padded into half-open intervals and the
//! padded intervals are merged into a minimal non-overlapping set. The merged
//! set is computed once per run and is immutable read-only state afterwards.

use crate::core::error::{SliceError, SliceResult};

/// A half-open interval `[start, end)` in reference coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    /// Start position (0-based, inclusive)
    pub start: u64,
    /// End position (exclusive)
    pub end: u64,
}

impl Interval {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Number of reference positions covered
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `self` covers the reference position `pos`
    pub fn contains(&self, pos: u64) -> bool {
        pos >= self.start && pos < self.end
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Pad a target position into an interval
///
/// Takes `padding` bases either side of `pos`, clamping the start at 0.
///
/// # Examples
/// ```
/// use bamslice::core::pad_position;
///
/// assert_eq!(pad_position(500, 100).start, 400);
/// assert_eq!(pad_position(500, 100).end, 600);
/// // Padding below 0 clamps the start
/// assert_eq!(pad_position(30, 100).start, 0);
/// assert_eq!(pad_position(30, 100).end, 130);
/// ```
pub fn pad_position(pos: u64, padding: u64) -> Interval {
    Interval::new(pos.saturating_sub(padding), pos + padding)
}

/// Merge a sorted interval list into a minimal non-overlapping set
///
/// The input must be sorted by start ascending; an out-of-order start is a
/// caller bug and fails fast with [`SliceError::InvalidIntervalOrder`] rather
/// than silently mis-merging.
///
/// Two intervals are merged only when they strictly overlap: an interval
/// whose start equals the previous interval's end is touching, not
/// overlapping, and stays separate. The accumulator is replaced by value each
/// iteration, never extended through a shared reference.
///
/// # Examples
/// ```
/// use bamslice::core::{merge_intervals, Interval};
///
/// let intervals = vec![
///     Interval::new(6, 9),
///     Interval::new(8, 12),
///     Interval::new(11, 14),
///     Interval::new(14, 16),
/// ];
/// let merged = merge_intervals(&intervals).unwrap();
/// assert_eq!(merged, vec![Interval::new(6, 14), Interval::new(14, 16)]);
/// ```
pub fn merge_intervals(intervals: &[Interval]) -> SliceResult<Vec<Interval>> {
    let mut merged = Vec::with_capacity(intervals.len());
    let mut current: Option<Interval> = None;

    for &interval in intervals {
        let cached = match current {
            None => {
                current = Some(interval);
                continue;
            }
            Some(cached) => cached,
        };

        if interval.start < cached.start {
            return Err(SliceError::InvalidIntervalOrder {
                previous_start: cached.start,
                start: interval.start,
                end: interval.end,
            });
        }

        if interval.start >= cached.end {
            // Touching counts as non-overlapping
            merged.push(cached);
            current = Some(interval);
        } else {
            // Sorted by start only, so the merged end must take the max
            current = Some(Interval::new(cached.start, cached.end.max(interval.end)));
        }
    }

    if let Some(cached) = current {
        merged.push(cached);
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: u64, end: u64) -> Interval {
        Interval::new(start, end)
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(merge_intervals(&[]).unwrap(), vec![]);
    }

    #[test]
    fn test_merge_single() {
        assert_eq!(merge_intervals(&[iv(3, 8)]).unwrap(), vec![iv(3, 8)]);
    }

    #[test]
    fn test_merge_no_overlap_unchanged() {
        let intervals = [iv(2, 4), iv(6, 9), iv(11, 12)];
        assert_eq!(
            merge_intervals(&intervals).unwrap(),
            vec![iv(2, 4), iv(6, 9), iv(11, 12)]
        );
    }

    #[test]
    fn test_merge_touching_stays_separate() {
        let intervals = [iv(6, 9), iv(9, 12)];
        assert_eq!(
            merge_intervals(&intervals).unwrap(),
            vec![iv(6, 9), iv(9, 12)]
        );
    }

    #[test]
    fn test_merge_two_overlapping() {
        let intervals = [iv(6, 9), iv(8, 12)];
        assert_eq!(merge_intervals(&intervals).unwrap(), vec![iv(6, 12)]);
    }

    #[test]
    fn test_merge_three_overlapping() {
        let intervals = [iv(6, 9), iv(8, 12), iv(11, 14)];
        assert_eq!(merge_intervals(&intervals).unwrap(), vec![iv(6, 14)]);
    }

    #[test]
    fn test_merge_overlap_then_touch() {
        let intervals = [iv(6, 9), iv(8, 12), iv(11, 14), iv(14, 16)];
        assert_eq!(
            merge_intervals(&intervals).unwrap(),
            vec![iv(6, 14), iv(14, 16)]
        );
    }

    #[test]
    fn test_merge_contained_interval() {
        // End extension must use max, not the incoming end
        let intervals = [iv(0, 100), iv(10, 20), iv(30, 40)];
        assert_eq!(merge_intervals(&intervals).unwrap(), vec![iv(0, 100)]);
    }

    #[test]
    fn test_merge_unsorted_fails_fast() {
        let intervals = [iv(10, 20), iv(5, 8)];
        let err = merge_intervals(&intervals).unwrap_err();
        assert!(matches!(
            err,
            SliceError::InvalidIntervalOrder {
                previous_start: 10,
                start: 5,
                end: 8
            }
        ));
    }

    #[test]
    fn test_merge_idempotent() {
        let intervals = [iv(6, 9), iv(8, 12), iv(11, 14), iv(14, 16)];
        let once = merge_intervals(&intervals).unwrap();
        let twice = merge_intervals(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_pad_position() {
        assert_eq!(pad_position(500, 100), iv(400, 600));
        assert_eq!(pad_position(100, 100), iv(0, 200));
        assert_eq!(pad_position(30, 100), iv(0, 130));
        assert_eq!(pad_position(0, 0), iv(0, 0));
    }

    #[test]
    fn test_interval_contains() {
        let interval = iv(5, 10);
        assert!(!interval.contains(4));
        assert!(interval.contains(5));
        assert!(interval.contains(9));
        assert!(!interval.contains(10));
    }

    #[test]
    fn test_interval_display() {
        assert_eq!(format!("{}", iv(2, 7)), "[2, 7)");
    }
}
