//! Property-based tests for interval merging

use bamslice::core::{merge_intervals, pad_position, Interval};
use proptest::prelude::*;

/// Generate a sorted-by-start interval list
fn arb_sorted_intervals() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec((0u64..10_000, 1u64..500), 0..50).prop_map(|pairs| {
        let mut intervals: Vec<Interval> = pairs
            .into_iter()
            .map(|(start, len)| Interval::new(start, start + len))
            .collect();
        intervals.sort_by_key(|interval| interval.start);
        intervals
    })
}

/// Union of covered points, as a sorted list
fn covered_points(intervals: &[Interval]) -> Vec<u64> {
    let mut points: Vec<u64> = intervals
        .iter()
        .flat_map(|interval| interval.start..interval.end)
        .collect();
    points.sort_unstable();
    points.dedup();
    points
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// merge(merge(X)) == merge(X)
    #[test]
    fn prop_merge_idempotent(intervals in arb_sorted_intervals()) {
        let once = merge_intervals(&intervals).unwrap();
        let twice = merge_intervals(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// The merged set covers exactly the same reference points as the input
    #[test]
    fn prop_merge_preserves_coverage(intervals in arb_sorted_intervals()) {
        let merged = merge_intervals(&intervals).unwrap();
        prop_assert_eq!(covered_points(&intervals), covered_points(&merged));
    }

    /// Adjacent outputs never strictly overlap, and touching pairs survive
    #[test]
    fn prop_merge_output_non_overlapping(intervals in arb_sorted_intervals()) {
        let merged = merge_intervals(&intervals).unwrap();
        for pair in merged.windows(2) {
            prop_assert!(pair[1].start >= pair[0].end);
        }
    }

    /// Output stays sorted by start and every interval is non-empty when the
    /// inputs are
    #[test]
    fn prop_merge_output_sorted(intervals in arb_sorted_intervals()) {
        let merged = merge_intervals(&intervals).unwrap();
        for pair in merged.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
        }
        for interval in &merged {
            prop_assert!(interval.start < interval.end);
        }
    }

    /// Merging never increases cardinality
    #[test]
    fn prop_merge_minimal_cardinality(intervals in arb_sorted_intervals()) {
        let merged = merge_intervals(&intervals).unwrap();
        prop_assert!(merged.len() <= intervals.len());
    }

    /// Padding a position always yields an interval containing it, with the
    /// start clamped at zero
    #[test]
    fn prop_pad_contains_position(pos in 0u64..1_000_000, padding in 1u64..10_000) {
        let interval = pad_position(pos, padding);
        prop_assert!(interval.contains(pos));
        prop_assert!(interval.start <= pos);
        prop_assert_eq!(interval.end, pos + padding);
        if pos >= padding {
            prop_assert_eq!(interval.start, pos - padding);
        } else {
            prop_assert_eq!(interval.start, 0);
        }
    }

    /// Padded sorted positions always satisfy the merge precondition
    #[test]
    fn prop_padded_positions_merge(mut positions in prop::collection::vec(0u64..100_000, 1..100), padding in 0u64..500) {
        positions.sort_unstable();
        positions.dedup();
        let padded: Vec<Interval> = positions.iter().map(|&p| pad_position(p, padding)).collect();
        prop_assert!(merge_intervals(&padded).is_ok());
    }
}
