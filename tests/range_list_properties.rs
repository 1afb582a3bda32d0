//! Property-based tests for RangeList normalization and set algebra.

use genome_loci::{Range, RangeList};
use proptest::prelude::*;

/// Generate an arbitrary range with offsets small enough to produce
/// interesting overlaps.
fn arb_range() -> impl Strategy<Value = Range> {
    (0u32..1_000, 0u32..200).prop_map(|(start, length)| Range::new(start, start + length))
}

fn arb_ranges() -> impl Strategy<Value = Vec<Range>> {
    prop::collection::vec(arb_range(), 0..40)
}

fn normalize(ranges: &[Range]) -> RangeList {
    ranges.iter().copied().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Normalizing an already normalized list changes nothing.
    #[test]
    fn normalization_is_idempotent(ranges in arb_ranges()) {
        let once = normalize(&ranges);
        let twice: RangeList = once.iter().collect();
        prop_assert_eq!(once, twice);
    }

    /// Consecutive runs are sorted, disjoint and never touch.
    #[test]
    fn runs_are_disjoint_and_gapped(ranges in arb_ranges()) {
        let list = normalize(&ranges);
        let runs: Vec<Range> = list.iter().collect();
        for pair in runs.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
        }
    }

    /// Every input offset is covered by some run, and the total covered
    /// length never exceeds the sum of input lengths.
    #[test]
    fn normalization_preserves_coverage(ranges in arb_ranges()) {
        let list = normalize(&ranges);
        for range in &ranges {
            if !range.is_empty() {
                prop_assert!(list.contains(range));
            }
        }

        let input_total: u64 = ranges.iter().map(|r| u64::from(r.length())).sum();
        prop_assert!(list.length() <= input_total || ranges.is_empty());
    }

    /// Union is idempotent: (A ∪ B) ∩ (A ∪ B) == A ∪ B.
    ///
    /// Zero-length runs are excluded: they survive union as isolated
    /// runs but never intersect anything, not even themselves.
    #[test]
    fn union_absorbs_itself(a in arb_ranges(), b in arb_ranges()) {
        let positive = |ranges: &[Range]| {
            ranges.iter().copied().filter(|r| !r.is_empty()).collect::<RangeList>()
        };
        let union = positive(&a).union(&positive(&b));
        prop_assert_eq!(union.intersect(&union), union);
    }

    /// Union covers both operands; intersection is covered by both.
    #[test]
    fn union_and_intersection_bounds(a in arb_ranges(), b in arb_ranges()) {
        let left = normalize(&a);
        let right = normalize(&b);
        let union = left.union(&right);
        let intersection = left.intersect(&right);

        for run in left.iter().chain(right.iter()) {
            if !run.is_empty() {
                prop_assert!(union.contains(&run));
            }
        }
        for run in intersection.iter() {
            prop_assert!(left.contains(&run));
            prop_assert!(right.contains(&run));
        }
    }

    /// intersection_length(A ∩ B, R) is bounded by both sides.
    #[test]
    fn intersection_length_is_monotone(a in arb_ranges(), b in arb_ranges(), probe in arb_range()) {
        let left = normalize(&a);
        let right = normalize(&b);
        let both = left.intersect(&right);

        let len = both.intersection_length(&probe);
        prop_assert!(len <= left.intersection_length(&probe));
        prop_assert!(len <= right.intersection_length(&probe));
    }

    /// A probe inside one run is contained, and its intersection length
    /// is its full length.
    #[test]
    fn containment_is_consistent(ranges in arb_ranges(), probe in arb_range()) {
        let list = normalize(&ranges);
        if list.contains(&probe) {
            prop_assert_eq!(list.intersection_length(&probe), probe.length());
        }
        // The converse holds for non-empty probes.
        if !probe.is_empty() && list.intersection_length(&probe) == probe.length() {
            prop_assert!(list.contains(&probe));
        }
    }

    /// Subtracting ranges from a base interval covers the base exactly
    /// once when recombined with the intersection.
    #[test]
    fn subtract_partitions_the_base(base in arb_range(), ranges in arb_ranges()) {
        let gaps = base.subtract(ranges.clone());
        let gap_list: RangeList = gaps.iter().copied().collect();
        let covered = normalize(&ranges);

        // Gaps never overlap the subtracted set.
        for gap in &gaps {
            prop_assert_eq!(covered.intersection_length(gap), 0);
        }

        // Gaps plus overlap reassemble the base length.
        let overlap = u64::from(covered.intersection_length(&base));
        let gap_total: u64 = gaps
            .iter()
            .map(|gap| u64::from(base.intersection(gap).map_or(0, |r| r.length())))
            .sum();
        prop_assert_eq!(gap_total + overlap, u64::from(base.length()));
    }
}
