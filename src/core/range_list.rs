//! Sorted, coalesced range containers.
//!
//! [`RangeList`] normalizes an arbitrary collection of half-open ranges
//! into maximal disjoint runs and supports containment, intersection
//! length, union, intersection and single-interval complement over them.
//! Ranges that merely touch (`start == current_end`) coalesce into a
//! single run; tests depend on this policy, do not "fix" it.

use crate::core::range::Range;
use std::fmt;

/// A collection of possibly overlapping ranges compressed into sorted,
/// disjoint, non-touching runs.
///
/// Internally two parallel offset arrays, so a list of `n` runs costs
/// `8n` bytes. Immutable once built; build one with
/// [`FromIterator`]:
///
/// ```
/// use genome_loci::{Range, RangeList};
///
/// let list: RangeList = [Range::new(50, 150), Range::new(0, 100), Range::new(200, 210)]
///     .into_iter()
///     .collect();
/// assert_eq!(list.len(), 2); // [0, 150) and [200, 210)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeList {
    starts: Vec<u32>,
    ends: Vec<u32>,
}

impl RangeList {
    /// An empty list.
    pub fn new() -> RangeList {
        RangeList::default()
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Total number of offsets covered by all runs.
    pub fn length(&self) -> u64 {
        self.starts
            .iter()
            .zip(&self.ends)
            .map(|(&start, &end)| u64::from(end - start))
            .sum()
    }

    /// Checks whether a single run fully covers `range`.
    pub fn contains(&self, range: &Range) -> bool {
        self.contains_offsets(range.start, range.end)
    }

    /// [`Self::contains`] without constructing a range.
    pub fn contains_offsets(&self, start: u32, end: u32) -> bool {
        match self.lookup(start) {
            Some(i) => start >= self.starts[i] && end <= self.ends[i],
            None => false,
        }
    }

    /// Returns the total length of the overlap between `range` and the
    /// runs of this list.
    pub fn intersection_length(&self, range: &Range) -> u32 {
        let mut result = 0;
        let mut i = self.lookup(range.start).unwrap_or(0);
        while i < self.len() {
            // Iterate over nearby runs only.
            if range.end < self.starts[i] {
                break;
            }

            let lo = range.start.max(self.starts[i]);
            let hi = range.end.min(self.ends[i]);
            if hi > lo {
                result += hi - lo;
            }
            i += 1;
        }

        result
    }

    /// Element-wise union of the two lists.
    pub fn union(&self, other: &RangeList) -> RangeList {
        self.iter().chain(other.iter()).collect()
    }

    /// Element-wise intersection of the two lists.
    ///
    /// Overlaps come out in ascending order and never touch, so the
    /// result is assembled directly without renormalization.
    pub fn intersect(&self, other: &RangeList) -> RangeList {
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        for range in other.iter() {
            let mut i = self.lookup(range.start).unwrap_or(0);
            while i < self.len() && range.end > self.starts[i] && self.ends[i] > range.start {
                starts.push(self.starts[i].max(range.start));
                ends.push(self.ends[i].min(range.end));
                i += 1;
            }
        }

        RangeList { starts, ends }
    }

    /// Index of the last run with `start <= offset`, if any.
    fn lookup(&self, offset: u32) -> Option<usize> {
        match self.starts.binary_search(&offset) {
            Ok(i) => Some(i),
            Err(0) => None,
            Err(i) => Some(i - 1),
        }
    }

    /// Iterates over the runs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Range> + '_ {
        self.starts
            .iter()
            .zip(&self.ends)
            .map(|(&start, &end)| Range { start, end })
    }
}

impl FromIterator<Range> for RangeList {
    /// Normalizes the input: sorts by `(start, end)` and coalesces
    /// overlapping or touching ranges into maximal runs in one scan.
    /// `O(n log n)`. Zero-length ranges are legal and survive when
    /// isolated; callers filter them where that matters.
    fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> RangeList {
        let mut ranges: Vec<Range> = iter.into_iter().collect();
        ranges.sort();

        let mut starts = Vec::new();
        let mut ends = Vec::new();
        let mut end = 0;
        for range in ranges {
            if starts.is_empty() {
                starts.push(range.start);
            } else if range.start > end {
                ends.push(end);
                starts.push(range.start);
            }

            end = end.max(range.end);
        }

        if !starts.is_empty() {
            ends.push(end);
        }

        RangeList { starts, ends }
    }
}

impl<'a> IntoIterator for &'a RangeList {
    type Item = Range;
    type IntoIter = Box<dyn Iterator<Item = Range> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl fmt::Display for RangeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, range) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", range)?;
        }
        write!(f, "]")
    }
}

impl Range {
    /// Constructs the complement of `others` within this range.
    ///
    /// ```text
    ///   |---------------------|  self
    ///     |--|  |-----|     |-|  others
    ///
    ///   |-|  |--|     |-----|    result
    /// ```
    ///
    /// Input ranges may be in any order and are allowed to overlap.
    pub fn subtract<I>(&self, others: I) -> Vec<Range>
    where
        I: IntoIterator<Item = Range>,
    {
        let normalized: RangeList = others.into_iter().collect();
        if normalized.is_empty() {
            return vec![*self];
        }

        let mut result = Vec::new();
        let mut current = self.start;
        for range in normalized.iter() {
            if range.start > current {
                result.push(Range::new(current, range.start));
            }

            current = range.end;
        }

        if current < self.end {
            result.push(Range::new(current, self.end));
        }

        result
    }
}

/// Shorthand for building a [`RangeList`] from individual ranges.
pub fn range_list<const N: usize>(ranges: [Range; N]) -> RangeList {
    ranges.into_iter().collect()
}
