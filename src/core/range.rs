//! Core value types: half-open ranges, strands and genomic locations.

use crate::core::genome::Chromosome;
use std::cmp::Ordering;
use std::fmt;

/// A half-open interval `[start, end)` over non-negative offsets.
///
/// Ranges are ordered by `(start, end)`, which is the order every
/// container in this crate relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range {
    /// 0-based start offset (inclusive).
    pub start: u32,
    /// 0-based end offset (exclusive).
    pub end: u32,
}

impl Range {
    /// Creates a new range.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn new(start: u32, end: u32) -> Self {
        assert!(start <= end, "invalid range [{}, {})", start, end);
        Range { start, end }
    }

    /// An empty range at offset zero.
    pub const EMPTY: Range = Range { start: 0, end: 0 };

    /// Number of offsets covered by the range.
    pub fn length(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// Checks whether the two ranges share at least one offset.
    ///
    /// Touching ranges do not intersect:
    /// ```
    /// use genome_loci::Range;
    /// assert!(Range::new(0, 10).intersects(&Range::new(5, 15)));
    /// assert!(!Range::new(0, 10).intersects(&Range::new(10, 20)));
    /// ```
    pub fn intersects(&self, other: &Range) -> bool {
        other.end > self.start && self.end > other.start
    }

    /// Returns the overlap of the two ranges, if any.
    pub fn intersection(&self, other: &Range) -> Option<Range> {
        if self.intersects(other) {
            Some(Range::new(
                self.start.max(other.start),
                self.end.min(other.end),
            ))
        } else {
            None
        }
    }

    /// Checks whether a single offset falls inside the range.
    pub fn contains_offset(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Places the range on a chromosome and strand.
    pub fn on(&self, chromosome: Chromosome, strand: Strand) -> Location {
        Location::new(self.start, self.end, chromosome, strand)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Strand orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum Strand {
    #[default]
    Plus,
    Minus,
}

impl Strand {
    /// Both strands in the canonical iteration order.
    pub const BOTH: [Strand; 2] = [Strand::Plus, Strand::Minus];

    /// Get the complement strand
    ///
    /// # Examples
    /// ```
    /// use genome_loci::Strand;
    /// assert_eq!(Strand::Plus.complement(), Strand::Minus);
    /// assert_eq!(Strand::Minus.complement(), Strand::Plus);
    /// ```
    pub fn complement(&self) -> Self {
        match self {
            Strand::Plus => Strand::Minus,
            Strand::Minus => Strand::Plus,
        }
    }

    /// Parse strand from char
    ///
    /// # Examples
    /// ```
    /// use genome_loci::Strand;
    /// assert_eq!(Strand::from_char('+'), Some(Strand::Plus));
    /// assert_eq!(Strand::from_char('-'), Some(Strand::Minus));
    /// assert_eq!(Strand::from_char('.'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Strand::Plus),
            '-' => Some(Strand::Minus),
            _ => None,
        }
    }

    /// Convert to char
    pub fn to_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
        }
    }

    pub fn is_plus(&self) -> bool {
        matches!(self, Strand::Plus)
    }

    /// Dense index used for array addressing: `Plus == 0`, `Minus == 1`.
    pub fn ordinal(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A [`Range`] qualified by chromosome and strand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// 0-based start offset (inclusive).
    pub start: u32,
    /// 0-based end offset (exclusive).
    pub end: u32,
    pub chromosome: Chromosome,
    pub strand: Strand,
}

impl Location {
    /// Creates a new location.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn new(start: u32, end: u32, chromosome: Chromosome, strand: Strand) -> Self {
        assert!(
            start <= end,
            "invalid location {}:{}[{}, {})",
            chromosome.name(),
            strand,
            start,
            end
        );
        Location {
            start,
            end,
            chromosome,
            strand,
        }
    }

    pub fn length(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// The same interval on the opposite strand.
    pub fn opposite(&self) -> Location {
        Location {
            strand: self.strand.complement(),
            ..self.clone()
        }
    }

    /// Strips chromosome and strand.
    pub fn to_range(&self) -> Range {
        Range::new(self.start, self.end)
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chromosome
            .cmp(&other.chromosome)
            .then(self.strand.cmp(&other.strand))
            .then(self.start.cmp(&other.start))
            .then(self.end.cmp(&other.end))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}[{}, {})",
            self.chromosome.name(),
            self.strand,
            self.start,
            self.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::genome::Genome;

    #[test]
    fn test_range_ordering() {
        assert!(Range::new(0, 10) < Range::new(0, 20));
        assert!(Range::new(0, 20) < Range::new(5, 10));
        assert_eq!(Range::new(3, 7), Range::new(3, 7));
    }

    #[test]
    fn test_range_intersection() {
        assert_eq!(
            Range::new(0, 10).intersection(&Range::new(5, 15)),
            Some(Range::new(5, 10))
        );
        assert_eq!(Range::new(0, 10).intersection(&Range::new(10, 20)), None);
        assert_eq!(Range::new(0, 0).intersection(&Range::new(0, 10)), None);
    }

    #[test]
    fn test_range_contains_offset() {
        let range = Range::new(5, 10);
        assert!(!range.contains_offset(4));
        assert!(range.contains_offset(5));
        assert!(range.contains_offset(9));
        assert!(!range.contains_offset(10));
    }

    #[test]
    #[should_panic(expected = "invalid range")]
    fn test_range_inverted() {
        Range::new(10, 5);
    }

    #[test]
    fn test_strand_roundtrip() {
        for strand in Strand::BOTH {
            assert_eq!(Strand::from_char(strand.to_char()), Some(strand));
        }
    }

    #[test]
    fn test_location_ordering() {
        let genome = Genome::new("to1", &[("chr1", 1000), ("chr2", 1000)]);
        let chr1 = genome.chromosomes()[0].clone();
        let chr2 = genome.chromosomes()[1].clone();

        let a = Location::new(0, 100, chr1.clone(), Strand::Plus);
        let b = Location::new(0, 100, chr1.clone(), Strand::Minus);
        let c = Location::new(0, 100, chr2, Strand::Plus);
        let d = Location::new(50, 100, chr1, Strand::Plus);

        assert!(a < b); // plus sorts before minus
        assert!(b < c); // chromosome dominates strand
        assert!(a < d);
    }

    #[test]
    fn test_location_display() {
        let genome = Genome::new("to1", &[("chr1", 1000)]);
        let chr1 = genome.chromosomes()[0].clone();
        let location = Location::new(0, 100, chr1, Strand::Minus);
        assert_eq!(location.to_string(), "chr1:-[0, 100)");
    }
}
