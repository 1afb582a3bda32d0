//! Location lists: the genomic-level friend of [`RangeList`].
//!
//! A [`LocationList`] keeps one normalized [`RangeList`] per
//! `(chromosome, strand)` bucket of a genome query. Lists are built once
//! through the single-writer [`Builder`] and immutable afterwards; the
//! set algebra produces new lists.

use crate::core::error::{MismatchedDomain, NoSuchKey, Result};
use crate::core::genome::{Chromosome, GenomeQuery};
use crate::core::genome_map::GenomeStrandMap;
use crate::core::range::{Location, Range, Strand};
use crate::core::range_list::RangeList;
use std::path::Path;

/// A set of genomic locations, normalized per `(chromosome, strand)`
/// bucket.
///
/// ```
/// use genome_loci::{Genome, GenomeQuery, Location, LocationList, Strand};
///
/// let genome = Genome::new("to1", &[("chr1", 1000)]);
/// let query = GenomeQuery::new(&genome);
/// let chr1 = query.chromosomes()[0].clone();
///
/// let list = LocationList::new(
///     &query,
///     [
///         Location::new(0, 100, chr1.clone(), Strand::Plus),
///         Location::new(50, 150, chr1.clone(), Strand::Plus),
///         Location::new(200, 210, chr1.clone(), Strand::Plus),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(list.size(), 2); // [0, 150) and [200, 210)
/// assert_eq!(list.length(), 160);
/// ```
#[derive(Debug)]
pub struct LocationList {
    range_lists: GenomeStrandMap<RangeList>,
}

impl LocationList {
    /// Starts a new single-writer builder over the query's key domain.
    pub fn builder(genome_query: &GenomeQuery) -> Builder {
        Builder::new(genome_query)
    }

    /// Collects locations into a normalized list.
    pub fn new<I>(genome_query: &GenomeQuery, locations: I) -> std::result::Result<LocationList, NoSuchKey>
    where
        I: IntoIterator<Item = Location>,
    {
        let mut builder = Self::builder(genome_query);
        for location in locations {
            builder.add(&location)?;
        }
        Ok(builder.build())
    }

    pub fn genome_query(&self) -> &GenomeQuery {
        self.range_lists.genome_query()
    }

    /// Bucket-wise union of the two lists.
    ///
    /// Both lists must be built over the same genome query.
    pub fn union(&self, other: &LocationList) -> std::result::Result<LocationList, MismatchedDomain> {
        self.merge(other, RangeList::union)
    }

    /// Bucket-wise intersection of the two lists.
    pub fn intersect(
        &self,
        other: &LocationList,
    ) -> std::result::Result<LocationList, MismatchedDomain> {
        self.merge(other, RangeList::intersect)
    }

    fn merge(
        &self,
        other: &LocationList,
        op: impl Fn(&RangeList, &RangeList) -> RangeList,
    ) -> std::result::Result<LocationList, MismatchedDomain> {
        if self.genome_query() != other.genome_query() {
            return Err(MismatchedDomain {
                left: self.genome_query().to_string(),
                right: other.genome_query().to_string(),
            });
        }

        Ok(LocationList {
            range_lists: self.range_lists.zip_with(&other.range_lists, op),
        })
    }

    /// Materializes the locations of one `(chromosome, strand)` bucket.
    pub fn get(
        &self,
        chromosome: &Chromosome,
        strand: Strand,
    ) -> std::result::Result<Vec<Location>, NoSuchKey> {
        let runs = self.range_lists.get(chromosome, strand)?;
        Ok(runs
            .iter()
            .map(|range| range.on(chromosome.clone(), strand))
            .collect())
    }

    /// Checks whether a single run of the owning bucket fully covers the
    /// location.
    pub fn contains(&self, location: &Location) -> std::result::Result<bool, NoSuchKey> {
        let runs = self.range_lists.get(&location.chromosome, location.strand)?;
        Ok(runs.contains(&location.to_range()))
    }

    /// Checks whether the location overlaps the list at all.
    pub fn intersects(&self, location: &Location) -> std::result::Result<bool, NoSuchKey> {
        Ok(self.intersection_length(location)? > 0)
    }

    /// Returns the length of the overlap between the location and its
    /// owning bucket.
    pub fn intersection_length(&self, location: &Location) -> std::result::Result<u32, NoSuchKey> {
        let runs = self.range_lists.get(&location.chromosome, location.strand)?;
        Ok(runs.intersection_length(&location.to_range()))
    }

    /// Total number of runs over all buckets.
    pub fn size(&self) -> u64 {
        self.buckets().map(|(_, _, runs)| runs.len() as u64).sum()
    }

    /// Total number of covered offsets over all buckets.
    pub fn length(&self) -> u64 {
        self.buckets().map(|(_, _, runs)| runs.length()).sum()
    }

    /// Iterates over all locations in ascending chromosome / strand /
    /// start order.
    pub fn iter(&self) -> impl Iterator<Item = Location> + '_ {
        self.buckets().flat_map(|(chromosome, strand, runs)| {
            runs.iter()
                .map(move |range| range.on(chromosome.clone(), strand))
                .collect::<Vec<_>>()
        })
    }

    fn buckets<'a>(
        &'a self,
    ) -> impl Iterator<Item = (&'a Chromosome, Strand, std::sync::Arc<RangeList>)> + 'a {
        self.genome_query()
            .chromosomes()
            .iter()
            .enumerate()
            .flat_map(move |(position, chromosome)| {
                Strand::BOTH.map(|strand| {
                    (chromosome, strand, self.range_lists.bucket(position, strand))
                })
            })
    }

    /// Writes the list as tab-delimited records; see [`crate::formats::loci`].
    pub fn save(&self, path: &Path) -> Result<()> {
        crate::formats::loci::save(self, path)
    }

    /// Reads a list back, resolving chromosome names through the query.
    pub fn load(genome_query: &GenomeQuery, path: &Path) -> Result<LocationList> {
        crate::formats::loci::load(genome_query, path)
    }
}

impl Location {
    /// Constructs the complement of `others` within this location.
    ///
    /// Input locations may be in any order and are allowed to overlap;
    /// locations on a different chromosome or strand are silently
    /// ignored. See [`Range::subtract`] for details.
    pub fn subtract(&self, others: &[Location]) -> Vec<Location> {
        let ranges: Vec<Range> = others
            .iter()
            .filter(|other| {
                other.strand == self.strand && other.chromosome == self.chromosome
            })
            .map(Location::to_range)
            .collect();

        if ranges.is_empty() {
            return vec![self.clone()];
        }

        self.to_range()
            .subtract(ranges)
            .into_iter()
            .map(|range| range.on(self.chromosome.clone(), self.strand))
            .collect()
    }
}

/// Single-writer accumulator for [`LocationList`].
///
/// Not thread-safe; confine it to one thread until [`Builder::build`].
/// Raw ranges per bucket stay unsorted and may overlap until `build`
/// normalizes them.
#[derive(Debug)]
pub struct Builder {
    genome_query: GenomeQuery,
    /// Chromosome-major layout, `Plus` before `Minus`, matching
    /// [`GenomeStrandMap`].
    buckets: Vec<Vec<Range>>,
}

impl Builder {
    fn new(genome_query: &GenomeQuery) -> Builder {
        Builder {
            genome_query: genome_query.clone(),
            buckets: vec![Vec::new(); genome_query.len() * 2],
        }
    }

    /// Accumulates one location into its bucket.
    pub fn add(&mut self, location: &Location) -> std::result::Result<&mut Builder, NoSuchKey> {
        let position = self
            .genome_query
            .position_of(&location.chromosome)
            .ok_or_else(|| NoSuchKey {
                chromosome: location.chromosome.name().to_string(),
                build: location.chromosome.build().to_string(),
                strand: Some(location.strand),
                domain: self.genome_query.build().to_string(),
            })?;

        self.buckets[position * 2 + location.strand.ordinal()].push(location.to_range());
        Ok(self)
    }

    /// Normalizes every bucket and freezes the list.
    pub fn build(self) -> LocationList {
        let values: Vec<RangeList> = self
            .buckets
            .into_iter()
            .map(|ranges| ranges.into_iter().collect())
            .collect();

        LocationList {
            range_lists: GenomeStrandMap::from_values(self.genome_query, values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::genome::Genome;
    use std::sync::Arc;

    fn test_query() -> GenomeQuery {
        let genome = Genome::new("to1", &[("chr1", 1000), ("chr2", 2000)]);
        GenomeQuery::new(&genome)
    }

    fn chr(query: &GenomeQuery, i: usize) -> Chromosome {
        query.chromosomes()[i].clone()
    }

    fn loc(query: &GenomeQuery, i: usize, start: u32, end: u32, strand: Strand) -> Location {
        Location::new(start, end, chr(query, i), strand)
    }

    #[test]
    fn test_builder_coalesces() {
        let query = test_query();
        let list = LocationList::new(
            &query,
            [
                loc(&query, 0, 0, 100, Strand::Plus),
                loc(&query, 0, 50, 150, Strand::Plus),
                loc(&query, 0, 200, 210, Strand::Plus),
            ],
        )
        .unwrap();

        let locations = list.get(&chr(&query, 0), Strand::Plus).unwrap();
        assert_eq!(
            locations,
            vec![
                loc(&query, 0, 0, 150, Strand::Plus),
                loc(&query, 0, 200, 210, Strand::Plus),
            ]
        );
        assert_eq!(list.size(), 2);
        assert_eq!(list.length(), 160);
    }

    #[test]
    fn test_strands_do_not_mix() {
        let query = test_query();
        let list = LocationList::new(
            &query,
            [
                loc(&query, 0, 0, 100, Strand::Plus),
                loc(&query, 0, 50, 150, Strand::Minus),
            ],
        )
        .unwrap();

        assert_eq!(list.size(), 2);
        assert_eq!(
            list.get(&chr(&query, 0), Strand::Plus).unwrap(),
            vec![loc(&query, 0, 0, 100, Strand::Plus)]
        );
        assert_eq!(
            list.get(&chr(&query, 0), Strand::Minus).unwrap(),
            vec![loc(&query, 0, 50, 150, Strand::Minus)]
        );
    }

    #[test]
    fn test_builder_rejects_foreign_chromosome() {
        let query = test_query();
        let foreign = Genome::new("to2", &[("chr1", 1000)]);
        let location = Location::new(0, 10, foreign.chromosomes()[0].clone(), Strand::Plus);

        let mut builder = LocationList::builder(&query);
        assert!(builder.add(&location).is_err());
    }

    #[test]
    fn test_contains_and_intersects() {
        let query = test_query();
        let list = LocationList::new(&query, [loc(&query, 0, 10, 20, Strand::Plus)]).unwrap();

        assert!(list.contains(&loc(&query, 0, 12, 18, Strand::Plus)).unwrap());
        assert!(!list.contains(&loc(&query, 0, 12, 25, Strand::Plus)).unwrap());
        assert!(!list.contains(&loc(&query, 0, 12, 18, Strand::Minus)).unwrap());
        assert!(!list.contains(&loc(&query, 1, 12, 18, Strand::Plus)).unwrap());

        assert!(list.intersects(&loc(&query, 0, 15, 30, Strand::Plus)).unwrap());
        assert!(!list.intersects(&loc(&query, 0, 20, 30, Strand::Plus)).unwrap());
        assert_eq!(
            list.intersection_length(&loc(&query, 0, 15, 30, Strand::Plus))
                .unwrap(),
            5
        );
    }

    #[test]
    fn test_union() {
        let query = test_query();
        let left = LocationList::new(&query, [loc(&query, 0, 0, 10, Strand::Plus)]).unwrap();
        let right = LocationList::new(&query, [loc(&query, 0, 5, 30, Strand::Plus)]).unwrap();

        let union = left.union(&right).unwrap();
        assert_eq!(
            union.get(&chr(&query, 0), Strand::Plus).unwrap(),
            vec![loc(&query, 0, 0, 30, Strand::Plus)]
        );
    }

    #[test]
    fn test_intersect() {
        let query = test_query();
        let left = LocationList::new(
            &query,
            [
                loc(&query, 0, 0, 10, Strand::Plus),
                loc(&query, 1, 0, 10, Strand::Plus),
            ],
        )
        .unwrap();
        let right = LocationList::new(&query, [loc(&query, 0, 5, 30, Strand::Plus)]).unwrap();

        let intersection = left.intersect(&right).unwrap();
        assert_eq!(
            intersection.get(&chr(&query, 0), Strand::Plus).unwrap(),
            vec![loc(&query, 0, 5, 10, Strand::Plus)]
        );
        assert!(intersection
            .get(&chr(&query, 1), Strand::Plus)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_mismatched_domain() {
        let query = test_query();
        let genome = Genome::new("to1", &[("chr1", 1000), ("chr2", 2000)]);
        let subset = GenomeQuery::with_names(&genome, &["chr1"]).unwrap();

        let left = LocationList::new(&query, []).unwrap();
        let right = LocationList::new(&subset, []).unwrap();
        assert!(left.union(&right).is_err());
        assert!(left.intersect(&right).is_err());
    }

    #[test]
    fn test_iteration_order() {
        let query = test_query();
        let list = LocationList::new(
            &query,
            [
                loc(&query, 1, 0, 10, Strand::Plus),
                loc(&query, 0, 20, 30, Strand::Minus),
                loc(&query, 0, 0, 10, Strand::Plus),
            ],
        )
        .unwrap();

        let all: Vec<Location> = list.iter().collect();
        assert_eq!(
            all,
            vec![
                loc(&query, 0, 0, 10, Strand::Plus),
                loc(&query, 0, 20, 30, Strand::Minus),
                loc(&query, 1, 0, 10, Strand::Plus),
            ]
        );
    }

    #[test]
    fn test_subtract_ignores_other_buckets() {
        let query = test_query();
        let location = loc(&query, 0, 0, 100, Strand::Plus);
        let others = vec![
            loc(&query, 0, 20, 40, Strand::Plus),
            loc(&query, 0, 50, 60, Strand::Minus), // wrong strand
            loc(&query, 1, 60, 70, Strand::Plus),  // wrong chromosome
        ];

        assert_eq!(
            location.subtract(&others),
            vec![
                loc(&query, 0, 0, 20, Strand::Plus),
                loc(&query, 0, 40, 100, Strand::Plus),
            ]
        );
    }

    #[test]
    fn test_subtract_nothing() {
        let query = test_query();
        let location = loc(&query, 0, 0, 100, Strand::Plus);
        assert_eq!(location.subtract(&[]), vec![location.clone()]);
    }

    #[test]
    fn test_shared_across_threads() {
        let query = test_query();
        let list = Arc::new(
            LocationList::new(&query, [loc(&query, 0, 0, 100, Strand::Plus)]).unwrap(),
        );

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let list = Arc::clone(&list);
                let probe = loc(&query, 0, 10, 20, Strand::Plus);
                std::thread::spawn(move || list.contains(&probe).unwrap())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
