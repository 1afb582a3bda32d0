//! Virtual coordinates over multiple disjoint genomic loci.
//!
//! A multi-locus browser view concatenates an ordered list of loci into
//! one contiguous scrollable coordinate space. The index stores the
//! prefix sums of the locus lengths and answers, for any visible window
//! of virtual coordinates, which loci are on screen and how far the
//! first and last of them hang over the window edges.

use crate::core::error::VirtualIndexError;
use crate::core::genome::GenomeQuery;
use crate::core::range::Location;
use log::debug;
use std::ops::Range as VirtualWindow;

/// Cumulative-length index over an ordered list of positive-length loci.
///
/// Immutable and read-only after construction; concurrent lookups need
/// no synchronization. Virtual coordinates are `u64` because the
/// concatenation of many loci may exceed the `u32` offset space.
///
/// ```
/// use genome_loci::{Genome, GenomeQuery, Location, Strand, VirtualCoordinateIndex};
///
/// let genome = Genome::new("to1", &[("chr1", 1000)]);
/// let chr1 = genome.chromosomes()[0].clone();
/// let index = VirtualCoordinateIndex::new(vec![
///     Location::new(0, 100, chr1.clone(), Strand::Plus),
///     Location::new(200, 300, chr1.clone(), Strand::Plus),
/// ])
/// .unwrap();
///
/// assert_eq!(index.total_length(), 200);
/// let visible = index.visible_locations(50, 150);
/// assert_eq!(visible[0], Location::new(50, 100, chr1.clone(), Strand::Plus));
/// assert_eq!(visible[1], Location::new(200, 250, chr1, Strand::Plus));
/// ```
#[derive(Debug, Clone)]
pub struct VirtualCoordinateIndex {
    locations: Vec<Location>,
    /// `cumulative_length[i]` = total length of `locations[0..=i]`;
    /// strictly increasing since every locus has positive length.
    cumulative_length: Vec<u64>,
}

impl VirtualCoordinateIndex {
    /// Builds the index over an ordered, deduplicated list of
    /// positive-length loci; see [`Self::filter`] for the canonical way
    /// to prepare one.
    pub fn new(locations: Vec<Location>) -> Result<VirtualCoordinateIndex, VirtualIndexError> {
        if locations.is_empty() {
            return Err(VirtualIndexError::EmptyInput);
        }

        let mut cumulative_length = Vec::with_capacity(locations.len());
        let mut total = 0u64;
        for location in &locations {
            if location.is_empty() {
                return Err(VirtualIndexError::EmptyLocus(location.to_string()));
            }

            total += u64::from(location.length());
            cumulative_length.push(total);
        }

        Ok(VirtualCoordinateIndex {
            locations,
            cumulative_length,
        })
    }

    /// Prepares a raw locus list for indexing: drops empty loci and loci
    /// whose chromosome the query does not cover, deduplicates, sorts by
    /// natural location order and caps the count at `max_locations`.
    pub fn filter<I>(locations: I, genome_query: &GenomeQuery, max_locations: usize) -> Vec<Location>
    where
        I: IntoIterator<Item = Location>,
    {
        let mut kept: Vec<Location> = locations
            .into_iter()
            .filter(|location| !location.is_empty())
            .filter(|location| genome_query.position_of(&location.chromosome).is_some())
            .collect();
        kept.sort();
        kept.dedup();
        if kept.len() > max_locations {
            debug!(
                "capping locus list at {} of {} locations",
                max_locations,
                kept.len()
            );
            kept.truncate(max_locations);
        }

        kept
    }

    /// Number of indexed loci, always at least one.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Length of the whole virtual coordinate space.
    pub fn total_length(&self) -> u64 {
        *self
            .cumulative_length
            .last()
            .unwrap_or(&0)
    }

    /// The initial window: at most `max_locations` loci, so the default
    /// scale is not too small to see anything.
    ///
    /// # Panics
    ///
    /// Panics if `max_locations` is zero.
    pub fn default_window(&self, max_locations: usize) -> VirtualWindow<u64> {
        assert!(max_locations > 0, "default window over zero locations");
        0..self.cumulative_length[self.len().min(max_locations) - 1]
    }

    /// Lists the loci visible in `[visible_start, visible_end)`, cropping
    /// the first and last to the window edges.
    ///
    /// # Panics
    ///
    /// Panics unless `visible_start < visible_end <= total_length()`.
    pub fn visible_locations(&self, visible_start: u64, visible_end: u64) -> Vec<Location> {
        assert!(
            visible_start < visible_end && visible_end <= self.total_length(),
            "window [{}, {}) outside virtual space [0, {})",
            visible_start,
            visible_end,
            self.total_length()
        );

        // Smallest index whose cumulative length exceeds the window start,
        // i.e. the first locus with offsets at or past `visible_start`.
        let start_index = self
            .cumulative_length
            .partition_point(|&length| length <= visible_start);
        // Smallest index covering the window end.
        let end_index = self
            .cumulative_length
            .partition_point(|&length| length < visible_end);

        debug_assert!(visible_start < self.cumulative_length[start_index]);
        debug_assert!(start_index == 0 || visible_start >= self.cumulative_length[start_index - 1]);
        debug_assert!(visible_end <= self.cumulative_length[end_index]);
        debug_assert!(end_index == 0 || visible_end > self.cumulative_length[end_index - 1]);

        let mut visible = self.locations[start_index..=end_index].to_vec();

        // The first and last locus may stick out of the window; crop the
        // overhang. A window inside a single locus gets both crops.
        let preceding = if start_index > 0 {
            self.cumulative_length[start_index - 1]
        } else {
            0
        };
        let start_crop = visible_start - preceding;
        visible[0].start += start_crop as u32;

        let end_crop = self.cumulative_length[end_index] - visible_end;
        let last = visible.len() - 1;
        visible[last].end -= end_crop as u32;

        visible
    }
}
