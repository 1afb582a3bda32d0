//! genome-loci - Genomic interval algebra and virtual coordinates
//!
//! The coordinate core of a genome browser: an interval-set algebra over
//! half-open ranges, fixed-key maps over the chromosomes of a genome
//! query, chromosome/strand-aware location lists, and a virtual
//! coordinate index that lets one contiguous scroll space address many
//! disjoint genomic loci.
//!
//! # Features
//!
//! - Coalescing normalization with union/intersection/complement over
//!   sorted disjoint runs
//! - Concurrently constructed genome maps with a frozen key domain
//! - Optional parallel per-key initialization with rayon
//! - Tab-delimited location-list persistence (plain, gzip or bzip2)
//! - A bucketed lookup table speeding up repeated binary searches
//!
//! # Example
//!
//! ```
//! use genome_loci::{Genome, GenomeQuery, Location, LocationList, Strand};
//!
//! let genome = Genome::new("hg38", &[("chr1", 248_956_422)]);
//! let query = GenomeQuery::new(&genome);
//! let chr1 = query.chromosomes()[0].clone();
//!
//! let peaks = LocationList::new(
//!     &query,
//!     [
//!         Location::new(100, 200, chr1.clone(), Strand::Plus),
//!         Location::new(150, 300, chr1.clone(), Strand::Plus),
//!     ],
//! )?;
//! assert_eq!(peaks.size(), 1); // overlapping peaks coalesce
//! assert!(peaks.contains(&Location::new(120, 280, chr1, Strand::Plus))?);
//! # Ok::<(), genome_loci::GenomeLociError>(())
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    binary_search_range, genome_map, genome_strand_map, range_list, BinaryLut, Chromosome,
    Genome, GenomeLociError, GenomeMap, GenomeQuery, GenomeStrandMap, Location, LocationList,
    LocationListBuilder, LociParseError, LociResult, MismatchedDomain, NoSuchKey, Range,
    RangeList, Result, Strand, UnknownChromosome, VirtualCoordinateIndex, VirtualIndexError,
};
