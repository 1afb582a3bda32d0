//! Core genomic interval and coordinate functionality
//!
//! This module contains the range algebra, the fixed-key genome maps,
//! location lists, the virtual coordinate index and the binary-search
//! lookup table.

pub(crate) mod error;
pub(crate) mod genome;
mod genome_map;
pub(crate) mod location_list;
mod lut;
pub(crate) mod range;
mod range_list;
mod virtual_index;

pub use error::{
    GenomeLociError, LociParseError, LociResult, MismatchedDomain, NoSuchKey, Result,
    UnknownChromosome, VirtualIndexError,
};
pub use genome::{Chromosome, Genome, GenomeQuery};
pub use genome_map::{genome_map, genome_strand_map, GenomeMap, GenomeStrandMap};
pub use location_list::{Builder as LocationListBuilder, LocationList};
pub use lut::{binary_search_range, BinaryLut};
pub use range::{Location, Range, Strand};
pub use range_list::{range_list, RangeList};
pub use virtual_index::VirtualCoordinateIndex;
